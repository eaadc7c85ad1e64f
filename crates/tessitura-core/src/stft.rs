use std::sync::Arc;

use apodize::hanning_iter;
use rustfft::{Fft, FftPlanner, num_complex::Complex};

/// Short-time Fourier analysis shared by every descriptor engine.
///
/// Frames are centered: the waveform is zero-padded by `n_fft / 2` on
/// both ends, so frame `t` is centered on sample `t * hop_length` and
/// `frame_count = len / hop_length + 1`. All engines driven by the same
/// config therefore agree on frame count and frame timing.
pub struct Stft {
    n_fft: usize,
    hop_length: usize,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
}

impl Stft {
    pub fn new(n_fft: usize, hop_length: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(n_fft);
        let window: Vec<f32> = hanning_iter(n_fft).map(|x| x as f32).collect();

        Stft {
            n_fft,
            hop_length,
            fft,
            window,
        }
    }

    /// Spectrum bins kept per frame (DC through Nyquist).
    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    pub fn frame_count(&self, sample_count: usize) -> usize {
        sample_count / self.hop_length + 1
    }

    /// Center frequency of spectrum bin `k` in Hz.
    pub fn bin_frequency(&self, bin: usize, sample_rate: u32) -> f32 {
        bin as f32 * sample_rate as f32 / self.n_fft as f32
    }

    /// Time position of frame `t` in seconds.
    pub fn frame_time(&self, frame: usize, sample_rate: u32) -> f32 {
        (frame * self.hop_length) as f32 / sample_rate as f32
    }

    /// Magnitude spectrogram, frame-major: one `n_bins()` row per frame.
    pub fn magnitudes(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let half = self.n_fft / 2;
        let frames = self.frame_count(samples.len());

        let mut fft_buffer: Vec<Complex<f32>> = vec![Complex::new(0.0, 0.0); self.n_fft];
        let mut scratch: Vec<Complex<f32>> =
            vec![Complex::new(0.0, 0.0); self.fft.get_inplace_scratch_len()];

        let mut out = Vec::with_capacity(frames);
        for t in 0..frames {
            // Window start in the zero-padded signal maps to this offset
            // in the real signal; out-of-range samples read as zero.
            let start = (t * self.hop_length) as isize - half as isize;
            for (i, slot) in fft_buffer.iter_mut().enumerate() {
                let idx = start + i as isize;
                let sample = if idx >= 0 && (idx as usize) < samples.len() {
                    samples[idx as usize]
                } else {
                    0.0
                };
                *slot = Complex::new(sample * self.window[i], 0.0);
            }

            self.fft.process_with_scratch(&mut fft_buffer, &mut scratch);

            let row: Vec<f32> = fft_buffer[..self.n_bins()].iter().map(|c| c.norm()).collect();
            out.push(row);
        }

        out
    }

    /// Power spectrogram (squared magnitudes), frame-major.
    pub fn powers(&self, samples: &[f32]) -> Vec<Vec<f32>> {
        let mut mags = self.magnitudes(samples);
        for row in &mut mags {
            for v in row.iter_mut() {
                *v *= *v;
            }
        }
        mags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        let total = (seconds * sample_rate as f32) as usize;
        (0..total)
            .map(|n| (2.0 * std::f32::consts::PI * freq * n as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn frame_count_matches_centered_framing() {
        let stft = Stft::new(2048, 512);
        assert_eq!(stft.frame_count(0), 1);
        assert_eq!(stft.frame_count(512), 2);
        assert_eq!(stft.frame_count(44_100), 44_100 / 512 + 1);

        let samples = tone(440.0, 22_050, 1.0);
        let mags = stft.magnitudes(&samples);
        assert_eq!(mags.len(), stft.frame_count(samples.len()));
        assert!(mags.iter().all(|row| row.len() == stft.n_bins()));
    }

    #[test]
    fn tone_energy_lands_in_the_right_bin() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        let samples = tone(440.0, sr, 1.0);
        let mags = stft.magnitudes(&samples);

        // Pick an interior frame, away from the zero-padded edges.
        let row = &mags[mags.len() / 2];
        let peak_bin = row
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();

        let peak_hz = stft.bin_frequency(peak_bin, sr);
        let bin_width = sr as f32 / 2048.0;
        assert!((peak_hz - 440.0).abs() <= bin_width);
    }

    #[test]
    fn silence_produces_zero_magnitudes() {
        let stft = Stft::new(2048, 512);
        let mags = stft.magnitudes(&vec![0.0; 8192]);
        assert!(mags.iter().flatten().all(|&m| m == 0.0));
    }

    #[test]
    fn frame_time_mapping() {
        let stft = Stft::new(2048, 512);
        assert_eq!(stft.frame_time(0, 22_050), 0.0);
        let t = stft.frame_time(43, 22_050);
        assert!((t - 43.0 * 512.0 / 22_050.0).abs() < 1e-6);
    }
}
