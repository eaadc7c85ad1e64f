use crate::features::mel::{MelFilterbank, mel_spectrogram, power_to_db};

/// Cepstral descriptor output: coefficient-major matrix plus its grand
/// mean over every (coefficient, frame) cell.
#[derive(Debug, Clone, Default)]
pub struct CepstralDescriptors {
    /// `[coefficient][frame]`, exactly `n_mfcc` rows.
    pub coefficients: Vec<Vec<f32>>,
    pub grand_mean: f32,
}

/// Derive MFCCs from a power spectrogram: mel filterbank, log
/// compression with the configured floor, then an orthonormal DCT-II
/// per frame keeping the first `n_mfcc` coefficients.
pub fn compute(
    filterbank: &MelFilterbank,
    power_frames: &[Vec<f32>],
    n_mfcc: usize,
    log_floor: f32,
) -> CepstralDescriptors {
    let mut mel = mel_spectrogram(filterbank, power_frames);
    power_to_db(&mut mel, log_floor);

    let n_mels = filterbank.n_mels();
    let frames = mel.len();

    let mut coefficients = vec![vec![0.0f32; frames]; n_mfcc];
    for (t, log_frame) in mel.iter().enumerate() {
        for k in 0..n_mfcc {
            let mut sum = 0.0f64;
            for (n, &x) in log_frame.iter().enumerate() {
                sum += x as f64
                    * (std::f64::consts::PI * k as f64 * (n as f64 + 0.5) / n_mels as f64).cos();
            }
            // Orthonormal DCT-II scaling.
            let scale = if k == 0 {
                (1.0 / n_mels as f64).sqrt()
            } else {
                (2.0 / n_mels as f64).sqrt()
            };
            coefficients[k][t] = (sum * scale) as f32;
        }
    }

    let cells = (n_mfcc * frames).max(1);
    let grand_mean = (coefficients
        .iter()
        .flatten()
        .map(|&v| v as f64)
        .sum::<f64>()
        / cells as f64) as f32;

    CepstralDescriptors {
        coefficients,
        grand_mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stft::Stft;

    fn tone(freq: f32, sample_rate: u32, seconds: f32) -> Vec<f32> {
        let total = (seconds * sample_rate as f32) as usize;
        (0..total)
            .map(|n| (2.0 * std::f32::consts::PI * freq * n as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn shape_is_coefficients_by_frames() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        for seconds in [0.1, 0.5, 1.3] {
            let samples = tone(440.0, sr, seconds);
            let powers = stft.powers(&samples);
            let fb = MelFilterbank::new(128, 2048, sr);
            let desc = compute(&fb, &powers, 12, 1e-10);

            assert_eq!(desc.coefficients.len(), 12);
            for row in &desc.coefficients {
                assert_eq!(row.len(), stft.frame_count(samples.len()));
            }
        }
    }

    #[test]
    fn silence_stays_finite_through_the_log() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        let powers = stft.powers(&vec![0.0; 8192]);
        let fb = MelFilterbank::new(128, 2048, sr);
        let desc = compute(&fb, &powers, 12, 1e-10);

        assert!(desc.coefficients.iter().flatten().all(|v| v.is_finite()));
        assert!(desc.grand_mean.is_finite());
        // All-silent input: c0 is the scaled sum of the floor in dB,
        // strictly negative.
        assert!(desc.coefficients[0][0] < 0.0);
    }

    #[test]
    fn identical_input_is_deterministic() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        let samples = tone(440.0, sr, 0.5);
        let powers = stft.powers(&samples);
        let fb = MelFilterbank::new(128, 2048, sr);

        let a = compute(&fb, &powers, 12, 1e-10);
        let b = compute(&fb, &powers, 12, 1e-10);
        assert_eq!(a.coefficients, b.coefficients);
        assert_eq!(a.grand_mean, b.grand_mean);
    }
}
