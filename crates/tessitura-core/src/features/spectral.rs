use crate::stft::Stft;

/// Frame-wise spectral centroid and bandwidth of one waveform.
#[derive(Debug, Clone, Default)]
pub struct SpectralDescriptors {
    /// Amplitude-weighted mean frequency per frame, Hz.
    pub centroids: Vec<f32>,
    /// Amplitude-weighted spread around the centroid per frame, Hz.
    pub bandwidths: Vec<f32>,
}

/// Compute centroid and bandwidth over a magnitude spectrogram.
///
/// centroid(t)  = sum(f * S(f,t)) / sum(S(f,t))
/// bandwidth(t) = sqrt(sum(S(f,t) * (f - centroid(t))^2) / sum(S(f,t)))
///
/// Frames with no energy get centroid 0.0 and bandwidth 0.0 rather than
/// NaN from a zero division.
pub fn compute(stft: &Stft, magnitudes: &[Vec<f32>], sample_rate: u32) -> SpectralDescriptors {
    let mut centroids = Vec::with_capacity(magnitudes.len());
    let mut bandwidths = Vec::with_capacity(magnitudes.len());

    for frame in magnitudes {
        let total: f64 = frame.iter().map(|&m| m as f64).sum();
        if total <= 0.0 {
            centroids.push(0.0);
            bandwidths.push(0.0);
            continue;
        }

        let mut weighted: f64 = 0.0;
        for (bin, &mag) in frame.iter().enumerate() {
            weighted += stft.bin_frequency(bin, sample_rate) as f64 * mag as f64;
        }
        let centroid = weighted / total;

        let mut spread: f64 = 0.0;
        for (bin, &mag) in frame.iter().enumerate() {
            let d = stft.bin_frequency(bin, sample_rate) as f64 - centroid;
            spread += mag as f64 * d * d;
        }
        let bandwidth = (spread / total).sqrt();

        centroids.push(centroid as f32);
        bandwidths.push(bandwidth as f32);
    }

    SpectralDescriptors {
        centroids,
        bandwidths,
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
    fn pure_tone_centroid_sits_near_the_tone() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        let samples = tone(1000.0, sr, 1.0);
        let mags = stft.magnitudes(&samples);
        let desc = compute(&stft, &mags, sr);

        assert_eq!(desc.centroids.len(), mags.len());
        assert_eq!(desc.bandwidths.len(), mags.len());

        // Interior frames: centroid close to 1 kHz, narrow spread.
        let mid = desc.centroids.len() / 2;
        assert!((desc.centroids[mid] - 1000.0).abs() < 100.0);
        assert!(desc.bandwidths[mid] < 500.0);
    }

    #[test]
    fn centroid_stays_below_nyquist() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        let samples = tone(5000.0, sr, 0.5);
        let mags = stft.magnitudes(&samples);
        let desc = compute(&stft, &mags, sr);

        for &c in &desc.centroids {
            assert!(c >= 0.0);
            assert!(c <= sr as f32 / 2.0);
        }
    }

    #[test]
    fn silence_yields_zero_not_nan() {
        let sr = 22_050;
        let stft = Stft::new(2048, 512);
        let mags = stft.magnitudes(&vec![0.0; 4096]);
        let desc = compute(&stft, &mags, sr);

        assert!(desc.centroids.iter().all(|&c| c == 0.0));
        assert!(desc.bandwidths.iter().all(|&b| b == 0.0));
        assert!(desc.centroids.iter().all(|c| c.is_finite()));
    }
}
