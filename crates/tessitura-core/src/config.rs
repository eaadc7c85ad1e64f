use serde::{Deserialize, Serialize};

/// Analysis frame length in samples, Hann-windowed before the FFT.
pub const DEFAULT_N_FFT: usize = 2048;
/// Samples advanced between consecutive frames.
pub const DEFAULT_HOP_LENGTH: usize = 512;
/// Triangular mel filters applied to the power spectrogram.
pub const DEFAULT_N_MELS: usize = 128;
/// Cepstral coefficients kept after the DCT.
pub const DEFAULT_N_MFCC: usize = 12;
/// Power floor applied before taking log10. Keeps silent bands finite.
pub const DEFAULT_LOG_FLOOR: f32 = 1e-10;
/// Onset events reported per file, earliest first.
pub const DEFAULT_MAX_ONSETS: usize = 20;

/// Which descriptor groups the pipeline computes and serializes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DescriptorSet {
    pub spectral: bool,
    pub cepstral: bool,
    pub onsets: bool,
}

impl Default for DescriptorSet {
    fn default() -> Self {
        DescriptorSet {
            spectral: true,
            cepstral: true,
            onsets: true,
        }
    }
}

/// Numeric parameters of the per-file analysis.
///
/// Every value here is load-bearing for reproducibility: two runs with
/// the same config over the same file must produce identical output.
/// The defaults are the canonical configuration and are pinned by tests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisConfig {
    pub n_fft: usize,
    pub hop_length: usize,
    pub n_mels: usize,
    pub n_mfcc: usize,
    pub log_floor: f32,
    pub max_onsets: usize,
    pub descriptors: DescriptorSet,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            n_fft: DEFAULT_N_FFT,
            hop_length: DEFAULT_HOP_LENGTH,
            n_mels: DEFAULT_N_MELS,
            n_mfcc: DEFAULT_N_MFCC,
            log_floor: DEFAULT_LOG_FLOOR,
            max_onsets: DEFAULT_MAX_ONSETS,
            descriptors: DescriptorSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_pinned() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.n_fft, 2048);
        assert_eq!(cfg.hop_length, 512);
        assert_eq!(cfg.n_mels, 128);
        assert_eq!(cfg.n_mfcc, 12);
        assert_eq!(cfg.log_floor, 1e-10);
        assert_eq!(cfg.max_onsets, 20);
        assert_eq!(cfg.descriptors, DescriptorSet::default());
    }
}
