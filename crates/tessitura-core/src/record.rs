use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::features::mfcc::CepstralDescriptors;
use crate::features::spectral::SpectralDescriptors;
use crate::features::summarize;

/// One analyzed file, ready for serialization.
///
/// Descriptor groups that were disabled by configuration, or degraded by
/// a per-stage failure, are absent from the JSON entirely. An empty
/// onset list is a value, not an absence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    pub path: String,
    pub duration: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_centroids: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_bandwidths: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_centroid_min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_centroid_max: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spectral_centroid_mean: Option<f32>,

    /// `[coefficient][frame]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfccs: Option<Vec<Vec<f32>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mfcc_mean: Option<f32>,

    /// Onset timestamps in seconds, earliest first.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub onsets: Option<Vec<f32>>,
}

impl FileRecord {
    /// Pure aggregation of the descriptor outputs for one file. No
    /// recomputation happens here beyond the summary reductions.
    pub fn build(
        path: &Path,
        duration: f64,
        spectral: Option<SpectralDescriptors>,
        cepstral: Option<CepstralDescriptors>,
        onsets: Option<Vec<f32>>,
    ) -> Self {
        let mut record = FileRecord {
            path: path.display().to_string(),
            duration,
            spectral_centroids: None,
            spectral_bandwidths: None,
            spectral_centroid_min: None,
            spectral_centroid_max: None,
            spectral_centroid_mean: None,
            mfccs: None,
            mfcc_mean: None,
            onsets,
        };

        if let Some(spectral) = spectral {
            if let Some((min, max, mean)) = summarize(&spectral.centroids) {
                record.spectral_centroid_min = Some(min);
                record.spectral_centroid_max = Some(max);
                record.spectral_centroid_mean = Some(mean);
            }
            record.spectral_centroids = Some(spectral.centroids);
            record.spectral_bandwidths = Some(spectral.bandwidths);
        }

        if let Some(cepstral) = cepstral {
            record.mfcc_mean = Some(cepstral.grand_mean);
            record.mfccs = Some(cepstral.coefficients);
        }

        record
    }
}
