use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::decode::load_waveform;
use crate::error::{DecodeError, PipelineError};
use crate::features::mel::MelFilterbank;
use crate::features::{mfcc, onset, spectral};
use crate::record::FileRecord;
use crate::stft::Stft;

/// Cooperative cancellation handle. The orchestrator polls it between
/// files; transform code never sees it.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What a finished batch hands to the writer: records in discovery
/// order, plus the files that failed to decode and were skipped.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<FileRecord>,
    pub skipped: Vec<PathBuf>,
}

/// Run the full descriptor pipeline over one file.
///
/// Only the waveform load can fail; the descriptor engines are total
/// over any decoded waveform, so a degraded record can only come from a
/// disabled descriptor group.
pub fn analyze_file(path: &Path, config: &AnalysisConfig) -> Result<FileRecord, DecodeError> {
    let wave = load_waveform(path)?;
    let duration = wave.duration_seconds();

    let stft = Stft::new(config.n_fft, config.hop_length);

    let spectral_out = if config.descriptors.spectral {
        let magnitudes = stft.magnitudes(&wave.samples);
        Some(spectral::compute(&stft, &magnitudes, wave.sample_rate))
    } else {
        None
    };

    let (cepstral_out, onsets_out) = if config.descriptors.cepstral || config.descriptors.onsets {
        let powers = stft.powers(&wave.samples);
        let filterbank = MelFilterbank::new(config.n_mels, config.n_fft, wave.sample_rate);

        let cepstral = config.descriptors.cepstral.then(|| {
            mfcc::compute(&filterbank, &powers, config.n_mfcc, config.log_floor)
        });
        let onsets = config.descriptors.onsets.then(|| {
            onset::detect(
                &stft,
                &filterbank,
                &powers,
                wave.sample_rate,
                config.log_floor,
                config.max_onsets,
            )
        });
        (cepstral, onsets)
    } else {
        (None, None)
    };

    Ok(FileRecord::build(
        path,
        duration,
        spectral_out,
        cepstral_out,
        onsets_out,
    ))
}

/// Drive the per-file pipeline over a discovered file list, in order.
///
/// A file that fails to decode is reported and skipped; it never aborts
/// the batch. Cancellation is honored between files and surfaces as
/// `PipelineError::Interrupted` so the caller writes nothing.
pub fn run(
    files: &[PathBuf],
    config: &AnalysisConfig,
    cancel: &CancelToken,
) -> Result<BatchOutcome, PipelineError> {
    let mut outcome = BatchOutcome::default();

    for path in files {
        if cancel.is_cancelled() {
            return Err(PipelineError::Interrupted);
        }

        info!("Analyzing file: {}", path.display());
        match analyze_file(path, config) {
            Ok(record) => outcome.records.push(record),
            Err(err) => {
                warn!("Skipping {}: {}", path.display(), err);
                outcome.skipped.push(path.clone());
            }
        }
    }

    Ok(outcome)
}
