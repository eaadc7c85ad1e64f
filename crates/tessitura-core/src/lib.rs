//! Batch audio feature extraction: decode audio files to mono
//! waveforms and compute spectral, cepstral, and onset descriptors per
//! file, aggregated into serializable records.

pub mod config;
pub mod decode;
pub mod error;
pub mod extensions;
pub mod features;
pub mod pipeline;
pub mod record;
pub mod scanner;
pub mod stft;

pub use config::{AnalysisConfig, DescriptorSet};
pub use decode::{Waveform, load_waveform};
pub use error::{DecodeError, PipelineError};
pub use pipeline::{BatchOutcome, CancelToken, analyze_file, run};
pub use record::FileRecord;
pub use scanner::discover_files;
