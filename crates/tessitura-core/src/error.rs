use std::path::PathBuf;

use symphonia::core::errors::Error as SymphoniaError;
use thiserror::Error;

/// Failure to turn a single audio file into a waveform. Always scoped to
/// one file; the batch keeps going.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to open file: {path}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to probe file format")]
    ProbeFormat(#[source] SymphoniaError),

    #[error("No compatible audio track found in the file")]
    NoCompatibleTrack,

    #[error("Failed to create decoder for codec: {codec:?}")]
    CreateDecoder {
        codec: symphonia::core::codecs::CodecType,
        #[source]
        source: SymphoniaError,
    },

    #[error("Failed to read audio packet")]
    PacketRead(#[source] SymphoniaError),

    #[error("Unrecoverable decoder error")]
    Decoder(#[source] SymphoniaError),

    #[error("The track has no sample rate")]
    InvalidSampleRate,

    #[error("The track decoded to zero channels")]
    InvalidChannelCount,
}

/// Batch-level failures. These abort the run before or after analysis;
/// per-file decode errors never surface here.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Input path does not exist: {0}")]
    InputNotFound(PathBuf),

    #[error("No audio files found under: {0}")]
    NoAudioFiles(PathBuf),

    #[error("Interrupted")]
    Interrupted,
}
