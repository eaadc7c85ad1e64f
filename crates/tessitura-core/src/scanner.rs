use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::PipelineError;
use crate::extensions::SupportedExtension;

/// Collect the audio files to analyze.
///
/// A single explicit file is accepted as-is. A directory is walked
/// recursively, filtered by the extension allow-list, in sorted order so
/// repeated runs discover files deterministically.
pub fn discover_files(input: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    if !input.exists() {
        return Err(PipelineError::InputNotFound(input.to_path_buf()));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if SupportedExtension::from_path(&path).is_some() {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(PipelineError::NoAudioFiles(input.to_path_buf()));
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn filters_directory_by_allow_list() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.wav"), b"x").unwrap();
        fs::write(dir.path().join("b.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.FLAC"), b"x").unwrap();

        let files = discover_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.wav", "c.FLAC"]);
    }

    #[test]
    fn single_file_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.mp3");
        fs::write(&path, b"x").unwrap();

        let files = discover_files(&path).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn missing_input_is_fatal() {
        let err = discover_files(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, PipelineError::InputNotFound(_)));
    }

    #[test]
    fn empty_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let err = discover_files(dir.path()).unwrap_err();
        assert!(matches!(err, PipelineError::NoAudioFiles(_)));
    }
}
