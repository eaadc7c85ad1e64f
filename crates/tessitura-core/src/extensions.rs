use std::path::Path;

use serde::{Deserialize, Serialize};

/// File extensions the batch will pick up during discovery.
/// Matching is case-insensitive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SupportedExtension {
    Aac,
    Au,
    Flac,
    M4a,
    Mp3,
    Ogg,
    Wav,
    Aif,
}

impl SupportedExtension {
    pub const ALL: &'static [SupportedExtension] = &[
        SupportedExtension::Aac,
        SupportedExtension::Au,
        SupportedExtension::Flac,
        SupportedExtension::M4a,
        SupportedExtension::Mp3,
        SupportedExtension::Ogg,
        SupportedExtension::Wav,
        SupportedExtension::Aif,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedExtension::Aac => "aac",
            SupportedExtension::Au => "au",
            SupportedExtension::Flac => "flac",
            SupportedExtension::M4a => "m4a",
            SupportedExtension::Mp3 => "mp3",
            SupportedExtension::Ogg => "ogg",
            SupportedExtension::Wav => "wav",
            SupportedExtension::Aif => "aif",
        }
    }

    /// Match a path against the allow-list by its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl std::str::FromStr for SupportedExtension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        SupportedExtension::ALL
            .iter()
            .find(|ext| ext.as_str() == lower)
            .copied()
            .ok_or_else(|| format!("Extension not supported: {}", s))
    }
}

impl std::fmt::Display for SupportedExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            SupportedExtension::from_path(&PathBuf::from("a/B.WAV")),
            Some(SupportedExtension::Wav)
        );
        assert_eq!(
            SupportedExtension::from_path(&PathBuf::from("tone.FlAc")),
            Some(SupportedExtension::Flac)
        );
    }

    #[test]
    fn rejects_unlisted_extensions() {
        assert_eq!(SupportedExtension::from_path(&PathBuf::from("b.txt")), None);
        assert_eq!(SupportedExtension::from_path(&PathBuf::from("noext")), None);
        // aiff is not on the list, aif is
        assert_eq!(SupportedExtension::from_path(&PathBuf::from("x.aiff")), None);
    }
}
