//! Supported audio formats and per-file classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Audio formats the tool recognizes, both as targets and as sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioFormat {
    /// Audio Interchange File Format
    Aiff,
    /// Free Lossless Audio Codec
    Flac,
    /// MPEG-4 audio
    M4a,
    /// MPEG Audio Layer III
    Mp3,
    /// MPEG-4 container
    Mp4,
    /// WAVE
    Wav,
    /// Ogg container
    Ogg,
}

impl AudioFormat {
    /// Every supported format, in declaration order.
    pub const ALL: [AudioFormat; 7] = [
        Self::Aiff,
        Self::Flac,
        Self::M4a,
        Self::Mp3,
        Self::Mp4,
        Self::Wav,
        Self::Ogg,
    ];

    /// Returns the file extension for this format, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Aiff => "aiff",
            Self::Flac => "flac",
            Self::M4a => "m4a",
            Self::Mp3 => "mp3",
            Self::Mp4 => "mp4",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
        }
    }

    /// Looks up a format by bare extension, ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }

    /// Looks up the format of a path from the text after the last `.` of
    /// its file name. A leading dot counts, so `.flac` is a flac file.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.rsplit_once('.'))
            .and_then(|(_, ext)| Self::from_extension(ext))
    }

    /// Replaces the last extension of `file_name` with this format's.
    ///
    /// `song.flac` becomes `song.mp3` and `.flac` becomes `.mp3`.
    pub fn rename(&self, file_name: &str) -> String {
        let stem = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem);
        format!("{}.{}", stem, self.extension())
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// Returned when a requested format is outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported format '{input}', expected one of: {expected}")]
pub struct FormatParseError {
    input: String,
    expected: String,
}

impl FromStr for AudioFormat {
    type Err = FormatParseError;

    /// Accepts `mp3` as well as `.mp3`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.trim().strip_prefix('.').unwrap_or(s.trim());
        Self::from_extension(bare).ok_or_else(|| FormatParseError {
            input: s.to_string(),
            expected: Self::ALL
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

/// How a single file is treated by the walker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Audio already in the target format. Copied like an opaque file.
    AlreadyTargetFormat,
    /// Audio in another supported format, to be transcoded.
    ConvertibleAudio(AudioFormat),
    /// Anything else. Copied verbatim.
    Opaque,
}

impl FileClass {
    /// Classifies `path` against the requested target format.
    pub fn of(path: &Path, target: AudioFormat) -> Self {
        match AudioFormat::from_path(path) {
            Some(format) if format == target => Self::AlreadyTargetFormat,
            Some(format) => Self::ConvertibleAudio(format),
            None => Self::Opaque,
        }
    }

    /// Whether the file goes through the transcoder.
    pub fn needs_transcode(&self) -> bool {
        matches!(self, Self::ConvertibleAudio(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_dot() {
        assert_eq!(".mp3".parse::<AudioFormat>().unwrap(), AudioFormat::Mp3);
        assert_eq!("flac".parse::<AudioFormat>().unwrap(), AudioFormat::Flac);
        assert_eq!(".OGG".parse::<AudioFormat>().unwrap(), AudioFormat::Ogg);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = ".opus".parse::<AudioFormat>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains(".opus"));
        assert!(message.contains(".aiff"));
        assert!(message.contains(".ogg"));
        assert!("".parse::<AudioFormat>().is_err());
    }

    #[test]
    fn test_display_has_leading_dot() {
        assert_eq!(AudioFormat::M4a.to_string(), ".m4a");
        assert_eq!(AudioFormat::Aiff.to_string(), ".aiff");
    }

    #[test]
    fn test_every_supported_extension_converts() {
        for format in AudioFormat::ALL {
            let name = format!("x.{}", format.extension());
            let class = FileClass::of(Path::new(&name), AudioFormat::Mp3);
            if format == AudioFormat::Mp3 {
                assert_eq!(class, FileClass::AlreadyTargetFormat);
            } else {
                assert_eq!(class, FileClass::ConvertibleAudio(format));
            }
        }
    }

    #[test]
    fn test_classify_opaque() {
        assert_eq!(
            FileClass::of(Path::new("cover.jpg"), AudioFormat::Mp3),
            FileClass::Opaque
        );
        assert_eq!(
            FileClass::of(Path::new("x.xyz"), AudioFormat::Mp3),
            FileClass::Opaque
        );
        assert_eq!(
            FileClass::of(Path::new("README"), AudioFormat::Mp3),
            FileClass::Opaque
        );
        assert_eq!(
            FileClass::of(Path::new("trailing."), AudioFormat::Mp3),
            FileClass::Opaque
        );
        assert_eq!(
            FileClass::of(Path::new(".hidden"), AudioFormat::Mp3),
            FileClass::Opaque
        );
    }

    #[test]
    fn test_leading_dot_is_an_extension() {
        assert_eq!(
            FileClass::of(Path::new(".flac"), AudioFormat::Mp3),
            FileClass::ConvertibleAudio(AudioFormat::Flac)
        );
        assert_eq!(
            FileClass::of(Path::new("music/.MP3"), AudioFormat::Mp3),
            FileClass::AlreadyTargetFormat
        );
    }

    #[test]
    fn test_rename_replaces_last_extension() {
        assert_eq!(AudioFormat::Mp3.rename("song.flac"), "song.mp3");
        assert_eq!(AudioFormat::Ogg.rename("a.b.WAV"), "a.b.ogg");
        assert_eq!(AudioFormat::Mp3.rename(".flac"), ".mp3");
    }

    #[test]
    fn test_classify_ignores_case() {
        assert_eq!(
            FileClass::of(Path::new("SONG.FLAC"), AudioFormat::Mp3),
            FileClass::ConvertibleAudio(AudioFormat::Flac)
        );
        assert_eq!(
            FileClass::of(Path::new("song.Mp3"), AudioFormat::Mp3),
            FileClass::AlreadyTargetFormat
        );
    }

    #[test]
    fn test_uses_final_extension_only() {
        assert_eq!(
            FileClass::of(Path::new("live.flac.bak"), AudioFormat::Mp3),
            FileClass::Opaque
        );
        assert!(FileClass::of(Path::new("a.b.wav"), AudioFormat::Mp3).needs_transcode());
    }
}
