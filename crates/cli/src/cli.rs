//! Command line surface.

use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use audiomirror_core::{AudioFormat, ConversionRequest};

/// Mirror a directory tree, transcoding audio files with ffmpeg and copying
/// everything else unchanged.
#[derive(Debug, Parser)]
#[command(name = "audiomirror", version, disable_help_flag = true)]
pub struct Cli {
    /// Input directory
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub input: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "PATH", default_value = "./output")]
    pub output: PathBuf,

    /// Target format: .aiff, .flac, .m4a, .mp3, .mp4, .wav or .ogg
    #[arg(short, long, value_name = "FORMAT", default_value = ".mp3")]
    pub format: AudioFormat,

    /// Describe what would be done without touching anything
    #[arg(short, long)]
    pub dry_run: bool,

    /// Process subdirectories too
    #[arg(short, long)]
    pub recurse: bool,

    /// Compare input and output sizes afterwards
    #[arg(short, long)]
    pub compare: bool,

    /// Configuration file (defaults to ./audiomirror.toml when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print help for this tool and for ffmpeg
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub help: bool,
}

impl Cli {
    /// Parses arguments. A help flag wins over any other argument error,
    /// so `-h` always prints help.
    pub fn parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        match Self::try_parse_from(&args) {
            Ok(cli) => Ok(cli),
            Err(_) if args.iter().skip(1).any(|a| a == "-h" || a == "--help") => {
                Self::try_parse_from(["audiomirror", "--help"])
            }
            Err(e) => Err(e),
        }
    }

    /// Builds the top-level conversion request.
    pub fn request(&self) -> ConversionRequest {
        ConversionRequest::new(&self.input, &self.output, self.format)
            .with_recurse(self.recurse)
            .with_dry_run(self.dry_run)
            .with_compare(self.compare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["audiomirror"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("."));
        assert_eq!(cli.output, PathBuf::from("./output"));
        assert_eq!(cli.format, AudioFormat::Mp3);
        assert!(!cli.dry_run && !cli.recurse && !cli.compare && !cli.help);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "audiomirror", "-i", "music", "-o", "out", "-f", "flac", "-d", "-r", "-c",
        ])
        .unwrap();

        let request = cli.request();
        assert_eq!(request.input_root, PathBuf::from("music"));
        assert_eq!(request.output_root, PathBuf::from("out"));
        assert_eq!(request.target_format, AudioFormat::Flac);
        assert!(request.dry_run && request.recurse && request.compare);
    }

    #[test]
    fn test_format_with_dot() {
        let cli = Cli::try_parse_from(["audiomirror", "--format", ".ogg"]).unwrap();
        assert_eq!(cli.format, AudioFormat::Ogg);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = Cli::try_parse_from(["audiomirror", "--format", ".opus"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_help_wins_over_invalid_arguments() {
        let cli = Cli::parse_args(["audiomirror", "-h", "-f", ".opus"]).unwrap();
        assert!(cli.help);
        let cli = Cli::parse_args(["audiomirror", "--bogus", "--help"]).unwrap();
        assert!(cli.help);

        let err = Cli::parse_args(["audiomirror", "-f", ".opus"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_help_is_a_plain_flag() {
        let cli = Cli::try_parse_from(["audiomirror", "-h"]).unwrap();
        assert!(cli.help);
        let cli = Cli::try_parse_from(["audiomirror", "--help", "-r"]).unwrap();
        assert!(cli.help && cli.recurse);
    }
}
