use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const PROMPT: &str = "Enter the relative path of the directory: ";

#[derive(Parser, Debug)]
#[command(name = "codedump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concatenate the web-frontend sources of a directory into one text file")]
#[command(
    long_about = "CodeDump walks a directory and writes every .css, .jsx, .tsx, .ts, .js \
                  and .html file it finds into zzz/<directory name>.txt, each preceded \
                  by its relative path and followed by a delimiter line."
)]
#[command(after_help = "EXAMPLES:\n  \
    codedump ./my-app\n  \
    codedump ./my-app --output-dir dumps --verbose\n  \
    codedump ./my-app --output-format json\n  \
    codedump            (prompts for the directory)")]
pub struct Cli {
    /// Directory to dump; prompted for when omitted
    pub path: Option<String>,

    /// Folder receiving the report (default: zzz)
    #[arg(short, long, env = "CODEDUMP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for console messages
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Skip directories that cannot be read instead of aborting
    #[arg(long)]
    pub skip_unreadable_dirs: bool,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be written without writing it)
    #[arg(long, help = "List the files that would be dumped without writing the report")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_output_dir(self.output_dir.clone())
            .with_skip_unreadable_dirs(self.skip_unreadable_dirs)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_path() {
        let cli = Cli::try_parse_from(["codedump", "./web/"]).unwrap();
        assert_eq!(cli.path.as_deref(), Some("./web/"));
        assert!(!cli.dry_run);
        assert!(matches!(cli.output_format, OutputFormat::Human));
    }

    #[test]
    fn test_path_is_optional() {
        let cli = Cli::try_parse_from(["codedump"]).unwrap();
        assert!(cli.path.is_none());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["codedump", "-q", "-v", "."]).is_err());
    }

    #[test]
    fn test_overrides_from_flags() {
        let cli = Cli::try_parse_from([
            "codedump",
            ".",
            "--output-dir",
            "dumps",
            "--skip-unreadable-dirs",
            "-vv",
        ])
        .unwrap();

        let overrides = cli.create_cli_overrides();
        assert_eq!(overrides.output_dir, Some(PathBuf::from("dumps")));
        assert!(overrides.skip_unreadable_dirs);
        assert_eq!(cli.verbosity_level(), 2);
    }

    #[test]
    fn test_output_format_values() {
        let cli = Cli::try_parse_from(["codedump", ".", "--output-format", "json"]).unwrap();
        assert!(matches!(cli.output_format, OutputFormat::Json));

        assert!(Cli::try_parse_from(["codedump", ".", "--output-format", "xml"]).is_err());
    }
}
