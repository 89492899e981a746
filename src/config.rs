use crate::error::{DumpError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIRECTORY: &str = "zzz";
pub const DEFAULT_DELIMITER: &str = "-------------";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub walk: WalkConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Folder receiving the reports, relative to the working directory.
    pub directory: PathBuf,
    /// Line written after every record.
    pub delimiter: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Log and skip directories that cannot be read instead of aborting.
    pub skip_unreadable_dirs: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DumpError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| DumpError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| DumpError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["codedump.toml", ".codedump.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref output_dir) = cli_args.output_dir {
            self.output.directory = output_dir.clone();
        }

        if cli_args.skip_unreadable_dirs {
            self.walk.skip_unreadable_dirs = true;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.directory.as_os_str().is_empty() {
            return Err(DumpError::Config {
                message: "Output directory must not be empty".to_string(),
            });
        }

        if self.output.delimiter.is_empty() {
            return Err(DumpError::Config {
                message: "Record delimiter must not be empty".to_string(),
            });
        }

        if self.output.delimiter.contains(['\n', '\r']) {
            return Err(DumpError::Config {
                message: "Record delimiter must be a single line".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub output_dir: Option<PathBuf>,
    pub skip_unreadable_dirs: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_skip_unreadable_dirs(mut self, skip: bool) -> Self {
        self.skip_unreadable_dirs = skip;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.output.directory, PathBuf::from("zzz"));
        assert_eq!(config.output.delimiter, "-------------");
        assert!(!config.walk.skip_unreadable_dirs);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.output.delimiter = "---\n---".to_string();
        assert!(config.validate().is_err());

        config.output.delimiter = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.output.directory = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[walk]\nskip_unreadable_dirs = true").unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert!(loaded_config.walk.skip_unreadable_dirs);
        assert_eq!(loaded_config.output.directory, PathBuf::from("zzz"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codedump.toml");
        std::fs::write(&path, "[output]\ndirectory = \"dumps\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.output.directory, PathBuf::from("dumps"));
        assert_eq!(config.output.delimiter, DEFAULT_DELIMITER);
        assert!(!config.walk.skip_unreadable_dirs);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here/codedump.toml");
        assert!(matches!(result, Err(DumpError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_output_dir(Some(PathBuf::from("out")))
            .with_skip_unreadable_dirs(true);

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.output.directory, PathBuf::from("out"));
        assert!(config.walk.skip_unreadable_dirs);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[output]"));
        assert!(sample.contains("[walk]"));
        assert!(sample.contains("zzz"));
    }
}
