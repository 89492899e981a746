use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid directory path: {path}")]
    InvalidDirectory { path: String },

    #[error("Failed to walk directory tree at {path}")]
    Traversal {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Could not read directory path from terminal: {message}")]
    Prompt { message: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for DumpError {
    fn user_message(&self) -> String {
        match self {
            DumpError::InvalidDirectory { .. } => {
                "Invalid directory path. Please check and try again.".to_string()
            }
            DumpError::Traversal { path, source } => {
                format!("Failed to walk directory {}: {}", path, source)
            }
            DumpError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            DumpError::Prompt { message } => {
                format!("Could not read the directory path: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            DumpError::InvalidDirectory { .. } => Some(
                "Pass a path to an existing directory, relative to the current working directory or absolute.".to_string()
            ),
            DumpError::Traversal { .. } => Some(
                "Check the permissions of the directories under the root, or rerun with --skip-unreadable-dirs to skip them.".to_string()
            ),
            DumpError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            DumpError::Io(_) => Some(
                "Ensure the output directory is writable from the current working directory.".to_string()
            ),
            DumpError::Prompt { .. } => Some(
                "Pass the directory as an argument instead: codedump <PATH>".to_string()
            ),
        }
    }
}

impl From<toml::de::Error> for DumpError {
    fn from(error: toml::de::Error) -> Self {
        DumpError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DumpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = DumpError::InvalidDirectory {
            path: "missing".to_string(),
        };
        assert_eq!(
            error.user_message(),
            "Invalid directory path. Please check and try again."
        );
        assert!(error.suggestion().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = DumpError::from(io_error);
        assert!(matches!(error, DumpError::Io(_)));
        assert!(error.user_message().contains("denied"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = DumpError::from(toml_error);
        assert!(matches!(error, DumpError::Config { .. }));
    }
}
