use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "CODEDUMP_LOG";

/// Default level when `CODEDUMP_LOG` is unset, derived from `-q` and the
/// `-v` count.
pub fn default_level(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }

    match verbosity {
        0 | 1 => LevelFilter::WARN,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the stderr subscriber. Safe to call more than once; later calls
/// are ignored. Colours only when stderr is a terminal.
pub fn init(verbosity: u8, quiet: bool) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level(verbosity, quiet).into())
        .with_env_var(LOG_ENV_VAR)
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(console::colors_enabled_stderr())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0, false), LevelFilter::WARN);
        assert_eq!(default_level(1, false), LevelFilter::WARN);
        assert_eq!(default_level(2, false), LevelFilter::DEBUG);
        assert_eq!(default_level(5, false), LevelFilter::TRACE);
    }

    #[test]
    fn test_quiet_only_logs_errors() {
        assert_eq!(default_level(0, true), LevelFilter::ERROR);
        assert_eq!(default_level(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(0, false);
        init(2, true);
    }
}
