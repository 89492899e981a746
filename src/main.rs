use clap::Parser;
use codedump::{cli::PROMPT, logging, Cli, CodeDump, DumpError, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();
    logging::init(cli.verbosity_level(), cli.quiet);

    // Handle special commands first
    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let codedump = match CodeDump::from_cli(&cli) {
        Ok(codedump) => codedump,
        Err(e) => {
            print_startup_error(&e);
            return exit_code(&e);
        }
    };

    let path = match resolve_path(&cli, &codedump) {
        Ok(path) => path,
        Err(e) => {
            codedump.handle_error(&e);
            return exit_code(&e);
        }
    };

    if cli.dry_run {
        return match codedump.dry_run(&path) {
            Ok(_) => 0,
            Err(e) => {
                codedump.handle_error(&e);
                exit_code(&e)
            }
        };
    }

    match codedump.dump_directory(&path) {
        Ok(report) => {
            codedump.output_formatter().print_dump_report(&report);
            0
        }
        Err(e) => {
            codedump.handle_error(&e);
            exit_code(&e)
        }
    }
}

/// The positional argument wins; otherwise ask on the terminal.
fn resolve_path(cli: &Cli, codedump: &CodeDump) -> Result<String, DumpError> {
    if let Some(ref path) = cli.path {
        return Ok(path.trim().to_string());
    }

    codedump
        .output_formatter()
        .prompt(PROMPT)
        .map_err(|e| DumpError::Prompt {
            message: e.to_string(),
        })
}

fn exit_code(error: &DumpError) -> i32 {
    match error {
        // An invalid directory is reported, not treated as a failed run.
        DumpError::InvalidDirectory { .. } => 0,
        DumpError::Traversal { .. } => 3,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "codedump.toml".to_string());

    match CodeDump::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  codedump <directory> --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!(
                "Failed to generate configuration file: {}",
                e.user_message()
            );
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &DumpError) {
    let formatter = codedump::OutputFormatter::new(codedump::OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use codedump::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn test_cli(path: Option<&str>) -> Cli {
        Cli {
            path: path.map(str::to_string),
            output_dir: None,
            config: None,
            output_format: OutputFormat::Plain,
            skip_unreadable_dirs: false,
            verbose: 0,
            quiet: true,
            dry_run: false,
            generate_config: false,
        }
    }

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let mut cli = test_cli(None);
        cli.config = Some(config_path.clone());
        cli.generate_config = true;

        assert_eq!(handle_generate_config(&cli), 0);
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[output]"));
    }

    #[test]
    fn test_positional_path_skips_prompt() {
        let cli = test_cli(Some("  ./web/ "));
        let codedump = CodeDump::new(
            codedump::Config::default(),
            codedump::OutputMode::Plain,
            0,
            true,
        );

        assert_eq!(resolve_path(&cli, &codedump).unwrap(), "./web/");
    }

    #[test]
    fn test_exit_codes() {
        let invalid = DumpError::InvalidDirectory {
            path: "x".to_string(),
        };
        assert_eq!(exit_code(&invalid), 0);

        let config = DumpError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(exit_code(&config), 1);

        let walk_error = walkdir::WalkDir::new("/definitely/not/here")
            .into_iter()
            .next()
            .unwrap()
            .unwrap_err();
        let traversal = DumpError::Traversal {
            path: "/definitely/not/here".to_string(),
            source: walk_error,
        };
        assert_eq!(exit_code(&traversal), 3);
    }
}
