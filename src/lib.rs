pub mod cli;
pub mod config;
pub mod dumper;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, OutputConfig, WalkConfig};
pub use error::{DumpError, Result, UserFriendlyError};

// Core functionality re-exports
pub use dumper::{DumpProgress, DumpReport, Dumper, OutputManager, ReadFailure, RecordContent};
pub use scanner::{FileFilter, SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for CodeDump functionality
pub struct CodeDump {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl CodeDump {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet && output_mode == OutputMode::Human);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create CodeDump instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Validates `root_path`, then writes its report and prints where it went.
    pub fn dump_directory(&self, root_path: &str) -> Result<DumpReport> {
        validate_directory(root_path)?;

        self.output_formatter
            .start_operation(&format!("Dumping source files from {}", root_path));

        let spinner = self.progress_manager.create_dump_spinner("Walking directory...");
        let progress_callback = {
            let pb = spinner.clone();
            move |progress: &DumpProgress| {
                ui::progress::update_dump_progress(&pb, progress);
            }
        };

        let dumper = Dumper::new(self.config.output.clone(), self.config.walk.clone());
        let result = dumper.dump(root_path, Some(&progress_callback));

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                spinner.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &spinner,
            &format!("Wrote {} records", report.records_written),
            report.duration,
        );

        if report.records_written == 0 {
            self.output_formatter.warning(&format!(
                "No {} files found under {}",
                FileFilter::new().display_extensions(),
                root_path
            ));
        }

        self.output_formatter.print_completion(&report.report_path);
        Ok(report)
    }

    /// Lists what `dump_directory` would write, touching nothing on disk.
    pub fn dry_run(&self, root_path: &str) -> Result<Vec<SourceFile>> {
        validate_directory(root_path)?;

        let root = scanner::normalize_root(root_path);
        let scanner = SourceScanner::new(&self.config.walk);
        let files = scanner.scan(&root)?;

        let output_manager = OutputManager::new(self.config.output.directory.clone(), &root);
        self.output_formatter
            .print_dry_run_plan(&files, output_manager.get_report_path());

        Ok(files)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &DumpError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Checks that `root_path` names an existing directory.
pub fn validate_directory(root_path: &str) -> Result<()> {
    if root_path.is_empty() || !Path::new(root_path).is_dir() {
        return Err(DumpError::InvalidDirectory {
            path: root_path.to_string(),
        });
    }
    Ok(())
}

/// Dumps `root_path` into `zzz/<name>.txt` with the default configuration
/// and reports completion on stdout. The caller validates the directory.
pub fn dump(root_path: &str) -> Result<DumpReport> {
    let config = Config::default();
    let dumper = Dumper::new(config.output, config.walk);
    let report = dumper.dump(root_path, None)?;

    OutputFormatter::new(OutputMode::Human, 0, false).print_completion(&report.report_path);
    Ok(report)
}
