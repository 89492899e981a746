use crate::dumper::DumpReport;
use crate::error::{DumpError, UserFriendlyError};
use crate::scanner::{FileFilter, SourceFile};
use console::{style, Emoji, StyledObject, Term};
use serde_json::json;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static DONE: Emoji = Emoji("✅ ", "✓ ");
static FAILED: Emoji = Emoji("❌ ", "✗ ");
static CAUTION: Emoji = Emoji("⚠️  ", "! ");
static HINT: Emoji = Emoji("ℹ️  ", "i ");
static START: Emoji = Emoji("🚀 ", "> ");
static TITLE: Emoji = Emoji("✨ ", "* ");

#[derive(Debug, Clone, Copy, PartialEq)]
enum Level {
    Success,
    Error,
    Warning,
    Suggestion,
    Start,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Suggestion => "suggestion",
            Level::Start => "operation_start",
        }
    }

    fn plain_prefix(self) -> &'static str {
        match self {
            Level::Success => "SUCCESS",
            Level::Error => "ERROR",
            Level::Warning => "WARNING",
            Level::Suggestion => "SUGGESTION",
            Level::Start => "STARTING",
        }
    }

    fn emoji(self) -> &'static Emoji<'static, 'static> {
        match self {
            Level::Success => &DONE,
            Level::Error => &FAILED,
            Level::Warning => &CAUTION,
            Level::Suggestion => &HINT,
            Level::Start => &START,
        }
    }

    fn paint(self, text: &str) -> StyledObject<&str> {
        let styled = style(text);
        match self {
            Level::Success => styled.green().bold(),
            Level::Error => styled.red().bold(),
            Level::Warning => styled.yellow().bold(),
            Level::Suggestion => styled.cyan(),
            Level::Start => styled.bold(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Level::Error | Level::Suggestion)
    }
}

/// Console front end. Errors and suggestions go to stderr, the rest to stdout.
pub struct OutputFormatter {
    term: Term,
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let term = Term::stdout();
        let use_colors =
            mode == OutputMode::Human && !quiet && term.features().colors_supported();

        Self {
            term,
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Shown from `-v` up.
    pub fn warning(&self, message: &str) {
        if self.verbose_level >= 1 {
            self.emit(Level::Warning, message);
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if !self.quiet {
            self.emit(Level::Start, operation);
        }
    }

    /// Asks for a single line; the answer is trimmed.
    pub fn prompt(&self, question: &str) -> std::io::Result<String> {
        self.term.write_str(question)?;
        self.term.flush()?;

        // Term::read_line gives up when stdin is not a tty.
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        Ok(answer.trim().to_string())
    }

    pub fn print_user_friendly_error(&self, error: &DumpError) {
        self.error(&error.user_message());

        if self.quiet {
            return;
        }

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    self.emit(Level::Suggestion, &format!("Suggestion: {}", suggestion))
                }
                _ => self.emit(Level::Suggestion, &suggestion),
            }
        }
    }

    /// Completion line, printed even in quiet mode.
    pub fn print_completion(&self, report_path: &Path) {
        self.success(&format!("All code dumped to: {}", report_path.display()));
    }

    pub fn print_dump_report(&self, report: &DumpReport) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ if self.quiet => {}
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn print_dry_run_plan(&self, files: &[SourceFile], report_path: &Path) {
        let extensions = FileFilter::new().display_extensions();

        if self.mode == OutputMode::Json {
            let paths: Vec<String> = files.iter().map(|f| f.display_path()).collect();
            println!(
                "{}",
                json!({
                    "type": "dry_run",
                    "report_path": report_path.display().to_string(),
                    "extensions": extensions,
                    "files": paths,
                })
            );
            return;
        }

        println!("Report: {}", report_path.display());
        println!("Extensions: {}", extensions);
        println!("Records that would be written: {}", files.len());
        for file in files {
            println!("  {} ({})", file.display_path(), format_bytes(file.size));
        }
    }

    fn emit(&self, level: Level, message: &str) {
        let line = match self.mode {
            OutputMode::Json => json!({
                "type": "message",
                "level": level.tag(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })
            .to_string(),
            OutputMode::Plain => format!("{}: {}", level.plain_prefix(), message),
            OutputMode::Human if self.use_colors => {
                format!("{}{}", level.emoji(), level.paint(message))
            }
            OutputMode::Human => format!("{}{}", level.emoji().1, message),
        };

        if level.to_stderr() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn print_human_report(&self, report: &DumpReport) {
        let highlight = |value: String| {
            if self.use_colors {
                style(value).cyan().bold().to_string()
            } else {
                value
            }
        };

        println!();
        if self.use_colors {
            println!("{} {}", TITLE, style("Dump Report").bold().cyan());
        } else {
            println!("=== Dump Report ===");
        }
        println!();

        println!("  Root:            {}", report.root.display());
        println!("  Records written: {}", highlight(report.records_written.to_string()));
        println!("  Content size:    {}", highlight(format_bytes(report.bytes_written)));
        println!("  Time taken:      {}", highlight(format_duration(report.duration)));
        self.print_problems(report, "  Unreadable:      ", "  Skipped:         ", "    - ");

        let rule = "─".repeat(60);
        if self.use_colors {
            println!("{}", style(rule).dim());
        } else {
            println!("{}", rule);
        }
    }

    fn print_plain_report(&self, report: &DumpReport) {
        println!("REPORT: {}", report.report_path.display());
        println!("Records: {}", report.records_written);
        println!("Size: {} bytes", report.bytes_written);
        println!("Duration: {:?}", report.duration);
        self.print_problems(report, "Unreadable: ", "Skipped: ", "  ");
    }

    /// Counts always; read failures are itemised from `-v` up. Skipped
    /// directories were already logged while walking.
    fn print_problems(&self, report: &DumpReport, unreadable: &str, skipped: &str, item: &str) {
        if !report.read_failures.is_empty() {
            println!("{}{}", unreadable, report.read_failures.len());
            if self.verbose_level >= 1 {
                for failure in &report.read_failures {
                    println!("{}{}: {}", item, failure.relative_path, failure.message);
                }
            }
        }

        if !report.skipped_directories.is_empty() {
            println!("{}{}", skipped, report.skipped_directories.len());
        }
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(formatter.quiet);
        assert!(!formatter.use_colors);
    }

    #[test]
    fn test_non_human_modes_never_color() {
        assert!(!OutputFormatter::new(OutputMode::Json, 0, false).use_colors);
        assert!(!OutputFormatter::new(OutputMode::Plain, 0, false).use_colors);
    }

    #[test]
    fn test_levels() {
        assert!(Level::Error.to_stderr());
        assert!(Level::Suggestion.to_stderr());
        assert!(!Level::Success.to_stderr());
        assert!(!Level::Warning.to_stderr());

        assert_eq!(Level::Success.plain_prefix(), "SUCCESS");
        assert_eq!(Level::Start.tag(), "operation_start");
        assert_eq!(Level::Error.emoji().1, "✗ ");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
    }
}
