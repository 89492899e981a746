use crate::dumper::DumpProgress;
use crate::ui::output::format_duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// The number of files is not known until the walk ends, so the pass
    /// is shown as a spinner with a running count.
    pub fn create_dump_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub fn update_dump_progress(pb: &ProgressBar, progress: &DumpProgress) {
    pb.set_position(progress.records_written as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(current_file.clone()),
        None => pb.set_message("Walking directory..."),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_hidden() {
        let manager = ProgressManager::new(false);
        let spinner = manager.create_dump_spinner("test");
        assert!(spinner.is_hidden());
    }

    #[test]
    fn test_update_dump_progress() {
        let manager = ProgressManager::new(false);
        let spinner = manager.create_dump_spinner("test");

        let mut progress = DumpProgress::new();
        update_dump_progress(&spinner, &progress);
        assert_eq!(spinner.position(), 0);

        progress.update_file("src/App.tsx".to_string(), 42);
        update_dump_progress(&spinner, &progress);
        assert_eq!(spinner.position(), 1);
        assert_eq!(spinner.message(), "src/App.tsx");

        finish_progress_with_summary(&spinner, "done", Duration::from_millis(5));
        assert!(spinner.is_finished());
    }
}
