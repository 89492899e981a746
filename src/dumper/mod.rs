pub mod output_manager;
pub mod record;

pub use output_manager::{report_name, OutputManager};
pub use record::{read_source, RecordContent, RecordWriter};

use crate::config::{OutputConfig, WalkConfig};
use crate::error::Result;
use crate::scanner::{normalize_root, SourceScanner};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadFailure {
    pub relative_path: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct DumpProgress {
    pub records_written: usize,
    pub bytes_written: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub read_failures: Vec<ReadFailure>,
}

impl DumpProgress {
    pub fn new() -> Self {
        Self {
            records_written: 0,
            bytes_written: 0,
            current_file: None,
            start_time: Instant::now(),
            read_failures: Vec::new(),
        }
    }

    pub fn update_file(&mut self, relative_path: String, bytes: u64) {
        self.records_written += 1;
        self.bytes_written += bytes;
        self.current_file = Some(relative_path);
    }

    pub fn add_failure<S: Into<String>>(&mut self, relative_path: S, message: S) {
        self.read_failures.push(ReadFailure {
            relative_path: relative_path.into(),
            message: message.into(),
        });
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for DumpProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpReport {
    pub root: PathBuf,
    pub report_path: PathBuf,
    pub records_written: usize,
    pub bytes_written: u64,
    pub read_failures: Vec<ReadFailure>,
    pub skipped_directories: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
}

pub struct Dumper {
    output: OutputConfig,
    walk: WalkConfig,
}

impl Dumper {
    pub fn new(output: OutputConfig, walk: WalkConfig) -> Self {
        Self { output, walk }
    }

    /// Performs the single pass over `root_path`. The caller is expected to
    /// have checked that it names an existing directory.
    ///
    /// Unreadable files become inline error markers. A traversal error ends
    /// the pass early, leaving the report partially written.
    pub fn dump(
        &self,
        root_path: &str,
        progress_callback: Option<&dyn Fn(&DumpProgress)>,
    ) -> Result<DumpReport> {
        let started_at = Utc::now();
        let root = normalize_root(root_path);

        let output_manager = OutputManager::new(self.output.directory.clone(), &root);
        output_manager.initialize()?;
        let report_file = output_manager.create_report_file()?;
        let mut writer = RecordWriter::new(report_file, self.output.delimiter.as_str());

        tracing::info!(
            root = %root.display(),
            report = %output_manager.get_report_path().display(),
            "starting dump"
        );

        let scanner = SourceScanner::new(&self.walk);
        let mut walk = scanner.walk(&root);
        let mut progress = DumpProgress::new();

        for source in walk.by_ref() {
            let source = source?;
            let display_path = source.display_path();
            let content = read_source(&source.source_path);

            if let RecordContent::ReadError(ref marker) = content {
                tracing::debug!(path = %source.source_path.display(), "{}", marker);
                progress.add_failure(display_path.clone(), marker.clone());
            } else {
                tracing::debug!(path = %display_path, bytes = content.as_str().len(), "writing record");
            }

            writer.write_record(&source.relative_path, &content)?;
            progress.update_file(display_path, content.as_str().len() as u64);

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        writer.finish()?;

        let report = DumpReport {
            root,
            report_path: output_manager.get_report_path().to_path_buf(),
            records_written: progress.records_written,
            bytes_written: progress.bytes_written,
            read_failures: progress.read_failures.clone(),
            skipped_directories: walk.into_skipped(),
            started_at,
            duration: progress.elapsed(),
        };

        tracing::info!(
            records = report.records_written,
            failures = report.read_failures.len(),
            "dump finished"
        );

        Ok(report)
    }
}
