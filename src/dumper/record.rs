use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// What goes between a record's path line and its delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordContent {
    Text(String),
    ReadError(String),
}

impl RecordContent {
    pub fn as_str(&self) -> &str {
        match self {
            RecordContent::Text(text) => text,
            RecordContent::ReadError(marker) => marker,
        }
    }
}

pub fn error_marker(error: &dyn Display) -> String {
    format!("<<Error reading file: {}>>", error)
}

/// Reads a file as UTF-8 text with line endings normalized to `\n`.
/// Any failure is folded into an inline error marker.
pub fn read_source(path: &Path) -> RecordContent {
    match fs::read_to_string(path) {
        Ok(text) => RecordContent::Text(normalize_newlines(text)),
        Err(e) => RecordContent::ReadError(error_marker(&e)),
    }
}

pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }

    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub struct RecordWriter<W: Write> {
    writer: W,
    delimiter: String,
}

impl<W: Write> RecordWriter<W> {
    pub fn new<S: Into<String>>(writer: W, delimiter: S) -> Self {
        Self {
            writer,
            delimiter: delimiter.into(),
        }
    }

    /// Writes `<relative path>\n<content>\n<delimiter>\n`.
    pub fn write_record(&mut self, relative_path: &Path, content: &RecordContent) -> io::Result<()> {
        writeln!(self.writer, "{}", relative_path.display())?;
        writeln!(self.writer, "{}", content.as_str())?;
        writeln!(self.writer, "{}", self.delimiter)
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
