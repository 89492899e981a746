pub mod file_filter;
pub mod source_scanner;

pub use file_filter::{FileFilter, SOURCE_EXTENSIONS};
pub use source_scanner::{normalize_root, SourceFile, SourceScanner, SourceWalk};
