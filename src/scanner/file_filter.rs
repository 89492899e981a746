use std::path::Path;

/// Extensions eligible for a dump, lowercase and without the leading dot.
pub const SOURCE_EXTENSIONS: [&str; 6] = ["css", "jsx", "tsx", "ts", "js", "html"];

#[derive(Debug, Clone, Copy, Default)]
pub struct FileFilter;

impl FileFilter {
    pub fn new() -> Self {
        Self
    }

    /// Case-insensitive extension test against the allow-set.
    pub fn is_source_file(&self, path: &Path) -> bool {
        match path.extension().and_then(|s| s.to_str()) {
            Some(extension) => {
                let ext_lower = extension.to_lowercase();
                SOURCE_EXTENSIONS.contains(&ext_lower.as_str())
            }
            None => false,
        }
    }

    pub fn display_extensions(&self) -> String {
        SOURCE_EXTENSIONS
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
