use crate::config::WalkConfig;
use crate::error::{DumpError, Result};
use crate::scanner::file_filter::FileFilter;
use std::cmp::Ordering;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub extension: String,
    pub size: u64,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        let extension = source_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self {
            source_path,
            relative_path,
            extension,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

/// Strips trailing path separators. The filesystem root keeps one separator.
pub fn normalize_root(root_path: &str) -> PathBuf {
    let trimmed = root_path.trim_end_matches(['/', '\\']);

    if trimmed.is_empty() && !root_path.is_empty() {
        PathBuf::from(&root_path[..1])
    } else {
        PathBuf::from(trimmed)
    }
}

pub struct SourceScanner {
    filter: FileFilter,
    skip_unreadable_dirs: bool,
}

impl SourceScanner {
    pub fn new(config: &WalkConfig) -> Self {
        Self {
            filter: FileFilter::new(),
            skip_unreadable_dirs: config.skip_unreadable_dirs,
        }
    }

    /// Lazily walks `root` depth-first, yielding matching files. Within a
    /// directory files come before subdirectories, each group by name.
    pub fn walk<P: AsRef<Path>>(&self, root: P) -> SourceWalk {
        let root = root.as_ref().to_path_buf();

        let inner = WalkDir::new(&root)
            .follow_links(false)
            .sort_by(compare_entries)
            .into_iter();

        SourceWalk {
            inner,
            root,
            filter: self.filter,
            skip_unreadable_dirs: self.skip_unreadable_dirs,
            skipped: Vec::new(),
        }
    }

    pub fn scan<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        self.walk(root).collect()
    }
}

fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}

pub struct SourceWalk {
    inner: walkdir::IntoIter,
    root: PathBuf,
    filter: FileFilter,
    skip_unreadable_dirs: bool,
    skipped: Vec<String>,
}

impl SourceWalk {
    /// Paths left out because they could not be read while walking.
    pub fn into_skipped(self) -> Vec<String> {
        self.skipped
    }

    fn process_entry(&self, entry: &DirEntry) -> Result<Option<SourceFile>> {
        let path = entry.path();

        // Symlinked directories are never entered. Any other link, dangling
        // ones included, is listed as a file and read through.
        let is_file = entry.file_type().is_file()
            || (entry.file_type().is_symlink() && !path.is_dir());

        if !is_file {
            return Ok(None);
        }

        if !self.filter.is_source_file(path) {
            tracing::trace!(path = %path.display(), "skipping non-source file");
            return Ok(None);
        }

        let relative_path = relative_path(path, &self.root)?;
        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(Some(SourceFile::new(path.to_path_buf(), relative_path, size)))
    }
}

impl Iterator for SourceWalk {
    type Item = Result<SourceFile>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .unwrap_or(self.root.as_path())
                        .display()
                        .to_string();

                    if self.skip_unreadable_dirs && err.depth() > 0 {
                        tracing::warn!(path = %path, error = %err, "skipping unreadable entry");
                        self.skipped.push(path);
                        continue;
                    }

                    return Some(Err(DumpError::Traversal { path, source: err }));
                }
            };

            match self.process_entry(&entry) {
                Ok(Some(source_file)) => return Some(Ok(source_file)),
                Ok(None) => continue,
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

pub fn relative_path(file_path: &Path, root_path: &Path) -> Result<PathBuf> {
    let relative = file_path
        .strip_prefix(root_path)
        .map_err(|_| DumpError::InvalidDirectory {
            path: format!(
                "Cannot calculate relative path for {} from root {}",
                file_path.display(),
                root_path.display()
            ),
        })?;

    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(DumpError::InvalidDirectory {
            path: format!("Path escapes the root directory: {}", relative.display()),
        });
    }

    Ok(relative.to_path_buf())
}
