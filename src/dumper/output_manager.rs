use crate::error::{DumpError, Result};
use std::fs;
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};

const FALLBACK_REPORT_NAME: &str = "root";
const REPORT_BUFFER_SIZE: usize = 64 * 1024;

pub struct OutputManager {
    output_directory: PathBuf,
    report_path: PathBuf,
}

impl OutputManager {
    pub fn new(output_directory: PathBuf, root: &Path) -> Self {
        let report_path = output_directory.join(format!("{}.txt", report_name(root)));

        Self {
            output_directory,
            report_path,
        }
    }

    /// Creates the output directory; an existing one is reused as is.
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(DumpError::Io)?;
        Ok(())
    }

    /// Creates the report, truncating a previous one with the same name.
    pub fn create_report_file(&self) -> Result<BufWriter<fs::File>> {
        let file = fs::File::create(&self.report_path).map_err(DumpError::Io)?;
        Ok(BufWriter::with_capacity(REPORT_BUFFER_SIZE, file))
    }

    pub fn get_report_path(&self) -> &Path {
        &self.report_path
    }
}

/// The report is named after the root's base name. Roots without one
/// (`.`, `..`, `/`) fall back to the canonical directory name, so `.` gives
/// `<cwd name>.txt` rather than `..txt`.
pub fn report_name(root: &Path) -> String {
    if let Some(Component::Normal(name)) = root.components().next_back() {
        return name.to_string_lossy().into_owned();
    }

    root.canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| FALLBACK_REPORT_NAME.to_string())
}
