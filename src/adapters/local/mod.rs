//! Loading the local side of a sync from disk.

use std::path::Path;

use error_stack::report;
use thiserror::Error;

use crate::domain::table::Table;

pub mod csv_source;
pub mod json_source;

#[derive(Error, Debug)]
pub enum LocalSourceError {
    #[error("Failed to open local file")]
    Open,
    #[error("Failed to parse local file")]
    Parse,
    #[error("Unsupported local file extension: {0}")]
    UnsupportedExtension(String),
}

/// A reader turning a file into a [`Table`].
pub trait LocalSource {
    fn load(&self, path: &Path) -> error_stack::Result<Table, LocalSourceError>;

    fn supports_extension(&self, ext: &str) -> bool;
}

/// Loads `path` with the source matching its extension.
pub fn load_table(path: &Path) -> error_stack::Result<Table, LocalSourceError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    let sources: [&dyn LocalSource; 2] = [&csv_source::CsvSource, &json_source::JsonSource];
    let source = sources
        .into_iter()
        .find(|source| source.supports_extension(ext))
        .ok_or_else(|| report!(LocalSourceError::UnsupportedExtension(ext.to_string())))?;

    let table = source.load(path)?;
    tracing::info!(path = %path.display(), rows = table.len(), "loaded local table");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "UniqueID,Name\nA,first").unwrap();

        let table = load_table(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();

        let report = load_table(file.path()).unwrap_err();
        assert!(matches!(
            report.current_context(),
            LocalSourceError::UnsupportedExtension(ext) if ext == "xlsx"
        ));
    }
}
