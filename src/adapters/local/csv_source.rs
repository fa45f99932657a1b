use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use error_stack::ResultExt;

use crate::domain::{cell::Cell, table::Table};

use super::{LocalSource, LocalSourceError};

/// Comma separated files with a header line. Fields are type-inferred with [`Cell::infer`].
pub struct CsvSource;

impl CsvSource {
    pub fn read<R: Read>(&self, reader: R) -> error_stack::Result<Table, LocalSourceError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .change_context(LocalSourceError::Parse)
            .attach_printable("Failed to read CSV headers")?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut records = Vec::new();
        for (line_num, result) in csv_reader.records().enumerate() {
            // +2 for 1-indexing and header
            let record = result
                .change_context(LocalSourceError::Parse)
                .attach_printable_lazy(|| format!("Failed to read CSV row {}", line_num + 2))?;
            records.push(record.iter().map(Cell::infer).collect::<Vec<_>>());
        }

        Ok(Table::from_records(headers, records))
    }
}

impl LocalSource for CsvSource {
    fn load(&self, path: &Path) -> error_stack::Result<Table, LocalSourceError> {
        let file = File::open(path)
            .change_context(LocalSourceError::Open)
            .attach_printable_lazy(|| format!("Failed to open file: {}", path.display()))?;
        self.read(BufReader::new(file))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext.to_lowercase().as_str(), "csv" | "txt")
    }
}
