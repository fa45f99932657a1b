use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use error_stack::{bail, report, ResultExt};
use serde_json::Value;

use crate::domain::{cell::Cell, row::Row, table::Table};

use super::{LocalSource, LocalSourceError};

/// A JSON array of flat objects, one object per row. Keys become columns in order of
/// first appearance.
pub struct JsonSource;

impl JsonSource {
    pub fn read<R: Read>(&self, reader: R) -> error_stack::Result<Table, LocalSourceError> {
        let value: Value = serde_json::from_reader(reader)
            .change_context(LocalSourceError::Parse)
            .attach_printable("Failed to parse JSON file")?;

        let items = match value {
            Value::Array(items) => items,
            Value::Object(_) => vec![value],
            _ => bail!(LocalSourceError::Parse),
        };

        let mut table = Table::default();
        for (index, item) in items.into_iter().enumerate() {
            let Value::Object(object) = item else {
                return Err(report!(LocalSourceError::Parse)
                    .attach_printable(format!("item {} is not an object", index)));
            };
            let row = object
                .iter()
                .map(|(key, value)| (key.clone(), Cell::from(value)))
                .collect::<Row>();
            table.push(row);
        }
        Ok(table)
    }
}

impl LocalSource for JsonSource {
    fn load(&self, path: &Path) -> error_stack::Result<Table, LocalSourceError> {
        let file = File::open(path)
            .change_context(LocalSourceError::Open)
            .attach_printable_lazy(|| format!("Failed to open JSON file: {}", path.display()))?;
        self.read(BufReader::new(file))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        ext.eq_ignore_ascii_case("json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_objects() {
        let data = r#"[
            {"UniqueID": "A", "Price": 1},
            {"UniqueID": "B", "Note": "late column", "Price": null}
        ]"#;

        let table = JsonSource.read(data.as_bytes()).unwrap();
        assert_eq!(table.columns(), &["UniqueID", "Price", "Note"]);
        assert_eq!(table.rows()[0].get("Price").as_key(), "1");
        assert_eq!(table.rows()[0].get("Note"), &Cell::Empty);
        assert_eq!(table.rows()[1].get("Price"), &Cell::Empty);
    }

    #[test]
    fn test_rejects_non_objects() {
        let report = JsonSource.read("[1, 2]".as_bytes()).unwrap_err();
        assert!(matches!(report.current_context(), LocalSourceError::Parse));

        let report = JsonSource.read("\"text\"".as_bytes()).unwrap_err();
        assert!(matches!(report.current_context(), LocalSourceError::Parse));
    }
}
