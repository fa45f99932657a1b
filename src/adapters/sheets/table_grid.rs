use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::{cell::Cell, table::Table};

/// Reads a row-major grid of API values as a [`Table`], first line being the header.
pub trait TableGrid {
    fn into_table(self) -> Table;
}

impl TableGrid for Vec<Vec<Value>> {
    fn into_table(self) -> Table {
        let mut lines = self.into_iter();
        let header = match lines.next() {
            Some(header) => header
                .iter()
                .map(|value| Cell::from(value).as_key().into_owned())
                .collect::<Vec<_>>(),
            None => return Table::default(),
        };

        let records = lines.map(|line| line.iter().map(Cell::from).collect::<Vec<_>>());
        Table::from_records(header, records).without_empty_rows()
    }
}

impl TableGrid for ValueRange {
    fn into_table(self) -> Table {
        self.values.unwrap_or_default().into_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid(value: Value) -> Vec<Vec<Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_grid_is_blank_table() {
        assert!(Vec::<Vec<Value>>::new().into_table().is_blank());
        assert!(ValueRange::default().into_table().is_blank());
    }

    #[test]
    fn test_header_only() {
        let table = grid(json!([["UniqueID", "Name"]])).into_table();
        assert_eq!(table.columns(), &["UniqueID", "Name"]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_drops_fully_empty_rows() {
        let table = grid(json!([
            ["UniqueID", "Name", "Price"],
            ["A", "first", 1],
            [],
            ["", "", ""],
            ["B"],
            [null, "orphan"]
        ]))
        .into_table();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[0].get("Price"), &Cell::Number(1.0));
        assert_eq!(table.rows()[1].get("UniqueID"), &Cell::from("B"));
        assert_eq!(table.rows()[1].get("Name"), &Cell::Empty);
        assert_eq!(table.rows()[2].get("Name"), &Cell::from("orphan"));
    }

    #[test]
    fn test_numeric_header_becomes_text() {
        let table = grid(json!([["UniqueID", 2024]])).into_table();
        assert_eq!(table.columns(), &["UniqueID", "2024"]);
    }
}
