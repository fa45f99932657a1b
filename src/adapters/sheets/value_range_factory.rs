use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::table::Table;

pub trait ValueRangeFactory {
    fn from_table(table: &Table) -> Self;
}

impl ValueRangeFactory for ValueRange {
    /// Header line first, then one line per row, each line spanning every column.
    fn from_table(table: &Table) -> Self {
        let (header, records) = table.to_records();

        let mut values = Vec::with_capacity(records.len() + 1);
        values.push(header.into_iter().map(Value::String).collect::<Vec<_>>());
        values.extend(
            records
                .iter()
                .map(|record| record.iter().map(Value::from).collect::<Vec<_>>()),
        );

        Self {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{cell::Cell, row::Row};

    #[test]
    fn test_from_table() {
        let table = Table::new(vec!["UniqueID".to_string(), "Price".to_string()])
            .with_row(Row::new().with("UniqueID", "A").with("Price", 1.5))
            .with_row(Row::new().with("UniqueID", "B").with("Price", Cell::Empty));

        let value_range = ValueRange::from_table(&table);
        assert_eq!(
            value_range.major_dimension,
            Some("ROWS".to_string()),
            "Major dimension should be ROWS"
        );
        assert_eq!(value_range.range, None, "Range should be None");
        assert_eq!(
            value_range.values,
            Some(vec![
                vec![Value::from("UniqueID"), Value::from("Price")],
                vec![Value::from("A"), Value::from(1.5)],
                vec![Value::from("B"), Value::from("")],
            ])
        );
    }

    #[test]
    fn test_from_table_without_rows_writes_header() {
        let table = Table::new(vec!["UniqueID".to_string()]);

        let value_range = ValueRange::from_table(&table);
        assert_eq!(value_range.values, Some(vec![vec![Value::from("UniqueID")]]));
    }
}
