use indexmap::IndexSet;

use super::{cell::Cell, row::Row};

/// An ordered set of columns plus the rows using them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from a header line and positional records.
    ///
    /// Blank header cells become `Unnamed: <index>` and repeated names get a `.N` suffix,
    /// so every column name in the result is unique. Records shorter than the header are
    /// padded with [`Cell::Empty`]; extra trailing cells are named as unnamed columns.
    pub fn from_records<H, R>(header: H, records: R) -> Self
    where
        H: IntoIterator<Item = String>,
        R: IntoIterator<Item = Vec<Cell>>,
    {
        let mut columns: IndexSet<String> = IndexSet::new();
        for (index, name) in header.into_iter().enumerate() {
            let base = if name.trim().is_empty() {
                format!("Unnamed: {}", index)
            } else {
                name
            };
            insert_unique(&mut columns, base);
        }

        let mut rows = Vec::new();
        for record in records {
            while columns.len() < record.len() {
                let base = format!("Unnamed: {}", columns.len());
                insert_unique(&mut columns, base);
            }
            let mut cells = record.into_iter();
            let row = columns
                .iter()
                .map(|column| (column.clone(), cells.next().unwrap_or_default()))
                .collect::<Row>();
            rows.push(row);
        }

        Table {
            columns: columns.into_iter().collect(),
            rows,
        }
    }

    pub fn push(&mut self, row: Row) {
        for column in row.columns() {
            if !self.has_column(column) {
                self.columns.push(column.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn with_row(mut self, row: Row) -> Self {
        self.push(row);
        self
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// A table with neither columns nor rows, as read from a blank worksheet.
    pub fn is_blank(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Drops every row whose cells are all empty.
    pub fn without_empty_rows(mut self) -> Self {
        self.rows.retain(|row| !row.is_fully_empty());
        self
    }

    /// Keeps the rows matching `predicate`, in order, under the same column list.
    pub fn filter_rows<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&Row) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|row| predicate(row)).cloned().collect(),
        }
    }

    /// Appends `other` below `self`.
    ///
    /// Columns are `self`'s followed by any columns only `other` has. Rows keep their
    /// relative order and are never deduplicated.
    pub fn concat(mut self, other: Table) -> Self {
        for column in other.columns {
            if !self.has_column(&column) {
                self.columns.push(column);
            }
        }
        self.rows.extend(other.rows);
        self
    }

    /// Positional view used when writing: the header line followed by one line per row.
    pub fn to_records(&self) -> (Vec<String>, Vec<Vec<Cell>>) {
        let records = self
            .rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| row.get(column).clone())
                    .collect()
            })
            .collect();
        (self.columns.clone(), records)
    }
}

/// Adds `base` to `columns`, suffixed with `.N` if that name is already taken.
fn insert_unique(columns: &mut IndexSet<String>, base: String) {
    let mut candidate = base.clone();
    let mut suffix = 1;
    while columns.contains(&candidate) {
        candidate = format!("{}.{}", base, suffix);
        suffix += 1;
    }
    columns.insert(candidate);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(table: &Table) -> Vec<String> {
        table
            .rows()
            .iter()
            .map(|row| row.get("UniqueID").as_key().into_owned())
            .collect()
    }

    #[test]
    fn test_from_records_names_blank_and_duplicate_headers() {
        let header = vec![
            "UniqueID".to_string(),
            String::new(),
            "Name".to_string(),
            "Name".to_string(),
        ];
        let table = Table::from_records(header, Vec::<Vec<Cell>>::new());
        assert_eq!(
            table.columns(),
            &["UniqueID", "Unnamed: 1", "Name", "Name.1"]
        );
    }

    #[test]
    fn test_from_records_pads_short_rows() {
        let table = Table::from_records(
            vec!["UniqueID".to_string(), "Name".to_string()],
            vec![vec![Cell::from("A")]],
        );
        assert_eq!(table.len(), 1);
        assert!(table.rows()[0].has_column("Name"));
        assert_eq!(table.rows()[0].get("Name"), &Cell::Empty);
    }

    #[test]
    fn test_from_records_names_overflowing_cells() {
        let table = Table::from_records(
            vec!["UniqueID".to_string()],
            vec![vec![Cell::from("A"), Cell::from("extra")]],
        );
        assert_eq!(table.columns(), &["UniqueID", "Unnamed: 1"]);
        assert_eq!(table.rows()[0].get("Unnamed: 1"), &Cell::from("extra"));
    }

    #[test]
    fn test_overflow_column_does_not_reuse_header_name() {
        let table = Table::from_records(
            vec!["Unnamed: 1".to_string()],
            vec![vec![Cell::from("a"), Cell::from("b")]],
        );
        assert_eq!(table.columns(), &["Unnamed: 1", "Unnamed: 1.1"]);

        let (_, records) = table.to_records();
        assert_eq!(records, vec![vec![Cell::from("a"), Cell::from("b")]]);
    }

    #[test]
    fn test_without_empty_rows() {
        let table = Table::from_records(
            vec!["UniqueID".to_string(), "Name".to_string()],
            vec![
                vec![Cell::from("A"), Cell::from("x")],
                vec![Cell::Empty, Cell::from("")],
                vec![],
                vec![Cell::Empty, Cell::from("y")],
            ],
        )
        .without_empty_rows();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[1].get("Name"), &Cell::from("y"));
    }

    #[test]
    fn test_concat_preserves_order_and_duplicates() {
        let remote = Table::default()
            .with_row(Row::new().with("UniqueID", "A"))
            .with_row(Row::new().with("UniqueID", "B"));
        let new_rows = Table::default()
            .with_row(Row::new().with("UniqueID", "C"))
            .with_row(Row::new().with("UniqueID", "C"));

        let merged = remote.concat(new_rows);
        assert_eq!(ids(&merged), vec!["A", "B", "C", "C"]);
    }

    #[test]
    fn test_concat_unions_columns() {
        let remote = Table::new(vec!["UniqueID".to_string(), "Name".to_string()]);
        let new_rows = Table::default().with_row(
            Row::new()
                .with("Price", 1.0)
                .with("UniqueID", "C"),
        );

        let merged = remote.concat(new_rows);
        assert_eq!(merged.columns(), &["UniqueID", "Name", "Price"]);

        let (header, records) = merged.to_records();
        assert_eq!(header, vec!["UniqueID", "Name", "Price"]);
        assert_eq!(
            records,
            vec![vec![Cell::from("C"), Cell::Empty, Cell::Number(1.0)]]
        );
    }

    #[test]
    fn test_blank() {
        assert!(Table::default().is_blank());
        assert!(!Table::new(vec!["UniqueID".to_string()]).is_blank());
    }
}
