use indexmap::IndexMap;

use super::cell::Cell;

/// A record keyed by column name. Columns missing from the map read as [`Cell::Empty`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: IndexMap<String, Cell>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<C: Into<Cell>>(mut self, column: &str, cell: C) -> Self {
        self.insert(column, cell.into());
        self
    }

    pub fn insert(&mut self, column: &str, cell: Cell) {
        self.cells.insert(column.to_string(), cell);
    }

    pub fn get(&self, column: &str) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.cells.get(column).unwrap_or(&EMPTY)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    pub fn is_fully_empty(&self) -> bool {
        self.cells.values().all(Cell::is_empty)
    }
}

impl FromIterator<(String, Cell)> for Row {
    fn from_iter<T: IntoIterator<Item = (String, Cell)>>(iter: T) -> Self {
        Row {
            cells: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_empty() {
        let row = Row::new().with("UniqueID", "A");
        assert_eq!(row.get("UniqueID"), &Cell::Text("A".to_string()));
        assert_eq!(row.get("Name"), &Cell::Empty);
        assert!(!row.has_column("Name"));
    }

    #[test]
    fn test_fully_empty() {
        assert!(Row::new().is_fully_empty());
        assert!(Row::new().with("a", "").with("b", Cell::Empty).is_fully_empty());
        assert!(!Row::new().with("a", "").with("b", 0.0).is_fully_empty());
    }
}
