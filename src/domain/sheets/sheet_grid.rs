/// Identity and dimensions of one worksheet's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetGrid {
    pub sheet_id: i32,
    pub row_count: usize,
    pub column_count: usize,
}

impl SheetGrid {
    /// The grid needed to hold `rows` by `columns` cells, or `None` if this one already does.
    ///
    /// Dimensions never shrink.
    pub fn grown_to(&self, rows: usize, columns: usize) -> Option<SheetGrid> {
        if rows <= self.row_count && columns <= self.column_count {
            return None;
        }

        Some(SheetGrid {
            sheet_id: self.sheet_id,
            row_count: self.row_count.max(rows),
            column_count: self.column_count.max(columns),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: usize, columns: usize) -> SheetGrid {
        SheetGrid {
            sheet_id: 7,
            row_count: rows,
            column_count: columns,
        }
    }

    #[test]
    fn test_fitting_table_needs_no_resize() {
        assert_eq!(grid(1000, 26).grown_to(1000, 26), None);
        assert_eq!(grid(1000, 26).grown_to(0, 0), None);
    }

    #[test]
    fn test_grows_only_the_short_dimension() {
        assert_eq!(grid(1000, 26).grown_to(1500, 3), Some(grid(1500, 26)));
        assert_eq!(grid(1000, 26).grown_to(10, 30), Some(grid(1000, 30)));
        assert_eq!(grid(10, 2).grown_to(11, 3), Some(grid(11, 3)));
    }
}
