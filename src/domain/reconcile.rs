use std::collections::HashSet;

use error_stack::report;
use serde::Deserialize;
use strum::Display;
use thiserror::Error;

use super::table::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum TableSide {
    Local,
    Remote,
}

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("{side} table has no '{column}' column")]
    MissingIdColumn { side: TableSide, column: String },
}

/// What to do when a table lacks the unique-id column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdPolicy {
    #[default]
    Error,
    /// Read the missing column as all-empty.
    TreatAsAbsent,
}

/// Returns the local rows whose unique id does not appear in `remote`.
///
/// Ids are compared by their string form. Empty remote ids never match anything, so a
/// local row with an empty id is always considered new. Duplicates among the local rows
/// are kept as they are.
pub fn new_rows(
    local: &Table,
    remote: &Table,
    unique_id: &str,
    policy: MissingIdPolicy,
) -> error_stack::Result<Table, ReconcileError> {
    // A table without any columns has no shape to check.
    if !local.is_blank() {
        check_id_column(local, TableSide::Local, unique_id, policy)?;
    }
    if !remote.is_blank() {
        check_id_column(remote, TableSide::Remote, unique_id, policy)?;
    }

    let known_ids = remote
        .rows()
        .iter()
        .map(|row| row.get(unique_id))
        .filter(|cell| !cell.is_empty())
        .map(|cell| cell.as_key().into_owned())
        .collect::<HashSet<_>>();

    tracing::debug!(
        remote_ids = known_ids.len(),
        local_rows = local.len(),
        "comparing unique ids"
    );

    Ok(local.filter_rows(|row| !known_ids.contains(&*row.get(unique_id).as_key())))
}

fn check_id_column(
    table: &Table,
    side: TableSide,
    unique_id: &str,
    policy: MissingIdPolicy,
) -> error_stack::Result<(), ReconcileError> {
    if table.has_column(unique_id) {
        return Ok(());
    }

    match policy {
        MissingIdPolicy::Error => Err(report!(ReconcileError::MissingIdColumn {
            side,
            column: unique_id.to_string(),
        })
        .attach_printable(format!("available columns: {:?}", table.columns()))),
        MissingIdPolicy::TreatAsAbsent => {
            tracing::warn!(%side, column = unique_id, "unique id column missing, reading it as empty");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{cell::Cell, row::Row};

    fn table_of(ids: &[&str]) -> Table {
        ids.iter().fold(Table::new(vec!["UniqueID".to_string()]), |table, id| {
            table.with_row(Row::new().with("UniqueID", *id).with("Label", format!("row {id}").as_str()))
        })
    }

    fn ids(table: &Table) -> Vec<String> {
        table
            .rows()
            .iter()
            .map(|row| row.get("UniqueID").as_key().into_owned())
            .collect()
    }

    #[test]
    fn test_returns_only_unknown_ids() {
        let local = table_of(&["A", "B", "C"]);
        let remote = table_of(&["A", "B"]);

        let result = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap();
        assert_eq!(ids(&result), vec!["C"]);
        assert_eq!(result.rows()[0].get("Label"), &Cell::from("row C"));
    }

    #[test]
    fn test_empty_remote_returns_everything() {
        let local = table_of(&["A", "B", "C"]);
        let remote = Table::new(vec!["UniqueID".to_string()]);

        let result = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap();
        assert_eq!(result, local);
    }

    #[test]
    fn test_blank_remote_is_not_a_shape_error() {
        let local = table_of(&["A"]);

        let result = new_rows(&local, &Table::default(), "UniqueID", MissingIdPolicy::Error);
        assert_eq!(ids(&result.unwrap()), vec!["A"]);
    }

    #[test]
    fn test_blank_local_is_not_a_shape_error() {
        let remote = table_of(&["A", "B"]);

        let result = new_rows(&Table::default(), &remote, "UniqueID", MissingIdPolicy::Error).unwrap();
        assert!(result.is_empty());
        assert!(result.is_blank());
    }

    #[test]
    fn test_preserves_local_order_and_duplicates() {
        let local = table_of(&["D", "A", "C", "D"]);
        let remote = table_of(&["A"]);

        let result = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap();
        assert_eq!(ids(&result), vec!["D", "C", "D"]);
    }

    #[test]
    fn test_compares_numbers_and_text_by_string_form() {
        let local = Table::default()
            .with_row(Row::new().with("UniqueID", "1"))
            .with_row(Row::new().with("UniqueID", "2"));
        let remote = Table::default().with_row(Row::new().with("UniqueID", 1.0));

        let result = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap();
        assert_eq!(ids(&result), vec!["2"]);
    }

    #[test]
    fn test_empty_ids_never_match() {
        let local = table_of(&["", "A"]);
        let remote = table_of(&["", "A"]);

        let result = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap();
        assert_eq!(ids(&result), vec![""]);
    }

    #[test]
    fn test_missing_local_column_errors_by_default() {
        let local = Table::default().with_row(Row::new().with("Name", "x"));
        let remote = table_of(&["A"]);

        let report = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap_err();
        assert!(matches!(
            report.current_context(),
            ReconcileError::MissingIdColumn {
                side: TableSide::Local,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_remote_column_errors_by_default() {
        let local = table_of(&["A"]);
        let remote = Table::default().with_row(Row::new().with("Name", "x"));

        let report = new_rows(&local, &remote, "UniqueID", MissingIdPolicy::Error).unwrap_err();
        assert_eq!(
            report.current_context().to_string(),
            "remote table has no 'UniqueID' column"
        );
    }

    #[test]
    fn test_missing_columns_treated_as_absent() {
        let local = Table::default()
            .with_row(Row::new().with("Name", "x"))
            .with_row(Row::new().with("Name", "y"));
        let remote = table_of(&["A"]);
        let result =
            new_rows(&local, &remote, "UniqueID", MissingIdPolicy::TreatAsAbsent).unwrap();
        assert_eq!(result.len(), 2);

        let local = table_of(&["A", "B"]);
        let remote = Table::default().with_row(Row::new().with("Name", "x"));
        let result =
            new_rows(&local, &remote, "UniqueID", MissingIdPolicy::TreatAsAbsent).unwrap();
        assert_eq!(ids(&result), vec!["A", "B"]);
    }
}
