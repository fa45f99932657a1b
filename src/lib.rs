//! Appends the rows of a local table that a Google Sheets worksheet does not have yet,
//! matching rows by a unique-id column.

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod ports;
pub mod prettyprint;

pub use application::sync_report::SyncReport;
pub use application::sync_routine::{fetch, merge_and_publish, publish, SyncRoutine};
pub use domain::reconcile::{new_rows, MissingIdPolicy};
pub use domain::{cell::Cell, row::Row, table::Table};
