use std::fmt::Formatter;

/// Outcome of one sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Rows found in the worksheet when diffing.
    pub remote_rows: usize,
    pub new_rows: usize,
    /// Rows in the worksheet after publishing; `None` on a dry run.
    pub published_rows: Option<usize>,
}

impl SyncReport {
    pub fn dry_run(&self) -> bool {
        self.published_rows.is_none()
    }
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.published_rows {
            Some(published) => write!(
                f,
                "appended {} new rows to {} existing, worksheet now holds {} rows",
                self.new_rows, self.remote_rows, published
            ),
            None => write!(
                f,
                "dry run: {} new rows would be appended to {} existing",
                self.new_rows, self.remote_rows
            ),
        }
    }
}
