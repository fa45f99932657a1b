use thiserror::Error;

use crate::domain::table::Table;

#[derive(Error, Debug)]
pub enum TableRepositoryError {
    #[error("Failed to fetch table from repository")]
    FetchTableError,
    #[error("Failed to make room for table in repository")]
    CapacityError,
    #[error("Failed to clear table in repository")]
    ClearTableError,
    #[error("Failed to write table to repository")]
    WriteTableError,
}

/// Storage holding the published copy of a table.
#[async_trait::async_trait]
pub trait TableRepository: Send + Sync {
    /// Reads the current content. Rows whose cells are all empty are not returned.
    async fn fetch_table(&self) -> error_stack::Result<Table, TableRepositoryError>;

    /// Grows the storage, if needed, so that `table` fits once written header included.
    /// Never shrinks it and leaves the current content in place.
    async fn ensure_capacity(&self, table: &Table) -> error_stack::Result<(), TableRepositoryError>;

    /// Removes every value, leaving an empty table behind.
    async fn clear(&self) -> error_stack::Result<(), TableRepositoryError>;

    /// Writes `table` as the full content, header first. Expects a cleared repository.
    async fn write_table(&self, table: &Table) -> error_stack::Result<(), TableRepositoryError>;
}
