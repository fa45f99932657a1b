use std::sync::Arc;

use error_stack::ResultExt;
use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::{sheets::a1_notation::A1Notation, table::Table};
use crate::ports::table_repository::{TableRepository, TableRepositoryError};

use super::{
    spreadsheet_manager::SpreadsheetManager, spreadsheet_read::SpreadsheetRead,
    spreadsheet_write::SpreadsheetWrite, table_grid::TableGrid,
    value_range_factory::ValueRangeFactory,
};

/// One worksheet of a spreadsheet, read and written as a whole table.
#[derive(Debug)]
pub struct WorksheetRepository {
    pub spreadsheet_manager: Arc<SpreadsheetManager>,
    pub worksheet: String,
}

impl WorksheetRepository {
    pub fn new(spreadsheet_manager: Arc<SpreadsheetManager>, worksheet: impl Into<String>) -> Self {
        Self {
            spreadsheet_manager,
            worksheet: worksheet.into(),
        }
    }
}

#[async_trait::async_trait]
impl TableRepository for WorksheetRepository {
    #[instrument(skip(self))]
    async fn fetch_table(&self) -> error_stack::Result<Table, TableRepositoryError> {
        let table = self
            .spreadsheet_manager
            .read_worksheet(&self.worksheet)
            .await
            .change_context(TableRepositoryError::FetchTableError)?
            .into_table();

        tracing::debug!(
            worksheet = %self.worksheet,
            rows = table.len(),
            columns = table.columns().len(),
            "fetched worksheet"
        );
        Ok(table)
    }

    #[instrument(skip(self, table))]
    async fn ensure_capacity(&self, table: &Table) -> error_stack::Result<(), TableRepositoryError> {
        let grid = self
            .spreadsheet_manager
            .ensure_worksheet(&self.worksheet)
            .await
            .change_context(TableRepositoryError::CapacityError)?;

        // Header row plus data rows.
        let Some(grown) = grid.grown_to(table.len() + 1, table.columns().len()) else {
            return Ok(());
        };

        tracing::info!(
            worksheet = %self.worksheet,
            rows = grown.row_count,
            columns = grown.column_count,
            "growing worksheet grid"
        );
        self.spreadsheet_manager
            .resize_grid(&self.worksheet, grown)
            .await
            .change_context(TableRepositoryError::CapacityError)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> error_stack::Result<(), TableRepositoryError> {
        self.spreadsheet_manager
            .ensure_worksheet(&self.worksheet)
            .await
            .change_context(TableRepositoryError::ClearTableError)?;

        self.spreadsheet_manager
            .clear_range(&A1Notation::whole_sheet(&self.worksheet))
            .await
            .change_context(TableRepositoryError::ClearTableError)
    }

    #[instrument(skip(self, table))]
    async fn write_table(&self, table: &Table) -> error_stack::Result<(), TableRepositoryError> {
        if table.is_blank() {
            return Ok(());
        }

        self.spreadsheet_manager
            .write_range(
                &A1Notation::sheet_origin(&self.worksheet),
                ValueRange::from_table(table),
            )
            .await
            .change_context(TableRepositoryError::WriteTableError)
            .attach_printable_lazy(|| {
                format!(
                    "Failed to write {} rows to worksheet {}",
                    table.len(),
                    self.worksheet
                )
            })
    }
}
