use google_sheets4::api::ValueRange;
use tracing::instrument;

use crate::domain::sheets::a1_notation::A1Notation;

use super::{
    auth::SCOPES,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

/// Cell values are returned as computed by the spreadsheet.
pub const EVALUATED_VALUES: &str = "UNFORMATTED_VALUE";
/// Formula cells are returned as their source text.
pub const FORMULAS: &str = "FORMULA";

pub trait SpreadsheetRead {
    fn read_range(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<Output = error_stack::Result<ValueRange, SpreadsheetManagerError>>
           + Send;
    fn read_worksheet(
        &self,
        title: &str,
    ) -> impl std::future::Future<Output = error_stack::Result<ValueRange, SpreadsheetManagerError>>
           + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        let render_option = if self.config.evaluate_formulas {
            EVALUATED_VALUES
        } else {
            FORMULAS
        };

        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .value_render_option(render_option)
            .date_time_render_option("FORMATTED_STRING")
            .major_dimension("ROWS")
            .add_scopes(SCOPES)
            .doit()
            .await
            .map_err(|err| {
                SpreadsheetManagerError::from_api(
                    err,
                    SpreadsheetManagerError::FailedToFetchRange,
                    &format!("range {}", range),
                )
            })?;

        Ok(response.1)
    }

    #[instrument]
    async fn read_worksheet(
        &self,
        title: &str,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        self.ensure_worksheet(title).await?;
        self.read_range(&A1Notation::whole_sheet(title)).await
    }
}
