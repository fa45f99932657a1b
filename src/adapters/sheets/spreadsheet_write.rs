use google_sheets4::{
    api::{
        BatchUpdateSpreadsheetRequest, ClearValuesRequest, GridProperties, Request,
        SheetProperties, UpdateSheetPropertiesRequest, ValueRange,
    },
    FieldMask,
};
use tracing::instrument;

use crate::domain::sheets::{a1_notation::A1Notation, sheet_grid::SheetGrid};

use super::{
    auth::SCOPES,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};

pub trait SpreadsheetWrite {
    fn clear_range(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;

    fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;

    /// Sets the row and column count of the worksheet titled `title` to those of `grid`.
    fn resize_grid(
        &self,
        title: &str,
        grid: SheetGrid,
    ) -> impl std::future::Future<Output = error_stack::Result<(), SpreadsheetManagerError>> + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument]
    async fn clear_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_clear(
                ClearValuesRequest::default(),
                &self.config.spreadsheet_id,
                range.as_ref(),
            )
            .add_scopes(SCOPES)
            .doit()
            .await
            .map(|_| ())
            .map_err(|err| {
                SpreadsheetManagerError::from_api(
                    err,
                    SpreadsheetManagerError::FailedToClearRange,
                    &format!("range {}", range),
                )
            })
    }

    #[instrument(skip(value_range))]
    async fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range.as_ref())
            .value_input_option("USER_ENTERED")
            .add_scopes(SCOPES)
            .doit()
            .await
            .map(|_| ())
            .map_err(|err| {
                SpreadsheetManagerError::from_api(
                    err,
                    SpreadsheetManagerError::FailedToWriteRange,
                    &format!("range {}", range),
                )
            })
    }

    #[instrument]
    async fn resize_grid(
        &self,
        title: &str,
        grid: SheetGrid,
    ) -> error_stack::Result<(), SpreadsheetManagerError> {
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                update_sheet_properties: Some(UpdateSheetPropertiesRequest {
                    properties: Some(SheetProperties {
                        sheet_id: Some(grid.sheet_id),
                        grid_properties: Some(GridProperties {
                            row_count: Some(i32::try_from(grid.row_count).unwrap_or(i32::MAX)),
                            column_count: Some(
                                i32::try_from(grid.column_count).unwrap_or(i32::MAX),
                            ),
                            ..Default::default()
                        }),
                        ..Default::default()
                    }),
                    fields: Some(FieldMask::new(&[
                        "gridProperties.rowCount",
                        "gridProperties.columnCount",
                    ])),
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, &self.config.spreadsheet_id)
            .add_scopes(SCOPES)
            .doit()
            .await
            .map_err(|err| {
                SpreadsheetManagerError::from_api(
                    err,
                    SpreadsheetManagerError::FailedToResizeWorksheet,
                    &format!("worksheet '{}'", title),
                )
            })?;

        self.remember_grid(title, grid).await;
        Ok(())
    }
}
