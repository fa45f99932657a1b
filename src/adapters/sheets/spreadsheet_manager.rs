use error_stack::{report, Report, ResultExt};
use google_sheets4::Sheets;
use std::{collections::HashMap, fmt::Debug};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;
use crate::domain::sheets::sheet_grid::SheetGrid;

use super::{
    auth::{self, SCOPES},
    http_client::{self, HttpsConnector},
};

/// An authenticated session against one spreadsheet.
///
/// Authentication happens once in [`SpreadsheetManager::new`]; every read and write made
/// through the manager reuses the same hub and token cache.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    pub(super) hub: Sheets<HttpsConnector>,
    pub sheet_grid_cache: RwLock<Option<HashMap<String, SheetGrid>>>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetManagerError {
    #[error("Failed to set up HTTPS transport")]
    Transport,
    #[error("Failed to authenticate against Google Sheets")]
    Authentication,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Failed to fetch spreadsheet")]
    FailedToFetchSpreadsheet,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to clear range")]
    FailedToClearRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
    #[error("Failed to resize worksheet")]
    FailedToResizeWorksheet,
}

impl SpreadsheetManagerError {
    /// Maps an API error onto the error taxonomy, keeping the original as the report's source.
    pub(super) fn from_api(
        error: google_sheets4::Error,
        fallback: SpreadsheetManagerError,
        resource: &str,
    ) -> Report<SpreadsheetManagerError> {
        let context = match status_code(&error) {
            Some(401) | Some(403) => SpreadsheetManagerError::Authentication,
            Some(404) => SpreadsheetManagerError::NotFound(resource.to_string()),
            _ if matches!(error, google_sheets4::Error::MissingToken(_)) => {
                SpreadsheetManagerError::Authentication
            }
            _ => fallback,
        };
        Report::new(error).change_context(context)
    }
}

fn status_code(error: &google_sheets4::Error) -> Option<u64> {
    match error {
        google_sheets4::Error::BadRequest(body) => {
            body.pointer("/error/code").and_then(|code| code.as_u64())
        }
        google_sheets4::Error::Failure(response) => Some(u64::from(response.status().as_u16())),
        _ => None,
    }
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client()
            .change_context(SpreadsheetManagerError::Transport)
            .attach_printable("Could not load native root certificates")?;
        let auth = auth::auth(&config, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager {
            config,
            hub,
            sheet_grid_cache: RwLock::new(None),
        })
    }

    #[instrument]
    async fn fetch_sheet_grids(
        &self,
    ) -> error_stack::Result<HashMap<String, SheetGrid>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .add_scopes(SCOPES)
            .doit()
            .await
            .map_err(|err| {
                SpreadsheetManagerError::from_api(
                    err,
                    SpreadsheetManagerError::FailedToFetchSpreadsheet,
                    &format!("spreadsheet {}", self.config.spreadsheet_id),
                )
            })?;

        let sheets = response
            .1
            .sheets
            .ok_or(report!(SpreadsheetManagerError::FailedToFetchSpreadsheet))
            .attach_printable("Sheets not present in spreadsheet response")?;

        Ok(sheets
            .into_iter()
            .filter_map(|sheet| {
                let properties = sheet.properties?;
                let grid = properties.grid_properties.unwrap_or_default();
                Some((
                    properties.title?,
                    SheetGrid {
                        sheet_id: properties.sheet_id.unwrap_or(0),
                        row_count: dimension(grid.row_count),
                        column_count: dimension(grid.column_count),
                    },
                ))
            })
            .collect())
    }

    /// Checks that the spreadsheet exists and has a worksheet titled `title`, returning its grid.
    #[instrument]
    pub async fn ensure_worksheet(
        &self,
        title: &str,
    ) -> error_stack::Result<SheetGrid, SpreadsheetManagerError> {
        let cached = {
            // -- MUTEX READ --
            let guard = self.sheet_grid_cache.read().await;
            guard.as_ref().and_then(|grids| grids.get(title).copied())
            // -- END MUTEX READ --
        };
        if let Some(grid) = cached {
            return Ok(grid);
        }

        let fetched = self.fetch_sheet_grids().await?;
        let grid = fetched.get(title).copied();

        {
            // -- MUTEX WRITE --
            let mut guard = self.sheet_grid_cache.write().await;
            guard.replace(fetched);
            // -- END MUTEX WRITE --
        }

        grid.ok_or(report!(SpreadsheetManagerError::NotFound(format!(
            "worksheet '{}'",
            title
        ))))
        .attach_printable_lazy(|| {
            format!(
                "Worksheet {} not found in spreadsheet {}",
                title, self.config.spreadsheet_id
            )
        })
    }

    /// Records a worksheet's new dimensions after a successful resize.
    pub(super) async fn remember_grid(&self, title: &str, grid: SheetGrid) {
        // -- MUTEX WRITE --
        let mut guard = self.sheet_grid_cache.write().await;
        guard
            .get_or_insert_with(HashMap::new)
            .insert(title.to_string(), grid);
        // -- END MUTEX WRITE --
    }
}

fn dimension(count: Option<i32>) -> usize {
    count.and_then(|count| usize::try_from(count).ok()).unwrap_or(0)
}
