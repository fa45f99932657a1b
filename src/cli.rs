use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::adapters::config::app_config::AppConfig;
use crate::adapters::local;
use crate::adapters::sheets::{
    spreadsheet_manager::SpreadsheetManager, worksheet_repository::WorksheetRepository,
};
use crate::application::{sync_report::SyncReport, sync_routine::SyncRoutine};
use crate::ports::routine::Routine;

/// Append local rows missing from a Google Sheets worksheet, matched by unique id
#[derive(Parser, Debug)]
#[command(name = "sheet-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Local table to sync (.csv or .json)
    pub local_file: PathBuf,

    /// Config file, extension optional [default: $CONFIG_PATH or ./Config]
    #[arg(short, long)]
    pub config: Option<String>,

    /// Worksheet to sync with, overriding the config file
    #[arg(short, long)]
    pub worksheet: Option<String>,

    /// Unique id column, overriding the config file
    #[arg(short = 'k', long)]
    pub unique_id: Option<String>,

    /// Only report the rows that would be appended
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid configuration")]
    Config,
    #[error("Could not load local table")]
    LocalTable,
    #[error("Could not open spreadsheet session")]
    Session,
    #[error("Sync failed")]
    Sync,
}

impl Cli {
    /// Applies command line overrides on top of the loaded config.
    pub fn resolve_config(&self) -> error_stack::Result<AppConfig, CliError> {
        let mut config =
            AppConfig::load(self.config.as_deref()).change_context(CliError::Config)?;

        if let Some(worksheet) = &self.worksheet {
            config.sheets.worksheet = worksheet.as_str().into();
        }
        if let Some(unique_id) = &self.unique_id {
            config.sync.unique_id_column = unique_id.clone();
        }
        Ok(config)
    }

    #[instrument(name = "Cli::run")]
    pub async fn run(&self) -> error_stack::Result<SyncReport, CliError> {
        let config = self.resolve_config()?;

        let local = local::load_table(&self.local_file).change_context(CliError::LocalTable)?;

        let spreadsheet_manager = Arc::new(
            SpreadsheetManager::new(config.sheets.clone())
                .await
                .change_context(CliError::Session)?,
        );
        let repository = Arc::new(WorksheetRepository::new(
            spreadsheet_manager,
            config.sheets.worksheet.to_string(),
        ));

        let routine = SyncRoutine::new(repository, local, config.sync).dry_run(self.dry_run);
        let report = routine.run().await.change_context(CliError::Sync)?;

        tracing::info!("✅ {}: {}", routine.name(), report);
        Ok(report)
    }
}
