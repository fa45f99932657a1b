use std::sync::Arc;

use error_stack::ResultExt;
use tracing::instrument;

use crate::adapters::config::sync_config::SyncConfig;
use crate::domain::{reconcile, table::Table};
use crate::ports::routine::{Routine, RoutineError};
use crate::ports::table_repository::{TableRepository, TableRepositoryError};

use super::sync_report::SyncReport;

/// Reads the published table.
#[instrument(skip(repository))]
pub async fn fetch(
    repository: &dyn TableRepository,
) -> error_stack::Result<Table, TableRepositoryError> {
    repository.fetch_table().await
}

/// Reads the latest published table again and republishes it with `new_rows` appended.
///
/// The re-read picks up writes made since the caller diffed, but nothing guards the window
/// between this read and the write that follows.
#[instrument(skip(repository, new_rows), fields(new_rows = new_rows.len()))]
pub async fn merge_and_publish(
    repository: &dyn TableRepository,
    new_rows: Table,
) -> error_stack::Result<Table, TableRepositoryError> {
    let remote = repository.fetch_table().await?;
    publish(repository, remote, new_rows).await
}

/// Replaces the published table with `remote` followed by `new_rows`.
///
/// Room for the merged table is made before anything is cleared. The clear and the write are separate calls. If the write fails the repository is left
/// empty; this is reported, not repaired.
#[instrument(skip_all, fields(remote_rows = remote.len(), new_rows = new_rows.len()))]
pub async fn publish(
    repository: &dyn TableRepository,
    remote: Table,
    new_rows: Table,
) -> error_stack::Result<Table, TableRepositoryError> {
    let merged = remote.concat(new_rows);

    repository.ensure_capacity(&merged).await?;
    repository.clear().await?;

    if let Err(report) = repository.write_table(&merged).await {
        tracing::error!(
            lost_rows = merged.len(),
            "write failed after clear, the published table is now empty: {:?}",
            report
        );
        return Err(report);
    }

    tracing::info!(rows = merged.len(), "published table");
    Ok(merged)
}

/// Appends the local rows missing from the repository, matched by unique id.
pub struct SyncRoutine {
    repository: Arc<dyn TableRepository>,
    local: Table,
    config: SyncConfig,
    dry_run: bool,
}

impl std::fmt::Debug for SyncRoutine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRoutine")
            .field("repository", &"<TableRepository>")
            .field("local_rows", &self.local.len())
            .field("config", &self.config)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl SyncRoutine {
    pub fn new(repository: Arc<dyn TableRepository>, local: Table, config: SyncConfig) -> Self {
        Self {
            repository,
            local,
            config,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[async_trait::async_trait]
impl Routine for SyncRoutine {
    type Output = SyncReport;

    fn name(&self) -> &str {
        "SyncRoutine"
    }

    #[instrument(name = "SyncRoutine::run", skip(self))]
    async fn run(&self) -> error_stack::Result<SyncReport, RoutineError> {
        let remote = fetch(self.repository.as_ref())
            .await
            .change_context(RoutineError::routine_failure("could not fetch remote table"))?;

        let new_rows = reconcile::new_rows(
            &self.local,
            &remote,
            &self.config.unique_id_column,
            self.config.missing_id_column,
        )
        .change_context(RoutineError::routine_failure("could not diff tables"))?;

        tracing::info!(
            remote_rows = remote.len(),
            new_rows = new_rows.len(),
            "found rows missing from remote table"
        );

        let mut report = SyncReport {
            remote_rows: remote.len(),
            new_rows: new_rows.len(),
            published_rows: None,
        };

        if self.dry_run {
            for row in new_rows.rows() {
                tracing::info!(
                    unique_id = %row.get(&self.config.unique_id_column),
                    "would append"
                );
            }
            return Ok(report);
        }

        let published = if self.config.refetch_before_publish {
            merge_and_publish(self.repository.as_ref(), new_rows).await
        } else {
            publish(self.repository.as_ref(), remote, new_rows).await
        }
        .change_context(RoutineError::routine_failure("could not publish merged table"))?;

        report.published_rows = Some(published.len());
        Ok(report)
    }
}
