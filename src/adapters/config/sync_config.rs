use crate::domain::reconcile::MissingIdPolicy;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct SyncConfig {
    #[serde(default = "default_unique_id_column")]
    pub unique_id_column: String,
    #[serde(default)]
    pub missing_id_column: MissingIdPolicy,
    /// Read the worksheet again right before publishing instead of reusing the diffed copy.
    #[serde(default = "default_refetch_before_publish")]
    pub refetch_before_publish: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            unique_id_column: default_unique_id_column(),
            missing_id_column: MissingIdPolicy::default(),
            refetch_before_publish: default_refetch_before_publish(),
        }
    }
}

fn default_unique_id_column() -> String {
    "UniqueID".to_string()
}

fn default_refetch_before_publish() -> bool {
    true
}
