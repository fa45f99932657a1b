use config::{Config, Source};
use error_stack::{report, ResultExt};
use serde::Deserialize;
use serde_path_to_error::{Deserializer as PathDeserializer, Segment, Track};
use thiserror::Error;

use super::{sheets_config::SpreadsheetConfig, sync_config::SyncConfig};

pub const DEFAULT_CONFIG_PATH: &str = "Config";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file could not be read")]
    Unreadable,
    #[error("Config file has an invalid shape")]
    Invalid,
}

impl AppConfig {
    /// Loads the config file at `path`, falling back to `CONFIG_PATH` and then to `Config`.
    /// The extension may be omitted, as with [`config::File::with_name`].
    pub fn load(path: Option<&str>) -> error_stack::Result<Self, ConfigError> {
        let config_path = path
            .map(str::to_string)
            .or_else(|| std::env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

        Self::from_source(config::File::with_name(&config_path), &config_path)
    }

    pub fn from_source<S>(source: S, origin: &str) -> error_stack::Result<Self, ConfigError>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            .add_source(source)
            .build()
            .change_context(ConfigError::Unreadable)
            .attach_printable_lazy(|| format!("config file: {}", origin))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context(ConfigError::Invalid)
            .attach_printable_lazy(|| format!("config file: {}", origin))?;

        use serde::de::IntoDeserializer;
        let mut track = Track::new();
        let path_de = PathDeserializer::new(value.into_deserializer(), &mut track);
        AppConfig::deserialize(path_de).map_err(|e| {
            let path_str = track
                .path()
                .iter()
                .map(|seg| match seg {
                    Segment::Seq { index } => format!("[{}]", index),
                    Segment::Map { key } => format!(".{}", key),
                    Segment::Enum { variant } => format!("::{}", variant),
                    Segment::Unknown => String::from("<?>"),
                })
                .collect::<String>();
            report!(ConfigError::Invalid)
                .attach_printable(format!("config file: {}", origin))
                .attach_printable(format!("{}", e))
                .attach_printable(format!("field path: {}", path_str.trim_start_matches('.')))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reconcile::MissingIdPolicy;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> error_stack::Result<AppConfig, ConfigError> {
        AppConfig::from_source(File::from_str(toml, FileFormat::Toml), "inline")
    }

    #[test]
    fn test_defaults() {
        let config = parse(
            r#"
            [sheets]
            priv_key = "key.json"
            spreadsheet_id = "abc"
            worksheet = "Sheet1"
            "#,
        )
        .unwrap();

        assert_eq!(&*config.sheets.worksheet, "Sheet1");
        assert!(config.sheets.evaluate_formulas);
        assert_eq!(config.sync.unique_id_column, "UniqueID");
        assert_eq!(config.sync.missing_id_column, MissingIdPolicy::Error);
        assert!(config.sync.refetch_before_publish);
    }

    #[test]
    fn test_sync_section() {
        let config = parse(
            r#"
            [sheets]
            priv_key = "key.json"
            spreadsheet_id = "abc"
            worksheet = "Sheet1"
            evaluate_formulas = false

            [sync]
            unique_id_column = "Id"
            missing_id_column = "treat_as_absent"
            refetch_before_publish = false
            "#,
        )
        .unwrap();

        assert!(!config.sheets.evaluate_formulas);
        assert_eq!(config.sync.unique_id_column, "Id");
        assert_eq!(config.sync.missing_id_column, MissingIdPolicy::TreatAsAbsent);
        assert!(!config.sync.refetch_before_publish);
    }

    #[test]
    fn test_missing_field_reports_invalid() {
        let report = parse(
            r#"
            [sheets]
            priv_key = "key.json"
            "#,
        )
        .unwrap_err();

        assert!(matches!(report.current_context(), ConfigError::Invalid));
    }
}
