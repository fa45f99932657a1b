#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the service account key file.
    pub priv_key: Box<str>,
    /// Id of the spreadsheet, as found in its URL.
    pub spreadsheet_id: Box<str>,
    /// Title of the worksheet holding the published table.
    pub worksheet: Box<str>,
    /// Read computed values when `true`, formula text when `false`.
    #[serde(default = "default_evaluate_formulas")]
    pub evaluate_formulas: bool,
}

fn default_evaluate_formulas() -> bool {
    true
}
