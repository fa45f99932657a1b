use error_stack::ResultExt;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use tracing::instrument;

use crate::adapters::config::sheets_config::SpreadsheetConfig;

use super::{
    http_client::{HttpClient, HttpsConnector},
    spreadsheet_manager::SpreadsheetManagerError,
};

/// Scopes requested for every call made through the hub.
pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

#[instrument(skip(client))]
pub async fn auth(
    config: &SpreadsheetConfig,
    client: HttpClient,
) -> error_stack::Result<Authenticator<HttpsConnector>, SpreadsheetManagerError> {
    let priv_key_path = config.priv_key.as_ref();
    let secret: oauth2::ServiceAccountKey = oauth2::read_service_account_key(priv_key_path)
        .await
        .change_context(SpreadsheetManagerError::Authentication)
        .attach_printable_lazy(|| {
            format!(
                "could not read service account private key at '{}'",
                priv_key_path
            )
        })?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(SpreadsheetManagerError::Authentication)
        .attach_printable("could not create an authenticator")
}
