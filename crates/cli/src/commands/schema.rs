//! Backend schema probe.
//!
//! # Environment Variables
//!
//! - `BACKEND_URL` (or `SUPABASE_URL`)
//! - `BACKEND_ANON_KEY` (or `SUPABASE_ANON_KEY`)

use invite_core::backend::confirmations::EXTENDED_COLUMNS;

/// Report whether `confirmations` carries the extended columns.
///
/// # Errors
///
/// Returns an error if the backend is unreachable, or if columns are missing
/// so scripts can fail on it.
pub async fn check() -> Result<(), Box<dyn std::error::Error>> {
    let gateway = super::gateway()?;

    if gateway.confirmations().has_extended_columns().await? {
        tracing::info!("confirmations has every column");
        Ok(())
    } else {
        tracing::warn!(
            columns = %EXTENDED_COLUMNS.join(", "),
            "confirmations is missing extended columns; RSVPs are stored with name and attendance only"
        );
        Err("confirmations is missing extended columns".into())
    }
}
