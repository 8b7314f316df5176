use thiserror::Error;

/// Errors emitted while reading or writing sidebar settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("sidebar settings IO failed")]
    Io(#[from] std::io::Error),
    #[error("sidebar settings JSON failed")]
    Json(#[from] serde_json::Error),
}
