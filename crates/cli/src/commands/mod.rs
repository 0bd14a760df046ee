pub mod invoke;
pub mod manifest;

use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to build vendor clients: {0}")]
    Client(#[from] commerce_apps::client::ClientError),

    #[error(transparent)]
    App(#[from] commerce_apps::AppError),

    #[error("Invalid props JSON: {0}")]
    Props(#[from] serde_json::Error),

    #[error("Invalid page URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid cookie header: {0}")]
    Cookie(String),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
