use crate::config::ConfigError;
use crate::routes::RouteError;
use crate::storage::StorageError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, worker runtime).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A storage error occurred while loading or persisting data.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The configuration file could not be read.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A page needs a route the route table does not define.
    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}
