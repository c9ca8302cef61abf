//! Domain layer error types
//!
//! All errors that can occur while reconciling, mutating or launching
//! catalog entries.

use thiserror::Error;

/// Failure of a backend gateway call
///
/// The backend reports failures as opaque messages; `operation` names the
/// gateway call that failed so callers can tell them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The backend rejected or failed the call
    #[error("{operation} failed: {message}")]
    Failed {
        operation: &'static str,
        message: String,
    },

    /// The backend did not answer in time
    #[error("{operation} timed out after {after_ms} ms")]
    Timeout {
        operation: &'static str,
        after_ms: u64,
    },
}

impl GatewayError {
    /// Build a `Failed` error from any displayable message
    pub fn failed(operation: &'static str, message: impl ToString) -> Self {
        GatewayError::Failed {
            operation,
            message: message.to_string(),
        }
    }
}

/// Failure reading or writing durable state
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// IO error (wrapped)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot written by a newer build
    #[error("Unsupported snapshot version {found} (supported up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Failure mutating the catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Another entry already points at this executable
    #[error("An app with path '{0}' is already in the catalog")]
    DuplicatePath(String),

    /// The write-through to persistence failed; the mutation was rolled back
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failure of the boot-time reconciliation
#[derive(Error, Debug)]
pub enum SyncError {
    /// Enumeration or an icon fetch failed; nothing was committed
    #[error("Catalog discovery failed: {0}")]
    Gateway(#[from] GatewayError),

    /// The fetched catalog could not be persisted
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// The stored snapshot was written by a newer build; it is left untouched
    #[error("Catalog snapshot version {found} is newer than supported version {supported}")]
    UnsupportedSnapshot { found: u32, supported: u32 },

    /// Reconciliation runs once per session
    #[error("Catalog is already synchronized for this session")]
    AlreadyReady,
}

/// Error surfaced by a launcher session operation
#[derive(Error, Debug)]
pub enum LauncherError {
    /// A backend call failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// No catalog entry with this name
    #[error("App not found: {0}")]
    NotFound(String),

    /// No catalog entry with this id
    #[error("No app with id {0}")]
    UnknownId(u64),

    /// Catalog mutation failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Boot reconciliation failed
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Durable state could not be read or written
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Confirm was called with nothing awaiting confirmation
    #[error("Nothing is awaiting confirmation")]
    NothingPending,
}
