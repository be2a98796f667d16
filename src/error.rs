//! Failure taxonomy for the transcript player.
//!
//! Every variant is contained where it occurs: transcript failures leave an
//! empty transcript plus an inline status line, player-not-ready calls are
//! skipped, and lookup failures render inside the lookup panel.

use thiserror::Error;

pub type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SyncError {
    /// Transcript or video map could not be fetched or parsed.
    #[error("Transcript data unavailable: {0}")]
    DataUnavailable(String),

    /// The player has not been constructed yet, or was already torn down.
    #[error("Player not ready")]
    PlayerNotReady,

    /// Remote word lookup failed.
    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    /// The local key-value store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),
}
