//=========================================================================
// Error Types
//=========================================================================
//
// Two error families with different blast radii:
//
//   CabinetError   startup + fatal runtime failures (process exits)
//   DispatchError  handler-local failures (single event discarded)
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::PathBuf;

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::dispatch::Mode;

//=== CabinetError ========================================================

/// Fatal errors raised while bringing the cabinet up, or by an invariant
/// violation that makes continuing unsafe.
#[derive(Error, Debug)]
pub enum CabinetError {
    /// Bad or contradictory configuration (duplicate channel binding,
    /// unreadable input channel, missing key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configuration file exists but is not valid TOML for the schema.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The dispatcher observed a mode it can never legally be in.
    #[error("unreachable mode {0:?} observed by dispatcher")]
    UnreachableMode(Mode),

    /// Window / event loop failure in the keyboard substitute.
    #[error("platform error: {0}")]
    Platform(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CabinetError>;

//=== DispatchError =======================================================

/// Errors produced inside a single dispatch.
///
/// `InvalidEventPayload` is recoverable: the event is dropped and the loop
/// continues. `UnreachableMode` is escalated to [`CabinetError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("invalid event payload: {0}")]
    InvalidEventPayload(String),

    #[error("unreachable mode {0:?}")]
    UnreachableMode(Mode),
}

//=========================================================================
// Unit Tests
//=========================================================================
