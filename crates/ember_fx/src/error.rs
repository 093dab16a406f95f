//! # Effect Error Types
//!
//! Decoding effect parameters never fails. These errors only cover
//! reconstructing a whole system from an identity string.

use thiserror::Error;

/// Errors that can occur when rebuilding an effect from its identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    /// The identity has no `|` between tag and config string.
    #[error("malformed effect identity (no '|' separator): {0:?}")]
    MissingSeparator(String),

    /// The tag does not name a known effect kind.
    #[error("unknown effect tag: {0:?}")]
    UnknownTag(String),
}

/// Result type for effect operations.
pub type FxResult<T> = Result<T, FxError>;
