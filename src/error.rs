//! Error taxonomy shared by every operation in the crate.
//!
//! Operations return `CoreResult<T>` rather than panicking or throwing
//! past their boundary. Failures raised by a collaborator (database,
//! recommendation store) travel through callers unmodified so the
//! original kind survives; only genuinely unexpected failures get
//! wrapped into `Unknown` with their cause attached.

use thiserror::Error;

pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed caller input (non-numeric grind setting, negative
    /// extraction time, out-of-range profile values).
    #[error("validation error: {0}")]
    Validation(String),

    /// No shot exists with the requested id.
    #[error("shot not found: {0}")]
    ShotNotFound(String),

    /// No bean exists with the requested id.
    #[error("bean not found: {0}")]
    BeanNotFound(String),

    /// The shot was found but the bean it references is gone. Kept
    /// distinct from `BeanNotFound` so callers can tell a bad lookup
    /// apart from a dangling reference.
    #[error("shot {shot_id} references missing bean {bean_id}")]
    AssociatedBeanMissing { shot_id: String, bean_id: String },

    /// A required piece of configuration is absent, e.g. no grinder
    /// profile has been set up.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Local persistence failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Anything unexpected, with the original cause attached for
    /// diagnostics.
    #[error("unexpected error: {0}")]
    Unknown(#[from] anyhow::Error),
}
