//! Errors returned by the freeze scope and the accessor registry.
use freezeclock_configuration::validator::SemanticValidationError;
use thiserror::Error;

use crate::accessor::Kind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A clock could not be read, or a freeze scope could not be configured.
    #[error(transparent)]
    Clock(#[from] freezeclock_clock::Error),

    #[error(transparent)]
    InvalidConfiguration(#[from] SemanticValidationError),

    /// Nested freeze scopes are rejected.
    #[error("a freeze scope is already active, exit it before entering another one")]
    ScopeActive,

    #[error("accessor target names can not be empty")]
    InvalidTarget,

    #[error("target `{target}` is bound to a {found} accessor, a {requested} accessor can not be installed there")]
    TargetKindMismatch { target: String, found: Kind, requested: Kind },
}
