//! Trait to validate semantic errors.
//!
//! Errors could involve more than one configuration option. Some configuration
//! combinations can be incompatible.
use thiserror::Error;

use crate::v1::freeze::Freeze;

/// Errors that can occur validating the configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SemanticValidationError {
    #[error("The fold must be 0 (earlier instant) or 1 (later instant), got {0}.")]
    FoldOutOfRange(u8),

    #[error("Accessor target names can not be empty.")]
    EmptyTarget,

    #[error("The accessor target `{0}` can not receive both the date-time and the epoch seconds accessors.")]
    TargetInBothLists(String),
}

pub trait Validator {
    /// # Errors
    ///
    /// Will return an error if the configuration is invalid.
    fn validate(&self) -> Result<(), SemanticValidationError>;
}

impl Validator for Freeze {
    fn validate(&self) -> Result<(), SemanticValidationError> {
        if self.fold > 1 {
            return Err(SemanticValidationError::FoldOutOfRange(self.fold));
        }

        let mut targets = self.extra_datetime_targets.iter().chain(&self.extra_time_targets);
        if targets.any(|target| target.trim().is_empty()) {
            return Err(SemanticValidationError::EmptyTarget);
        }

        if let Some(shared) = self
            .extra_datetime_targets
            .iter()
            .find(|target| self.extra_time_targets.contains(*target))
        {
            return Err(SemanticValidationError::TargetInBothLists(shared.clone()));
        }

        Ok(())
    }
}
