//! Testing helpers for freezeclock.
pub mod configuration;
pub mod fixture;
pub mod random;
