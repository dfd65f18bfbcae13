//! The accessor registry: the single seam the current time is read through.
//!
//! Application code reads the time through a named *target*. The default
//! targets are [`DATETIME_TARGET`] and [`TIME_TARGET`], used by the functions
//! at the crate root. A component that wants to be frozen separately can read
//! from its own target:
//!
//! ```rust
//! use freezeclock::accessor;
//!
//! const CLOCK: &str = "my_crate::scheduler::datetime";
//!
//! let now = accessor::datetime_at(CLOCK).utcnow().unwrap();
//! ```
//!
//! A target with nothing installed reads the [`Working`] clock. Installing an
//! accessor returns a [`PatchToken`] remembering what was bound before, and
//! [`restore`] puts it back.
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use freezeclock_clock::clock::{DateTimeSource, EpochSource, Working};
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::Error;

/// Target of the "current date-time" accessor read by [`crate::now_in`] and friends.
pub const DATETIME_TARGET: &str = "freezeclock::datetime";

/// Target of the "current epoch seconds" accessor read by [`crate::time`].
pub const TIME_TARGET: &str = "freezeclock::time";

lazy_static! {
    static ref REGISTRY: RwLock<HashMap<String, Accessor>> = RwLock::new(HashMap::new());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    DateTime,
    Epoch,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::DateTime => f.write_str("date-time"),
            Kind::Epoch => f.write_str("epoch seconds"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Accessor {
    DateTime(Arc<dyn DateTimeSource>),
    Epoch(Arc<dyn EpochSource>),
}

impl Accessor {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Accessor::DateTime(_) => Kind::DateTime,
            Accessor::Epoch(_) => Kind::Epoch,
        }
    }

    #[must_use]
    pub fn dbg_clock_type(&self) -> String {
        match self {
            Accessor::DateTime(source) => source.dbg_clock_type(),
            Accessor::Epoch(source) => source.dbg_clock_type(),
        }
    }

    /// Whether both accessors are the same installed instance.
    fn is(&self, other: &Accessor) -> bool {
        match (self, other) {
            (Accessor::DateTime(a), Accessor::DateTime(b)) => Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>(),
            (Accessor::Epoch(a), Accessor::Epoch(b)) => Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>(),
            _ => false,
        }
    }
}

/// Proof of an installation. Pass it to [`restore`] to undo it.
#[must_use = "the accessor stays installed until the token is restored"]
#[derive(Debug)]
pub struct PatchToken {
    target: String,
    installed: Accessor,
    previous: Option<Accessor>,
}

impl PatchToken {
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }
}

/// The kind a target must hold, if it is one of the default targets.
fn default_kind(target: &str) -> Option<Kind> {
    match target {
        DATETIME_TARGET => Some(Kind::DateTime),
        TIME_TARGET => Some(Kind::Epoch),
        _ => None,
    }
}

/// Binds `accessor` to `target`, replacing what was bound there.
///
/// # Errors
///
/// Will return `Error::InvalidTarget` if `target` is empty, and
/// `Error::TargetKindMismatch` if `target` is bound to the other kind of
/// accessor.
pub fn install(target: &str, accessor: Accessor) -> Result<PatchToken, Error> {
    if target.trim().is_empty() {
        return Err(Error::InvalidTarget);
    }

    let mut registry = REGISTRY.write();

    let found = registry.get(target).map(Accessor::kind).or_else(|| default_kind(target));
    if let Some(found) = found {
        if found != accessor.kind() {
            return Err(Error::TargetKindMismatch {
                target: target.to_owned(),
                found,
                requested: accessor.kind(),
            });
        }
    }

    debug!(binding = target, clock = %accessor.dbg_clock_type(), "installing {} accessor", accessor.kind());
    let previous = registry.insert(target.to_owned(), accessor.clone());

    Ok(PatchToken {
        target: target.to_owned(),
        installed: accessor,
        previous,
    })
}

/// Puts back what was bound to the token's target before it was installed.
pub fn restore(token: PatchToken) {
    let PatchToken {
        target,
        installed,
        previous,
    } = token;

    let mut registry = REGISTRY.write();

    debug!(binding = %target, "restoring {} accessor", installed.kind());
    let replaced = match previous {
        Some(previous) => registry.insert(target.clone(), previous),
        None => registry.remove(&target),
    };

    if !replaced.is_some_and(|replaced| replaced.is(&installed)) {
        warn!(binding = %target, "the restored target was not bound to the accessor its token installed");
    }
}

/// The date-time accessor bound to `target`, the working clock if none is.
#[must_use]
pub fn datetime_at(target: &str) -> Arc<dyn DateTimeSource> {
    match REGISTRY.read().get(target) {
        Some(Accessor::DateTime(source)) => source.clone(),
        _ => Arc::new(Working),
    }
}

/// The epoch seconds accessor bound to `target`, the working clock if none is.
#[must_use]
pub fn time_at(target: &str) -> Arc<dyn EpochSource> {
    match REGISTRY.read().get(target) {
        Some(Accessor::Epoch(source)) => source.clone(),
        _ => Arc::new(Working),
    }
}

/// Whether an accessor is installed at `target`.
#[must_use]
pub fn is_patched(target: &str) -> bool {
    REGISTRY.read().contains_key(target)
}
