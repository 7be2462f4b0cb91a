//! Registry of capability-composition operations.

use std::fmt;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::ObjectId;

/// How a module was composed into a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum MixinKind {
    Include,
    Extend,
    Prepend,
}

impl fmt::Display for MixinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixinKind::Include => write!(f, "include"),
            MixinKind::Extend => write!(f, "extend"),
            MixinKind::Prepend => write!(f, "prepend"),
        }
    }
}

/// One composition applied to a target, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinRecord {
    pub composed: ObjectId,
    pub kind: MixinKind,
    pub location: Option<PathBuf>,
}

/// Reverse entry: a target that composed a given mixin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixinSite {
    pub target: ObjectId,
    pub kind: MixinKind,
    pub location: Option<PathBuf>,
}

/// Append-only registry of composition operations.
///
/// Keyed by object identity, never by name. A fresh instance can back an
/// isolated universe; [`MixinTracker::global`] is the shared process-wide
/// registry instrumentation hooks write into.
#[derive(Debug, Default)]
pub struct MixinTracker {
    by_target: RwLock<FxHashMap<ObjectId, Vec<MixinRecord>>>,
    by_mixin: RwLock<FxHashMap<ObjectId, Vec<MixinSite>>>,
}

static GLOBAL: Lazy<MixinTracker> = Lazy::new(MixinTracker::default);

impl MixinTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static MixinTracker {
        &GLOBAL
    }

    /// Record that `composed` was mixed into `target`.
    pub fn register(
        &self,
        target: ObjectId,
        composed: ObjectId,
        kind: MixinKind,
        location: Option<PathBuf>,
    ) {
        self.by_target
            .write()
            .entry(target)
            .or_default()
            .push(MixinRecord {
                composed,
                kind,
                location: location.clone(),
            });
        self.by_mixin
            .write()
            .entry(composed)
            .or_default()
            .push(MixinSite {
                target,
                kind,
                location,
            });
    }

    /// Compositions applied to `target`, in registration order.
    pub fn mixins_of(&self, target: ObjectId) -> Vec<MixinRecord> {
        self.by_target
            .read()
            .get(&target)
            .cloned()
            .unwrap_or_default()
    }

    /// Targets that composed `mixin`, in registration order.
    pub fn constants_with_mixin(&self, mixin: ObjectId) -> Vec<MixinSite> {
        self.by_mixin
            .read()
            .get(&mixin)
            .cloned()
            .unwrap_or_default()
    }
}
