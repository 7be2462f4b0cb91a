//! Registry of observed constant-definition sites.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::base::ObjectId;

/// Append-only registry of the source files a constant's definition was
/// seen in, keyed by object identity.
///
/// Unioned with the introspection service's own file candidates when
/// deciding unit membership.
#[derive(Debug, Default)]
pub struct DefinitionTracker {
    files: RwLock<FxHashMap<ObjectId, Vec<PathBuf>>>,
}

static GLOBAL: Lazy<DefinitionTracker> = Lazy::new(DefinitionTracker::default);

impl DefinitionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The shared process-wide registry.
    pub fn global() -> &'static DefinitionTracker {
        &GLOBAL
    }

    /// Record that `object` was defined in `file`.
    pub fn register(&self, object: ObjectId, file: impl Into<PathBuf>) {
        self.files.write().entry(object).or_default().push(file.into());
    }

    /// Files `object` was defined in, in registration order.
    pub fn files_for(&self, object: ObjectId) -> Vec<PathBuf> {
        self.files.read().get(&object).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_accumulate_in_order() {
        let tracker = DefinitionTracker::new();
        let object = ObjectId::new(4);

        tracker.register(object, "lib/acme/widget.src");
        tracker.register(object, "lib/acme/widget_ext.src");

        let files = tracker.files_for(object);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0], PathBuf::from("lib/acme/widget.src"));
    }

    #[test]
    fn test_unknown_object_has_no_files() {
        let tracker = DefinitionTracker::new();
        assert!(tracker.files_for(ObjectId::new(42)).is_empty());
    }
}
