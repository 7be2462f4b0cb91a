//! Runtime introspection boundary.
//!
//! The closure engine never touches the object universe directly: every
//! question it asks (does a name resolve, what kind of object is this, where
//! was it defined) goes through the [`Runtime`] trait. The remaining types
//! here are the read-only snapshots a compilation runs against: symbol sets,
//! the unit-membership oracle, and the generic-type registry. All of them
//! are computed before a run begins and never mutated during one.

pub mod memory;
pub mod trackers;

mod method;

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::base::{ObjectId, strip_root_qualifier};

pub use memory::MemoryUniverse;
pub use method::{MethodDef, Param, ParamKind};

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Classification of a resolved constant.
///
/// A closed set: the engine dispatches on this, never on open-ended type
/// inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Namespace object without a superclass chain.
    Module,
    /// Namespace object with a superclass chain.
    Class,
    /// Instance of an enum kind; declared by a dedicated mechanism, never
    /// by this engine.
    EnumInstance,
    /// The engine's own type-parameter placeholder kind.
    TypeVariable,
    /// Any other plain value.
    Value,
}

impl ObjectKind {
    /// Modules, classes and type-parameter placeholders all occupy
    /// namespace positions in the constant table.
    pub fn is_namespace(self) -> bool {
        matches!(
            self,
            ObjectKind::Module | ObjectKind::Class | ObjectKind::TypeVariable
        )
    }
}

/// Rendering category for a plain (non-namespace) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueCategory {
    /// Weak-collection kind; rendered with one placeholder type argument.
    WeakCollection,
    /// Dynamic type alias; carries the aliased type's textual form.
    TypeAlias(String),
    /// Internal type-representation kind; never declared.
    InternalTypeRepr,
    /// Ordinary value, ascribed by its class.
    Plain,
}

// ============================================================================
// INTROSPECTION SERVICE
// ============================================================================

/// The runtime introspection service.
///
/// Implementations answer structural questions about a live object universe.
/// All methods are read-only from the engine's perspective; an
/// implementation may be shared across independent pipelines.
pub trait Runtime {
    /// Resolve a fully-qualified name to an object, if bound.
    fn resolve(&self, name: &str) -> Option<ObjectId>;

    /// Classify an object.
    fn kind(&self, object: ObjectId) -> ObjectKind;

    /// The class of an object, when it has one.
    fn class_of(&self, object: ObjectId) -> Option<ObjectId>;

    /// The direct superclass of a class, `None` at the top of the chain.
    fn superclass_of(&self, class: ObjectId) -> Option<ObjectId>;

    /// The name the object itself reports, unvalidated.
    ///
    /// Callers that need a name usable in declarations go through
    /// `Pipeline::name_of`, which re-resolves the name and checks identity.
    fn canonical_name(&self, object: ObjectId) -> Option<String>;

    /// Candidate source files the object's definition was observed in.
    fn definition_files(&self, object: ObjectId) -> Vec<PathBuf>;

    /// Rendering category for a plain value.
    fn value_category(&self, value: ObjectId) -> ValueCategory;

    /// Base kinds recorded as "no explicit superclass": the root object
    /// kind and known deprecation-delegator kinds.
    fn is_implicit_superclass(&self, class: ObjectId) -> bool;

    /// Names of the constants nested directly under a namespace object.
    fn own_constants(&self, object: ObjectId) -> Vec<String>;

    /// Methods the object itself defines (not inherited ones).
    fn own_methods(&self, object: ObjectId) -> Vec<MethodDef>;
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

/// Read-only snapshot of a set of fully-qualified symbol names.
///
/// Membership checks are root-qualifier insensitive.
#[derive(Debug, Clone, Default)]
pub struct SymbolSet {
    names: FxHashSet<String>,
}

impl SymbolSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>) {
        let name = name.into();
        let stripped = strip_root_qualifier(&name);
        if stripped.len() == name.len() {
            self.names.insert(name);
        } else {
            self.names.insert(stripped.to_owned());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(strip_root_qualifier(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SymbolSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Oracle answering whether a source path belongs to the unit under
/// inspection.
pub trait UnitMembership {
    fn contains_path(&self, path: &Path) -> bool;
}

/// A unit rooted at a filesystem prefix.
#[derive(Debug, Clone)]
pub struct PathUnit {
    root: PathBuf,
}

impl PathUnit {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl UnitMembership for PathUnit {
    fn contains_path(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

/// Read-only snapshot mapping generic classes to their type-parameter
/// count, consulted when rendering generic constants with placeholder
/// arguments.
#[derive(Debug, Clone, Default)]
pub struct GenericRegistry {
    arities: FxHashMap<ObjectId, usize>,
}

impl GenericRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, class: ObjectId, arity: usize) {
        self.arities.insert(class, arity);
    }

    pub fn arity_of(&self, class: ObjectId) -> Option<usize> {
        self.arities.get(&class).copied()
    }
}
