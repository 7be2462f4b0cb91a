//! Constant and symbol filtering predicates.

use crate::base::{ObjectId, is_lowercase_binding, is_synthetic};
use crate::runtime::{MethodDef, ObjectKind};

use super::Pipeline;

impl Pipeline<'_> {
    /// Standard-environment names are noise unless explicitly requested
    /// through the bootstrap set.
    pub(super) fn skip_symbol(&self, name: &str) -> bool {
        self.symbol_in_payload(name) && !self.env.bootstrap.contains(name)
    }

    /// Rejection predicates for a resolved constant, first match wins.
    pub(super) fn skip_constant(&self, name: &str, object: ObjectId, foreign: bool) -> bool {
        if name.trim().is_empty() {
            return true;
        }
        if is_synthetic(name) {
            return true;
        }
        if is_lowercase_binding(name) {
            return true;
        }
        if self.alias_namespaced(name) {
            return true;
        }
        if self.seen.contains(name) {
            return true;
        }
        // Enum instances are declared by a dedicated mechanism.
        if self.env.runtime.kind(object) == ObjectKind::EnumInstance {
            return true;
        }
        if foreign && self.env.runtime.kind(object) == ObjectKind::TypeVariable {
            return true;
        }
        false
    }

    /// Genuine definitions are dropped when they are type-parameter
    /// placeholders or not attributable to the unit under inspection.
    pub(super) fn skip_definition(&self, object: ObjectId) -> bool {
        self.env.runtime.kind(object) == ObjectKind::TypeVariable
            || !self.defined_in_unit(object, false)
    }

    /// True when `name` belongs to the standard-environment payload set.
    pub fn symbol_in_payload(&self, name: &str) -> bool {
        self.env.payload.contains(name)
    }

    /// Union the runtime's candidate definition files with tracked
    /// definition sites. No candidates at all defaults to membership in
    /// non-strict mode; otherwise at least one file must fall under the
    /// unit's path.
    pub fn defined_in_unit(&self, object: ObjectId, strict: bool) -> bool {
        let mut files = self.env.runtime.definition_files(object);
        files.extend(self.env.definitions.files_for(object));

        if files.is_empty() {
            return !strict;
        }

        files.iter().any(|file| self.env.unit.contains_path(file))
    }

    /// True when a method's observed source location falls inside the unit.
    pub fn method_in_unit(&self, method: &MethodDef) -> bool {
        match &method.source_file {
            Some(file) => self.env.unit.contains_path(file),
            None => false,
        }
    }

    fn alias_namespaced(&self, name: &str) -> bool {
        self.alias_namespace
            .iter()
            .any(|namespace| name.starts_with(namespace.as_str()))
    }
}
