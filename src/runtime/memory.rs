//! In-memory reference implementation of the introspection service.
//!
//! Callers assemble a synthetic object universe (classes, modules, values,
//! bindings) and hand it to a pipeline as its [`Runtime`]. The test suite is
//! built on this; it also serves as the executable description of what each
//! trait method is expected to answer.

use std::path::PathBuf;

use rustc_hash::FxHashMap;

use crate::base::{ObjectId, SCOPE_SEPARATOR, strip_root_qualifier};

use super::{MethodDef, ObjectKind, Runtime, ValueCategory};

#[derive(Debug, Clone)]
struct ObjectData {
    kind: ObjectKind,
    name: Option<String>,
    class_of: Option<ObjectId>,
    superclass: Option<ObjectId>,
    files: Vec<PathBuf>,
    members: Vec<String>,
    methods: Vec<MethodDef>,
    value_category: ValueCategory,
    implicit_superclass: bool,
}

impl ObjectData {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            name: None,
            class_of: None,
            superclass: None,
            files: Vec::new(),
            members: Vec::new(),
            methods: Vec::new(),
            value_category: ValueCategory::Plain,
            implicit_superclass: false,
        }
    }
}

/// A synthetic object universe.
///
/// Objects live in an arena addressed by [`ObjectId`]; the constant table
/// maps fully-qualified names to objects. Several names may bind the same
/// object (aliases), and an object may exist with no binding at all
/// (anonymous).
#[derive(Debug, Default)]
pub struct MemoryUniverse {
    objects: Vec<ObjectData>,
    bindings: FxHashMap<String, ObjectId>,
}

impl MemoryUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, data: ObjectData) -> ObjectId {
        let id = ObjectId::new(self.objects.len() as u64);
        self.objects.push(data);
        id
    }

    fn data(&self, object: ObjectId) -> Option<&ObjectData> {
        self.objects.get(object.raw() as usize)
    }

    fn data_mut(&mut self, object: ObjectId) -> Option<&mut ObjectData> {
        self.objects.get_mut(object.raw() as usize)
    }

    /// Define a module with canonical name `name`, bound under that name.
    pub fn define_module(&mut self, name: &str) -> ObjectId {
        let mut data = ObjectData::new(ObjectKind::Module);
        data.name = Some(name.to_owned());
        let id = self.alloc(data);
        self.bind(name, id);
        id
    }

    /// Define a class with canonical name `name`, bound under that name.
    pub fn define_class(&mut self, name: &str, superclass: Option<ObjectId>) -> ObjectId {
        let mut data = ObjectData::new(ObjectKind::Class);
        data.name = Some(name.to_owned());
        data.superclass = superclass;
        let id = self.alloc(data);
        self.bind(name, id);
        id
    }

    /// Define a class with no canonical name and no binding.
    pub fn define_anonymous_class(&mut self, superclass: Option<ObjectId>) -> ObjectId {
        let mut data = ObjectData::new(ObjectKind::Class);
        data.superclass = superclass;
        self.alloc(data)
    }

    /// Define a module with no canonical name and no binding.
    pub fn define_anonymous_module(&mut self) -> ObjectId {
        self.alloc(ObjectData::new(ObjectKind::Module))
    }

    /// Define a type-parameter placeholder object.
    pub fn define_type_variable(&mut self, name: Option<&str>) -> ObjectId {
        let mut data = ObjectData::new(ObjectKind::TypeVariable);
        data.name = name.map(str::to_owned);
        let id = self.alloc(data);
        if let Some(name) = name {
            self.bind(name, id);
        }
        id
    }

    /// Define a plain value of the given class.
    pub fn define_value(&mut self, class: ObjectId) -> ObjectId {
        let mut data = ObjectData::new(ObjectKind::Value);
        data.class_of = Some(class);
        self.alloc(data)
    }

    /// Define an enum-instance value of the given class.
    pub fn define_enum_instance(&mut self, class: ObjectId) -> ObjectId {
        let mut data = ObjectData::new(ObjectKind::EnumInstance);
        data.class_of = Some(class);
        self.alloc(data)
    }

    /// Bind `name` to `object` in the constant table, replacing any
    /// previous binding (reassignment).
    pub fn bind(&mut self, name: &str, object: ObjectId) {
        self.bindings
            .insert(strip_root_qualifier(name).to_owned(), object);
    }

    /// Remove a binding, if present.
    pub fn unbind(&mut self, name: &str) {
        self.bindings.remove(strip_root_qualifier(name));
    }

    /// Override the name an object reports for itself.
    pub fn set_canonical_name(&mut self, object: ObjectId, name: Option<&str>) {
        if let Some(data) = self.data_mut(object) {
            data.name = name.map(str::to_owned);
        }
    }

    /// Override the rendering category of a value.
    pub fn set_value_category(&mut self, value: ObjectId, category: ValueCategory) {
        if let Some(data) = self.data_mut(value) {
            data.value_category = category;
        }
    }

    /// Reassign a class's direct superclass.
    pub fn set_superclass(&mut self, class: ObjectId, superclass: Option<ObjectId>) {
        if let Some(data) = self.data_mut(class) {
            data.superclass = superclass;
        }
    }

    /// Mark a class as an implicit superclass (root object kind or
    /// deprecation delegator).
    pub fn mark_implicit_superclass(&mut self, class: ObjectId) {
        if let Some(data) = self.data_mut(class) {
            data.implicit_superclass = true;
        }
    }

    /// Record a candidate definition file for an object.
    pub fn add_file(&mut self, object: ObjectId, file: impl Into<PathBuf>) {
        if let Some(data) = self.data_mut(object) {
            data.files.push(file.into());
        }
    }

    /// Add a method to an object.
    pub fn add_method(&mut self, object: ObjectId, method: MethodDef) {
        if let Some(data) = self.data_mut(object) {
            data.methods.push(method);
        }
    }

    /// Nest `child` under `owner` as member `member_name`.
    ///
    /// The member is listed among the owner's own constants; when the owner
    /// has a canonical name, the qualified name is also bound in the
    /// constant table.
    pub fn add_member(&mut self, owner: ObjectId, member_name: &str, child: ObjectId) {
        let owner_name = self.data(owner).and_then(|d| d.name.clone());
        if let Some(data) = self.data_mut(owner) {
            data.members.push(member_name.to_owned());
        }
        if let Some(owner_name) = owner_name {
            let qualified = format!("{owner_name}{SCOPE_SEPARATOR}{member_name}");
            self.bind(&qualified, child);
        }
    }
}

impl Runtime for MemoryUniverse {
    fn resolve(&self, name: &str) -> Option<ObjectId> {
        self.bindings.get(strip_root_qualifier(name)).copied()
    }

    fn kind(&self, object: ObjectId) -> ObjectKind {
        self.data(object).map_or(ObjectKind::Value, |d| d.kind)
    }

    fn class_of(&self, object: ObjectId) -> Option<ObjectId> {
        self.data(object).and_then(|d| d.class_of)
    }

    fn superclass_of(&self, class: ObjectId) -> Option<ObjectId> {
        self.data(class).and_then(|d| d.superclass)
    }

    fn canonical_name(&self, object: ObjectId) -> Option<String> {
        self.data(object).and_then(|d| d.name.clone())
    }

    fn definition_files(&self, object: ObjectId) -> Vec<PathBuf> {
        self.data(object).map(|d| d.files.clone()).unwrap_or_default()
    }

    fn value_category(&self, value: ObjectId) -> ValueCategory {
        self.data(value)
            .map_or(ValueCategory::Plain, |d| d.value_category.clone())
    }

    fn is_implicit_superclass(&self, class: ObjectId) -> bool {
        self.data(class).is_some_and(|d| d.implicit_superclass)
    }

    fn own_constants(&self, object: ObjectId) -> Vec<String> {
        self.data(object)
            .map(|d| d.members.clone())
            .unwrap_or_default()
    }

    fn own_methods(&self, object: ObjectId) -> Vec<MethodDef> {
        self.data(object)
            .map(|d| d.methods.clone())
            .unwrap_or_default()
    }
}
