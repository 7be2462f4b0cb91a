//! The shape of a method as observed on a runtime object.

use std::path::PathBuf;

/// Parameter kinds a runtime method can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ParamKind {
    Required,
    Optional,
    Rest,
    Keyword,
    OptionalKeyword,
    KeywordRest,
    Block,
}

/// A single `(kind, name)` parameter pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Param {
    pub kind: ParamKind,
    pub name: String,
}

impl Param {
    pub fn new(kind: ParamKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub fn required(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Required, name)
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Optional, name)
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Rest, name)
    }

    pub fn keyword(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Keyword, name)
    }

    pub fn optional_keyword(name: impl Into<String>) -> Self {
        Self::new(ParamKind::OptionalKeyword, name)
    }

    pub fn keyword_rest(name: impl Into<String>) -> Self {
        Self::new(ParamKind::KeywordRest, name)
    }

    pub fn block(name: impl Into<String>) -> Self {
        Self::new(ParamKind::Block, name)
    }
}

/// One method as observed on a runtime object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    /// Defined on the object itself rather than on its instances.
    pub singleton: bool,
    pub params: Vec<Param>,
    /// Source location of the definition, when the runtime knows it.
    pub source_file: Option<PathBuf>,
}

impl MethodDef {
    /// An instance method.
    pub fn instance(
        name: impl Into<String>,
        params: Vec<Param>,
        source_file: Option<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            singleton: false,
            params,
            source_file,
        }
    }

    /// A method on the object itself.
    pub fn singleton(
        name: impl Into<String>,
        params: Vec<Param>,
        source_file: Option<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            singleton: true,
            params,
            source_file,
        }
    }
}
