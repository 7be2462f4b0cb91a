//! Declaration node types.

use std::fmt;

use crate::runtime::trackers::MixinKind;
use crate::runtime::{Param, ParamKind};

/// Unique identifier for a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a NodeId from an arena index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the arena
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The literal value-expression a constant node binds its name to.
///
/// A closed set: every way the engine can render a constant is a variant
/// here, so downstream consumers can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ValueExpr {
    /// Reference to another named constant (an alias target).
    Ref(String),
    /// Placeholder for an alias whose target class has no name.
    AnonymousClass,
    /// Placeholder for an alias whose target module has no name.
    AnonymousModule,
    /// A dynamic type alias, carrying the aliased type's textual form.
    TypeAlias(String),
    /// An opaque value ascribed by its class name.
    Opaque(String),
    /// An opaque value whose class cannot be named.
    OpaqueDynamic,
    /// A value of a generic class, with placeholder type arguments.
    Generic { name: String, arity: usize },
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Ref(target) => write!(f, "{target}"),
            ValueExpr::AnonymousClass => write!(f, "class.new"),
            ValueExpr::AnonymousModule => write!(f, "module.new"),
            ValueExpr::TypeAlias(aliased) => write!(f, "typealias({aliased})"),
            ValueExpr::Opaque(class_name) => write!(f, "opaque({class_name})"),
            ValueExpr::OpaqueDynamic => write!(f, "opaque(dynamic)"),
            ValueExpr::Generic { name, arity } => {
                write!(f, "{name}[")?;
                for i in 0..*arity {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "untyped")?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Whether a scope is a module or a class, and for classes the declared
/// superclass name, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum ScopeKind {
    Module,
    Class { superclass: Option<String> },
}

/// A mixin annotation attached to a scope by an enrichment listener.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Mixin {
    pub kind: MixinKind,
    pub name: String,
}

/// A module or class declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ScopeNode {
    pub qualified_name: String,
    pub kind: ScopeKind,
    pub mixins: Vec<Mixin>,
    pub children: Vec<NodeId>,
}

impl ScopeNode {
    pub fn module(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: ScopeKind::Module,
            mixins: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(qualified_name: impl Into<String>, superclass: Option<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            kind: ScopeKind::Class { superclass },
            mixins: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The superclass name recorded for a class scope.
    pub fn superclass(&self) -> Option<&str> {
        match &self.kind {
            ScopeKind::Class { superclass } => superclass.as_deref(),
            ScopeKind::Module => None,
        }
    }
}

/// A constant declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct ConstNode {
    pub qualified_name: String,
    pub value: ValueExpr,
}

/// A method declaration attached under its owner scope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct MethodNode {
    pub owner: String,
    pub name: String,
    pub singleton: bool,
    pub params: Vec<Param>,
}

impl MethodNode {
    /// The reconstructed source-level signature.
    pub fn signature(&self) -> String {
        let receiver = if self.singleton { "self." } else { "" };
        let mut rendered = Vec::with_capacity(self.params.len());
        for param in &self.params {
            let name = &param.name;
            rendered.push(match param.kind {
                ParamKind::Required => name.clone(),
                ParamKind::Optional => format!("{name} = _"),
                ParamKind::Rest => format!("*{name}"),
                ParamKind::Keyword => format!("{name}:"),
                ParamKind::OptionalKeyword => format!("{name}: _"),
                ParamKind::KeywordRest => format!("**{name}"),
                ParamKind::Block => format!("&{name}"),
            });
        }
        format!("def {receiver}{}({})", self.name, rendered.join(", "))
    }
}

/// A declaration node: one structural fact recorded in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub enum Node {
    Scope(ScopeNode),
    Const(ConstNode),
    Method(MethodNode),
}

impl Node {
    /// The qualified name this node declares.
    pub fn qualified_name(&self) -> &str {
        match self {
            Node::Scope(scope) => &scope.qualified_name,
            Node::Const(konst) => &konst.qualified_name,
            Node::Method(method) => &method.name,
        }
    }

    pub fn as_scope(&self) -> Option<&ScopeNode> {
        match self {
            Node::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    pub fn as_scope_mut(&mut self) -> Option<&mut ScopeNode> {
        match self {
            Node::Scope(scope) => Some(scope),
            _ => None,
        }
    }

    pub fn as_const(&self) -> Option<&ConstNode> {
        match self {
            Node::Const(konst) => Some(konst),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodNode> {
        match self {
            Node::Method(method) => Some(method),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ValueExpr::Ref("Acme::Widget".to_owned()), "Acme::Widget")]
    #[case(ValueExpr::AnonymousClass, "class.new")]
    #[case(ValueExpr::AnonymousModule, "module.new")]
    #[case(ValueExpr::TypeAlias("Str | Num".to_owned()), "typealias(Str | Num)")]
    #[case(ValueExpr::Opaque("Str".to_owned()), "opaque(Str)")]
    #[case(ValueExpr::OpaqueDynamic, "opaque(dynamic)")]
    #[case(ValueExpr::Generic { name: "List".to_owned(), arity: 2 }, "List[untyped, untyped]")]
    fn test_value_expr_rendering(#[case] expr: ValueExpr, #[case] expected: &str) {
        assert_eq!(expr.to_string(), expected);
    }

    #[test]
    fn test_method_signature_covers_all_param_kinds() {
        let method = MethodNode {
            owner: "Acme::Widget".to_owned(),
            name: "configure".to_owned(),
            singleton: false,
            params: vec![
                Param::required("input"),
                Param::optional("depth"),
                Param::rest("rest"),
                Param::keyword("mode"),
                Param::optional_keyword("limit"),
                Param::keyword_rest("options"),
                Param::block("blk"),
            ],
        };
        assert_eq!(
            method.signature(),
            "def configure(input, depth = _, *rest, mode:, limit: _, **options, &blk)"
        );
    }

    #[test]
    fn test_singleton_signature() {
        let method = MethodNode {
            owner: "Acme::Widget".to_owned(),
            name: "default".to_owned(),
            singleton: true,
            params: Vec::new(),
        };
        assert_eq!(method.signature(), "def self.default()");
    }
}
