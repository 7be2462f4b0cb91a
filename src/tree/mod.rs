//! The declaration tree assembled as a side effect of closure processing.
//!
//! Nodes live in an arena addressed by [`NodeId`]; scopes keep ordered child
//! lists and the root keeps an ordered top-level list, so insertion order is
//! preserved end to end and rendering is deterministic.

mod node;

use std::fmt;

use rustc_hash::FxHashMap;

use crate::base::SCOPE_SEPARATOR;

pub use node::{ConstNode, MethodNode, Mixin, Node, NodeId, ScopeKind, ScopeNode, ValueExpr};

/// Root container for declaration nodes.
#[derive(Debug, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize))]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    #[cfg_attr(feature = "serialize", serde(skip))]
    scopes_by_qname: FxHashMap<String, NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Add a scope node, attached under its lexical position: nested under
    /// the longest already-declared enclosing scope, else at the root.
    pub fn add_scope(&mut self, scope: ScopeNode) -> NodeId {
        let qualified_name = scope.qualified_name.clone();
        let id = self.alloc(Node::Scope(scope));
        self.scopes_by_qname.insert(qualified_name.clone(), id);
        self.attach(&qualified_name, id);
        id
    }

    /// Add a constant node, attached under its lexical position.
    pub fn add_const(&mut self, konst: ConstNode) -> NodeId {
        let qualified_name = konst.qualified_name.clone();
        let id = self.alloc(Node::Const(konst));
        self.attach(&qualified_name, id);
        id
    }

    /// Add a method node under its owner scope.
    ///
    /// Returns `None` when `owner` does not address a scope node.
    pub fn add_method(&mut self, owner: NodeId, method: MethodNode) -> Option<NodeId> {
        if !matches!(self.nodes.get(owner.index()), Some(Node::Scope(_))) {
            return None;
        }
        let id = self.alloc(Node::Method(method));
        if let Some(Node::Scope(scope)) = self.nodes.get_mut(owner.index()) {
            scope.children.push(id);
        }
        Some(id)
    }

    fn attach(&mut self, qualified_name: &str, id: NodeId) {
        match self.enclosing_scope(qualified_name) {
            Some(parent) => {
                if let Some(Node::Scope(scope)) = self.nodes.get_mut(parent.index()) {
                    scope.children.push(id);
                }
            }
            None => self.roots.push(id),
        }
    }

    /// The longest already-declared scope lexically enclosing
    /// `qualified_name`.
    fn enclosing_scope(&self, qualified_name: &str) -> Option<NodeId> {
        let mut prefix = qualified_name;
        while let Some(split) = prefix.rfind(SCOPE_SEPARATOR) {
            prefix = &prefix[..split];
            if let Some(&id) = self.scopes_by_qname.get(prefix) {
                return Some(id);
            }
        }
        None
    }

    /// Get a node by id (O(1) arena lookup)
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by id (O(1) arena lookup)
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Top-level nodes in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Find a declared scope by its exact qualified name.
    pub fn scope_by_name(&self, qualified_name: &str) -> Option<NodeId> {
        self.scopes_by_qname.get(qualified_name).copied()
    }

    /// Total number of nodes in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in allocation order, with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId::new(index), node))
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        let pad = "  ".repeat(depth);
        match node {
            Node::Scope(scope) => {
                match &scope.kind {
                    ScopeKind::Module => writeln!(f, "{pad}module {}", scope.qualified_name)?,
                    ScopeKind::Class { superclass: None } => {
                        writeln!(f, "{pad}class {}", scope.qualified_name)?
                    }
                    ScopeKind::Class {
                        superclass: Some(superclass),
                    } => writeln!(f, "{pad}class {} < {superclass}", scope.qualified_name)?,
                }
                for mixin in &scope.mixins {
                    writeln!(f, "{pad}  {} {}", mixin.kind, mixin.name)?;
                }
                for &child in &scope.children {
                    self.fmt_node(f, child, depth + 1)?;
                }
                Ok(())
            }
            Node::Const(konst) => {
                writeln!(f, "{pad}{} = {}", konst.qualified_name, konst.value)
            }
            Node::Method(method) => writeln!(f, "{pad}{}", method.signature()),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &root in &self.roots {
            self.fmt_node(f, root, 0)?;
        }
        Ok(())
    }
}
