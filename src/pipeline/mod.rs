//! The closure engine.
//!
//! Consumes events, resolves symbols to objects, classifies and filters
//! them, builds declaration nodes, and re-emits follow-up events until the
//! queue is drained. Single-threaded, run-to-completion: every handler runs
//! synchronously before the next event is popped.

mod error;
mod filters;

use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::base::{ObjectId, alias_prefix, strip_root_qualifier};
use crate::event::{Event, EventQueue, NodeAdded};
use crate::listeners::Listener;
use crate::runtime::trackers::DefinitionTracker;
use crate::runtime::{
    GenericRegistry, ObjectKind, Param, Runtime, SymbolSet, UnitMembership, ValueCategory,
};
use crate::tree::{ConstNode, NodeId, ScopeNode, Tree, ValueExpr};

pub use error::CompileError;

/// Read-only snapshots a pipeline runs against.
///
/// Everything here is computed before the run begins and safe to share
/// across independent pipelines.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    pub runtime: &'a dyn Runtime,
    pub unit: &'a dyn UnitMembership,
    pub payload: &'a SymbolSet,
    pub bootstrap: &'a SymbolSet,
    pub generics: &'a GenericRegistry,
    pub definitions: &'a DefinitionTracker,
}

/// The event-driven symbol-closure compiler.
///
/// Seed symbols, then [`compile`](Pipeline::compile): the engine drains the
/// queue to exhaustion, assembling the declaration tree as a side effect.
/// Per-run state (seen set, alias namespaces, queue, tree) is strictly
/// per-instance; parallel callers run independent pipelines.
pub struct Pipeline<'a> {
    env: Environment<'a>,
    tree: Tree,
    /// Names already declared or rejected; at most one declaration per name.
    seen: IndexSet<String>,
    /// Prefixes under which nested symbols are suppressed because the
    /// parent name is itself only an alias.
    alias_namespace: IndexSet<String>,
    queue: EventQueue,
    listeners: Vec<Box<dyn Listener + 'a>>,
    /// Known problematic aliases: recorded in the alias namespace but never
    /// declared.
    ignored_aliases: Vec<String>,
}

impl<'a> Pipeline<'a> {
    pub fn new(env: Environment<'a>) -> Self {
        Self {
            env,
            tree: Tree::new(),
            seen: IndexSet::new(),
            alias_namespace: IndexSet::new(),
            queue: EventQueue::new(),
            listeners: Vec::new(),
            ignored_aliases: Vec::new(),
        }
    }

    /// The environment this pipeline runs against.
    pub fn env(&self) -> Environment<'a> {
        self.env
    }

    /// Register an enrichment listener. Registration order is notification
    /// order; later listeners may rely on structure added by earlier ones.
    pub fn add_listener(&mut self, listener: Box<dyn Listener + 'a>) {
        self.listeners.push(listener);
    }

    /// Suppress declaration of a known problematic alias name.
    pub fn ignore_alias(&mut self, name: impl Into<String>) {
        self.ignored_aliases.push(name.into());
    }

    /// Enqueue a starting point before compilation.
    pub fn seed(&mut self, symbol: &str) {
        self.push_symbol(symbol);
    }

    /// Drain the event queue to completion and return the assembled tree.
    ///
    /// Calling again with an empty queue returns the same tree.
    pub fn compile(&mut self) -> Result<&Tree, CompileError> {
        while let Some(event) = self.queue.pop() {
            self.dispatch(event)?;
        }
        Ok(&self.tree)
    }

    /// Hand the finished tree to the caller.
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Read access to the in-progress tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Mutable access to the in-progress tree, for listeners.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// True once `name` has been declared or rejected.
    pub fn has_seen(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    /// Recorded alias-namespace prefixes, in recording order.
    pub fn alias_namespaces(&self) -> impl Iterator<Item = &str> {
        self.alias_namespace.iter().map(String::as_str)
    }

    // ========================================================================
    // EVENT PUSH PRIMITIVES
    // ========================================================================

    pub fn push_symbol(&mut self, symbol: impl Into<String>) {
        self.queue.push(Event::SymbolFound {
            symbol: symbol.into(),
        });
    }

    pub fn push_constant(&mut self, symbol: impl Into<String>, object: ObjectId) {
        self.queue.push(Event::ConstantFound {
            symbol: symbol.into(),
            object,
        });
    }

    pub fn push_foreign_constant(&mut self, symbol: impl Into<String>, object: ObjectId) {
        self.queue.push(Event::ForeignConstantFound {
            symbol: symbol.into(),
            object,
        });
    }

    /// Fire a method node-added event; called by method-enriching listeners
    /// after attaching the node.
    pub fn push_method_node(
        &mut self,
        symbol: impl Into<String>,
        object: ObjectId,
        node: NodeId,
        signature: String,
        parameters: Vec<Param>,
    ) {
        self.queue.push(Event::NodeAdded(NodeAdded::Method {
            symbol: symbol.into(),
            object,
            node,
            signature,
            parameters,
        }));
    }

    // ========================================================================
    // DISPATCH
    // ========================================================================

    fn dispatch(&mut self, event: Event) -> Result<(), CompileError> {
        match event {
            Event::SymbolFound { symbol } => {
                self.on_symbol(&symbol);
                Ok(())
            }
            Event::ConstantFound { symbol, object } => {
                self.on_constant(symbol, object, false);
                Ok(())
            }
            Event::ForeignConstantFound { symbol, object } => {
                self.on_constant(symbol, object, true);
                Ok(())
            }
            Event::NodeAdded(added) => self.on_node(added),
        }
    }

    fn on_symbol(&mut self, symbol: &str) {
        let symbol = strip_root_qualifier(symbol);
        if self.skip_symbol(symbol) {
            trace!("skipping standard-environment symbol '{}'", symbol);
            return;
        }
        match self.env.runtime.resolve(symbol) {
            Some(object) => self.push_constant(symbol, object),
            None => trace!("dropping unresolved symbol '{}'", symbol),
        }
    }

    fn on_constant(&mut self, symbol: String, object: ObjectId, foreign: bool) {
        if self.skip_constant(&symbol, object, foreign) {
            trace!("filtering constant '{}'", symbol);
            return;
        }

        self.seen.insert(symbol.clone());

        if foreign {
            self.compile_foreign_constant(symbol, object);
        } else {
            self.compile_constant(symbol, object);
        }
    }

    fn on_node(&mut self, added: NodeAdded) -> Result<(), CompileError> {
        // The listener list is taken out for the duration of the fan-out so
        // listeners can borrow the pipeline mutably.
        let mut listeners = std::mem::take(&mut self.listeners);
        let mut result = Ok(());
        for listener in &mut listeners {
            result = listener.on_node(self, &added);
            if result.is_err() {
                break;
            }
        }
        self.listeners = listeners;
        result
    }

    // ========================================================================
    // COMPILING
    // ========================================================================

    fn compile_foreign_constant(&mut self, symbol: String, object: ObjectId) {
        let node = self.compile_scope(&symbol, object);
        self.queue.push(Event::NodeAdded(NodeAdded::Scope {
            symbol,
            object,
            node,
            foreign: true,
        }));
    }

    fn compile_constant(&mut self, symbol: String, object: ObjectId) {
        if self.env.runtime.kind(object).is_namespace() {
            if self.name_of(object).as_deref() != Some(symbol.as_str()) {
                self.compile_alias(symbol, object);
            } else {
                self.compile_module(symbol, object);
            }
        } else {
            self.compile_object(symbol, object);
        }
    }

    fn compile_alias(&mut self, name: String, object: ObjectId) {
        if self.symbol_in_payload(&name) {
            trace!("skipping payload alias '{}'", name);
            return;
        }

        // An alias target with no usable name becomes an anonymous
        // placeholder of the matching kind.
        let value = match self.name_of(object) {
            Some(target) => ValueExpr::Ref(target),
            None => match self.env.runtime.kind(object) {
                ObjectKind::Class => ValueExpr::AnonymousClass,
                _ => ValueExpr::AnonymousModule,
            },
        };

        self.alias_namespace.insert(alias_prefix(&name));

        if self.ignored_aliases.iter().any(|ignored| ignored == &name) {
            return;
        }

        self.declare_const(name, object, value);
    }

    fn compile_object(&mut self, name: String, value: ObjectId) {
        if self.symbol_in_payload(&name) {
            trace!("skipping payload object '{}'", name);
            return;
        }

        let class = self.env.runtime.class_of(value);
        match self.env.runtime.value_category(value) {
            ValueCategory::WeakCollection => {
                // Weak collections are implicit generics with one type
                // parameter.
                let expr = match class.and_then(|class| self.name_of(class)) {
                    Some(class_name) => ValueExpr::Generic {
                        name: class_name,
                        arity: 1,
                    },
                    None => ValueExpr::OpaqueDynamic,
                };
                self.declare_const(name, class.unwrap_or(value), expr);
            }
            ValueCategory::TypeAlias(aliased) => {
                self.declare_const(name, class.unwrap_or(value), ValueExpr::TypeAlias(aliased));
            }
            ValueCategory::InternalTypeRepr => {
                trace!("dropping internal type representation '{}'", name);
            }
            ValueCategory::Plain => {
                let expr = match class {
                    Some(class) => match self.generic_expr_of(class) {
                        Some(generic) => generic,
                        None => match self.name_of(class) {
                            Some(class_name) => ValueExpr::Opaque(class_name),
                            None => ValueExpr::OpaqueDynamic,
                        },
                    },
                    None => ValueExpr::OpaqueDynamic,
                };
                self.declare_const(name, class.unwrap_or(value), expr);
            }
        }
    }

    fn compile_module(&mut self, name: String, object: ObjectId) {
        if self.skip_definition(object) {
            trace!("dropping definition '{}' not attributable to unit", name);
            return;
        }

        let node = self.compile_scope(&name, object);
        self.queue.push(Event::NodeAdded(NodeAdded::Scope {
            symbol: name,
            object,
            node,
            foreign: false,
        }));
    }

    fn compile_scope(&mut self, name: &str, object: ObjectId) -> NodeId {
        let scope = if self.env.runtime.kind(object) == ObjectKind::Class {
            let superclass = self.compile_superclass(object);
            ScopeNode::class(name, superclass)
        } else {
            ScopeNode::module(name)
        };
        debug!("declaring scope '{}'", name);
        self.tree.add_scope(scope)
    }

    /// Walk the direct superclass chain to the first proper superclass
    /// distinguishable by name.
    ///
    /// An object can pathologically resolve to itself as its own superclass
    /// through reassignment; candidates are compared by re-resolving their
    /// name and checking the resolved object's name against the walked-from
    /// class's name, skipping while they match. Links with no usable name
    /// are skipped the same way.
    fn compile_superclass(&mut self, class: ObjectId) -> Option<String> {
        let runtime = self.env.runtime;
        let mut visited: FxHashSet<ObjectId> = FxHashSet::default();
        let mut constant = class;

        let superclass = loop {
            let candidate = runtime.superclass_of(constant)?;
            if !visited.insert(candidate) {
                // Identity cycle in the chain; treat as no explicit
                // superclass.
                return None;
            }

            let constant_name = self.name_of(constant);
            constant = candidate;

            let Some(candidate_name) = self.name_of(candidate) else {
                continue;
            };
            let Some(resolved) = runtime.resolve(&candidate_name) else {
                continue;
            };
            if !runtime.kind(resolved).is_namespace() {
                continue;
            }
            if self.name_of(resolved) == constant_name {
                continue;
            }

            break candidate;
        };

        if runtime.is_implicit_superclass(superclass) {
            return None;
        }

        let name = self.name_of(superclass)?;
        if name.is_empty() {
            return None;
        }

        // The superclass joins the closure.
        self.push_symbol(name.clone());
        Some(name)
    }

    fn declare_const(&mut self, name: String, object: ObjectId, value: ValueExpr) {
        debug!("declaring constant '{}'", name);
        let node = self.tree.add_const(ConstNode {
            qualified_name: name.clone(),
            value,
        });
        self.queue.push(Event::NodeAdded(NodeAdded::Const {
            symbol: name,
            object,
            node,
        }));
    }

    fn generic_expr_of(&self, class: ObjectId) -> Option<ValueExpr> {
        let arity = self.env.generics.arity_of(class)?;
        let name = self.name_of(class)?;
        Some(ValueExpr::Generic { name, arity })
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    /// Canonical name of `object`, validated by resolving it back to the
    /// same identity; renamed or shadowed objects report no usable name.
    pub fn name_of(&self, object: ObjectId) -> Option<String> {
        let name = self.env.runtime.canonical_name(object)?;
        let resolved = self.env.runtime.resolve(&name)?;
        (resolved == object).then_some(name)
    }
}
