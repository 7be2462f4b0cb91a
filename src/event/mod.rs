//! The event model: units of pending work for the closure engine.
//!
//! Discovery is event-driven: resolving a symbol enqueues a constant event,
//! declaring a constant enqueues a node-added event, and listeners reacting
//! to node-added events enqueue further symbol events. The queue drains
//! strictly FIFO, which makes the whole computation a deterministic
//! fixed point.

use std::collections::VecDeque;

use crate::base::ObjectId;
use crate::runtime::Param;
use crate::tree::NodeId;

/// A unit of pending work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A name to resolve.
    SymbolFound { symbol: String },
    /// A resolved object bound to a name, from the unit under inspection.
    ConstantFound { symbol: String, object: ObjectId },
    /// A resolved object bound to a name, originating outside the unit but
    /// referenced by it (a mixin or ancestor).
    ForeignConstantFound { symbol: String, object: ObjectId },
    /// A declaration node was created and attached to the tree.
    NodeAdded(NodeAdded),
}

/// Payload of a node-added event, by node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAdded {
    Const {
        symbol: String,
        object: ObjectId,
        node: NodeId,
    },
    Scope {
        symbol: String,
        object: ObjectId,
        node: NodeId,
        /// Recorded from outside the unit; origin-unit membership is not
        /// re-validated for these.
        foreign: bool,
    },
    Method {
        symbol: String,
        object: ObjectId,
        node: NodeId,
        signature: String,
        parameters: Vec<Param>,
    },
}

impl NodeAdded {
    /// The symbol whose processing produced this node.
    pub fn symbol(&self) -> &str {
        match self {
            NodeAdded::Const { symbol, .. }
            | NodeAdded::Scope { symbol, .. }
            | NodeAdded::Method { symbol, .. } => symbol,
        }
    }

    /// The runtime object behind the node.
    pub fn object(&self) -> ObjectId {
        match self {
            NodeAdded::Const { object, .. }
            | NodeAdded::Scope { object, .. }
            | NodeAdded::Method { object, .. } => *object,
        }
    }

    /// The attached tree node.
    pub fn node(&self) -> NodeId {
        match self {
            NodeAdded::Const { node, .. }
            | NodeAdded::Scope { node, .. }
            | NodeAdded::Method { node, .. } => *node,
        }
    }
}

/// FIFO work-list of pending events.
///
/// An empty pop is the engine's loop-exit condition, not a failure: the
/// drain loop is `while let Some(event) = queue.pop()`, never
/// exception-driven.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event at the tail.
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Remove and return the oldest pending event.
    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}
