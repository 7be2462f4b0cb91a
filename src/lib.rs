//! # stubgen-base
//!
//! Core library for runtime symbol-closure compilation: given a seed set of
//! named symbols from a runtime object universe, transitively discover every
//! constant reachable from them, classify each one (module, class, alias,
//! plain value), and assemble a declaration tree enriched by pluggable
//! listeners.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! listeners → enrichment observers (nested constants, mixins, methods)
//!   ↓
//! pipeline  → closure engine: event loop, filtering, classification
//!   ↓
//! event     → event model and FIFO work queue
//!   ↓
//! tree      → declaration tree (scopes, constants, methods)
//!   ↓
//! runtime   → introspection boundary, symbol sets, trackers
//!   ↓
//! base      → primitives (ObjectId, qualified-name handling)
//! ```

// ============================================================================
// MODULES (dependency order: base → runtime → tree → event → pipeline →
// listeners)
// ============================================================================

/// Foundation types: ObjectId, qualified-name conventions
pub mod base;

/// Runtime introspection boundary, snapshots, and write-time trackers
pub mod runtime;

/// Declaration tree: scope, constant, and method nodes
pub mod tree;

/// Event model and FIFO work queue
pub mod event;

/// Closure engine: event loop, filtering, classification
pub mod pipeline;

/// Enrichment listeners notified on node creation
pub mod listeners;

// Re-export the types nearly every caller touches
pub use base::ObjectId;
pub use event::{Event, EventQueue, NodeAdded};
pub use listeners::Listener;
pub use pipeline::{CompileError, Environment, Pipeline};
pub use tree::{Node, NodeId, Tree};
