//! Write-time registries.
//!
//! Process-wide, append-only maps recording facts at the moment they happen
//! (a mixin composed, a constant defined), keyed by object identity so that
//! later renaming or anonymity cannot lose the record. Registration is an
//! explicit API called by instrumentation hooks installed at process start;
//! there is no operator interception.

mod definition;
mod mixin;

pub use definition::DefinitionTracker;
pub use mixin::{MixinKind, MixinRecord, MixinSite, MixinTracker};
