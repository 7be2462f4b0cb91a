//! Enrichment listeners.
//!
//! Ordered observers notified once per node-added event. A listener may
//! mutate the already-attached node (annotations, children) and push new
//! events; it must not remove work other listeners depend on. Registration
//! order is significant: later listeners may assume structure added by
//! earlier ones.

mod foreign_constants;
mod methods;
mod mixins;
mod subconstants;

use crate::event::NodeAdded;
use crate::pipeline::{CompileError, Pipeline};
use crate::runtime::trackers::MixinTracker;

pub use foreign_constants::ForeignConstantsListener;
pub use methods::MethodsListener;
pub use mixins::MixinsListener;
pub use subconstants::SubconstantsListener;

/// An enrichment listener.
///
/// Failures are fatal to the whole compilation: a node enriched by some
/// listeners but not others would silently corrupt the tree's completeness
/// guarantee.
pub trait Listener {
    /// Stable name used in failure reports.
    fn name(&self) -> &'static str;

    /// React to a node-added event.
    fn on_node(
        &mut self,
        pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError>;
}

/// The built-in listener set, in the order the engine depends on:
/// subconstant discovery first, then mixin annotation, then foreign-constant
/// promotion (which reads those annotations), then method enrichment.
pub fn default_set<'a>(mixins: &'a MixinTracker) -> Vec<Box<dyn Listener + 'a>> {
    vec![
        Box::new(SubconstantsListener),
        Box::new(MixinsListener::new(mixins)),
        Box::new(ForeignConstantsListener),
        Box::new(MethodsListener),
    ]
}
