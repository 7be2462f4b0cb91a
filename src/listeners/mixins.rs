//! Attaches include/extend/prepend annotations from the mixin tracker.

use crate::event::NodeAdded;
use crate::pipeline::{CompileError, Pipeline};
use crate::runtime::trackers::MixinTracker;
use crate::tree::{Mixin, Node};

use super::Listener;

/// Annotates newly declared local scopes with the compositions recorded for
/// their object, in registration order.
pub struct MixinsListener<'t> {
    tracker: &'t MixinTracker,
}

impl<'t> MixinsListener<'t> {
    pub fn new(tracker: &'t MixinTracker) -> Self {
        Self { tracker }
    }
}

impl Listener for MixinsListener<'_> {
    fn name(&self) -> &'static str {
        "mixins"
    }

    fn on_node(
        &mut self,
        pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError> {
        let NodeAdded::Scope {
            object,
            node,
            foreign: false,
            ..
        } = event
        else {
            return Ok(());
        };

        for record in self.tracker.mixins_of(*object) {
            // Unnamed mixins cannot be referenced from a declaration.
            let Some(name) = pipeline.name_of(record.composed) else {
                continue;
            };
            if let Some(Node::Scope(scope)) = pipeline.tree_mut().get_mut(*node) {
                scope.mixins.push(Mixin {
                    kind: record.kind,
                    name,
                });
            }
        }
        Ok(())
    }
}
