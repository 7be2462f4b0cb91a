//! Pulls mixins defined outside the unit into the closure.
//!
//! Must run after [`MixinsListener`](super::MixinsListener): it reads the
//! annotations that listener attached to the scope node. Foreign scopes are
//! skipped; their origin-unit membership is not re-validated.

use crate::event::NodeAdded;
use crate::pipeline::{CompileError, Pipeline};
use crate::tree::Node;

use super::Listener;

/// Pushes a foreign-constant event for every attached mixin whose defining
/// files fall outside the unit, so the closure records its shape too.
pub struct ForeignConstantsListener;

impl Listener for ForeignConstantsListener {
    fn name(&self) -> &'static str {
        "foreign-constants"
    }

    fn on_node(
        &mut self,
        pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError> {
        let NodeAdded::Scope {
            node,
            foreign: false,
            ..
        } = event
        else {
            return Ok(());
        };

        let mixin_names: Vec<String> = match pipeline.tree().get(*node) {
            Some(Node::Scope(scope)) => scope.mixins.iter().map(|m| m.name.clone()).collect(),
            _ => return Ok(()),
        };

        for name in mixin_names {
            let Some(object) = pipeline.env().runtime.resolve(&name) else {
                continue;
            };
            if pipeline.defined_in_unit(object, true) {
                continue;
            }
            pipeline.push_foreign_constant(name, object);
        }
        Ok(())
    }
}
