//! Attaches method declarations for methods the unit itself defines.

use tracing::trace;

use crate::event::NodeAdded;
use crate::pipeline::{CompileError, Pipeline};
use crate::tree::MethodNode;

use super::Listener;

/// Enumerates a scope object's own methods, keeps the ones whose source
/// location belongs to the unit, and attaches method nodes. Foreign scopes
/// are processed too: the unit may define methods on constants it does not
/// own, and the source-location filter keeps everything else out.
pub struct MethodsListener;

impl Listener for MethodsListener {
    fn name(&self) -> &'static str {
        "methods"
    }

    fn on_node(
        &mut self,
        pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError> {
        let NodeAdded::Scope {
            symbol,
            object,
            node,
            ..
        } = event
        else {
            return Ok(());
        };

        for method in pipeline.env().runtime.own_methods(*object) {
            if !pipeline.method_in_unit(&method) {
                trace!(
                    "skipping method '{}' defined outside the unit",
                    method.name
                );
                continue;
            }

            let method_node = MethodNode {
                owner: symbol.clone(),
                name: method.name.clone(),
                singleton: method.singleton,
                params: method.params.clone(),
            };
            let signature = method_node.signature();
            let Some(id) = pipeline.tree_mut().add_method(*node, method_node) else {
                continue;
            };
            pipeline.push_method_node(symbol.clone(), *object, id, signature, method.params);
        }
        Ok(())
    }
}
