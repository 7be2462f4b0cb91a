//! Recurses the closure into a scope's directly-nested constants.

use crate::base::SCOPE_SEPARATOR;
use crate::event::NodeAdded;
use crate::pipeline::{CompileError, Pipeline};

use super::Listener;

/// Pushes a symbol event for every constant nested directly under a newly
/// declared local scope. This is what makes the closure transitive.
pub struct SubconstantsListener;

impl Listener for SubconstantsListener {
    fn name(&self) -> &'static str {
        "subconstants"
    }

    fn on_node(
        &mut self,
        pipeline: &mut Pipeline<'_>,
        event: &NodeAdded,
    ) -> Result<(), CompileError> {
        let NodeAdded::Scope {
            symbol,
            object,
            foreign: false,
            ..
        } = event
        else {
            return Ok(());
        };

        for member in pipeline.env().runtime.own_constants(*object) {
            pipeline.push_symbol(format!("{symbol}{SCOPE_SEPARATOR}{member}"));
        }
        Ok(())
    }
}
