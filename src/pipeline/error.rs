//! Error types for closure compilation.

use thiserror::Error;

/// Errors that abort a compilation run.
///
/// Unresolvable symbols and filtered constants are expected outcomes and
/// never surface here; only defects that would otherwise leave the tree
/// partially enriched do. Malformed events are unrepresentable: the event
/// type is a closed enum and dispatch is exhaustive.
#[derive(Debug, Error)]
pub enum CompileError {
    /// An enrichment listener failed. The run aborts because a node the
    /// listener skipped would silently break the tree's completeness
    /// guarantee.
    #[error("listener '{listener}' failed while enriching '{symbol}': {message}")]
    Listener {
        listener: &'static str,
        symbol: String,
        message: String,
    },
}

impl CompileError {
    /// Create a listener failure error.
    pub fn listener(
        listener: &'static str,
        symbol: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Listener {
            listener,
            symbol: symbol.into(),
            message: message.into(),
        }
    }
}
