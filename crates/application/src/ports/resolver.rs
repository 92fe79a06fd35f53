//! Resolver port

use async_trait::async_trait;
use ctxvar_domain::{ResolutionRequest, ResolvedVariable, VariableContext};

/// Errors a resolver may report while probing or resolving.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    /// The resolver could not evaluate the request.
    #[error("resolver failed: {0}")]
    Failed(String),
}

/// A capability that turns variable requests into values.
///
/// Several resolvers may register against the same variable; the registry
/// probes all of them and delegates to the one reporting the highest score.
#[async_trait]
pub trait VariableResolver: Send + Sync {
    /// Reports how confident this resolver is that it can resolve `request`.
    ///
    /// `0` means "cannot resolve". Resolvers should answer `Ok(0)` for
    /// variables they do not recognize; an error is treated as `0` by the
    /// registry and never aborts the selection round.
    ///
    /// # Errors
    /// Returns an error if the probe itself fails.
    async fn can_resolve(
        &self,
        request: &ResolutionRequest,
        context: &VariableContext,
    ) -> Result<u32, ResolverError>;

    /// Resolves the request, or returns `None` if no value can be produced.
    async fn resolve(
        &self,
        request: &ResolutionRequest,
        context: &VariableContext,
    ) -> Option<ResolvedVariable>;
}
