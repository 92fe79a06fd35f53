//! Contribution port

use std::sync::Arc;

use crate::variable_service::VariableService;

/// A producer of variables.
///
/// Contributions run once when the registry is built and register any number
/// of resolvers and argument pickers. A contribution that resolves its own
/// variables registers a clone of `self`.
pub trait VariableContribution: Send + Sync {
    /// Registers this contribution's variables with the service.
    fn register_variables(self: Arc<Self>, service: &dyn VariableService);
}
