//! Variable service interface

use std::sync::Arc;

use async_trait::async_trait;
use ctxvar_domain::{ResolvedVariable, VariableContext, VariableDefinition, VariableRef};

use crate::ports::{ArgumentPicker, VariableResolver};

use super::disposable::Disposable;

/// Callback notified whenever the set of known variables changes.
///
/// Notifications carry no payload; listeners re-query the service.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Registry of context variables, their resolvers and argument pickers.
///
/// Variable names are matched case-insensitively everywhere.
#[async_trait]
pub trait VariableService: Send + Sync {
    /// Returns true if a variable with this name is registered.
    fn has_variable(&self, name: &str) -> bool;

    /// Returns the stored definition for `name`.
    fn get_variable(&self, name: &str) -> Option<VariableDefinition>;

    /// Returns a snapshot of all known definitions, in no particular order.
    fn get_variables(&self) -> Vec<VariableDefinition>;

    /// Removes a variable together with all of its resolvers.
    ///
    /// Always notifies change listeners.
    fn unregister_variable(&self, name: &str);

    /// Subscribes to changes of the known variable set.
    fn on_did_change_variables(&self, listener: ChangeListener) -> Disposable;

    /// Registers `resolver` for `variable`.
    ///
    /// The first definition registered under a name is kept; later
    /// definitions under the same name only contribute their resolver.
    fn register_resolver(
        &self,
        variable: &VariableDefinition,
        resolver: Arc<dyn VariableResolver>,
    ) -> Disposable;

    /// Removes exactly this resolver. Removing the last resolver of a
    /// variable removes the variable.
    fn unregister_resolver(&self, variable: &VariableDefinition, resolver: &Arc<dyn VariableResolver>);

    /// Returns the resolvers able to handle the request, best first.
    async fn get_resolvers_by_priority(
        &self,
        name: &str,
        arg: Option<&str>,
        context: &VariableContext,
    ) -> Vec<Arc<dyn VariableResolver>>;

    /// Returns the best resolver for the request, if any scores above zero.
    async fn get_resolver(
        &self,
        name: &str,
        arg: Option<&str>,
        context: &VariableContext,
    ) -> Option<Arc<dyn VariableResolver>> {
        self.get_resolvers_by_priority(name, arg, context)
            .await
            .into_iter()
            .next()
    }

    /// Registers the argument picker for `variable`, replacing any previous one.
    fn register_argument_picker(
        &self,
        variable: &VariableDefinition,
        picker: Arc<dyn ArgumentPicker>,
    ) -> Disposable;

    /// Removes the argument picker if it is still the registered one.
    fn unregister_argument_picker(
        &self,
        variable: &VariableDefinition,
        picker: &Arc<dyn ArgumentPicker>,
    );

    /// Returns the argument picker registered for `name`.
    async fn get_argument_picker(
        &self,
        name: &str,
        context: &VariableContext,
    ) -> Option<Arc<dyn ArgumentPicker>>;

    /// Resolves a variable reference into a value.
    ///
    /// Returns `None` for unknown variables, when no resolver applies, or when
    /// the selected resolver produces nothing.
    async fn resolve_variable(
        &self,
        reference: VariableRef,
        context: &VariableContext,
    ) -> Option<ResolvedVariable>;
}
