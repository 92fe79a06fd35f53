//! Default in-memory variable service.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;
use tracing::{debug, warn};

use ctxvar_domain::{
    ResolutionRequest, ResolvedVariable, VariableContext, VariableDefinition, VariableKey,
    VariableRef,
};

use crate::ports::{ArgumentPicker, VariableContribution, VariableResolver};

use super::disposable::Disposable;
use super::service::{ChangeListener, VariableService};

#[derive(Default)]
struct Registry {
    variables: HashMap<VariableKey, VariableDefinition>,
    resolvers: HashMap<VariableKey, Vec<Arc<dyn VariableResolver>>>,
    pickers: HashMap<VariableKey, Arc<dyn ArgumentPicker>>,
    listeners: Vec<(u64, ChangeListener)>,
    next_listener_id: u64,
}

impl Registry {
    fn listeners(&self) -> Vec<ChangeListener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Compares two handles by the address of the object they point to.
fn same_object<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Thread-safe in-memory variable registry.
///
/// Cloning is cheap and every clone shares the same registry. Maps are only
/// locked for synchronous reads and writes, never across a probe, a
/// resolution or a picker call. Change listeners run after the lock has been
/// released, so they may call back into the service.
#[derive(Clone, Default)]
pub struct DefaultVariableService {
    inner: Arc<RwLock<Registry>>,
}

impl DefaultVariableService {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry and lets each contribution register its variables,
    /// in the given order.
    pub fn with_contributions<I>(contributions: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn VariableContribution>>,
    {
        let service = Self::new();
        for contribution in contributions {
            contribution.register_variables(&service);
        }
        debug!(
            variables = service.inner.read().variables.len(),
            "variable contributions registered"
        );
        service
    }

    fn downgrade(&self) -> Weak<RwLock<Registry>> {
        Arc::downgrade(&self.inner)
    }

    fn upgrade(inner: &Weak<RwLock<Registry>>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    fn notify(listeners: Vec<ChangeListener>) {
        for listener in listeners {
            listener();
        }
    }

    /// Snapshot of the definition and its resolvers, taken under one read lock.
    fn snapshot(&self, name: &str) -> Option<(VariableDefinition, Vec<Arc<dyn VariableResolver>>)> {
        let key = VariableKey::new(name);
        let registry = self.inner.read();
        let variable = registry.variables.get(&key)?.clone();
        let resolvers = registry.resolvers.get(&key).cloned().unwrap_or_default();
        Some((variable, resolvers))
    }
}

#[async_trait]
impl VariableService for DefaultVariableService {
    fn has_variable(&self, name: &str) -> bool {
        self.inner
            .read()
            .variables
            .contains_key(&VariableKey::new(name))
    }

    fn get_variable(&self, name: &str) -> Option<VariableDefinition> {
        self.inner
            .read()
            .variables
            .get(&VariableKey::new(name))
            .cloned()
    }

    fn get_variables(&self) -> Vec<VariableDefinition> {
        self.inner.read().variables.values().cloned().collect()
    }

    fn unregister_variable(&self, name: &str) {
        let key = VariableKey::new(name);
        let listeners = {
            let mut registry = self.inner.write();
            registry.variables.remove(&key);
            registry.resolvers.remove(&key);
            registry.listeners()
        };
        debug!(variable = %key, "variable unregistered");
        Self::notify(listeners);
    }

    fn on_did_change_variables(&self, listener: ChangeListener) -> Disposable {
        let id = {
            let mut registry = self.inner.write();
            let id = registry.next_listener_id;
            registry.next_listener_id += 1;
            registry.listeners.push((id, listener));
            id
        };

        let inner = self.downgrade();
        Disposable::new(move || {
            if let Some(service) = Self::upgrade(&inner) {
                service
                    .inner
                    .write()
                    .listeners
                    .retain(|(listener_id, _)| *listener_id != id);
            }
        })
    }

    fn register_resolver(
        &self,
        variable: &VariableDefinition,
        resolver: Arc<dyn VariableResolver>,
    ) -> Disposable {
        let key = variable.key();
        let added = {
            let mut registry = self.inner.write();
            let added = !registry.variables.contains_key(&key);
            if added {
                registry.variables.insert(key.clone(), variable.clone());
            }
            registry
                .resolvers
                .entry(key.clone())
                .or_default()
                .push(Arc::clone(&resolver));
            added.then(|| registry.listeners())
        };

        if let Some(listeners) = added {
            debug!(variable = %key, provider = %variable.id, "variable registered");
            Self::notify(listeners);
        }

        let inner = self.downgrade();
        let variable = variable.clone();
        Disposable::new(move || {
            if let Some(service) = Self::upgrade(&inner) {
                service.unregister_resolver(&variable, &resolver);
            }
        })
    }

    fn unregister_resolver(&self, variable: &VariableDefinition, resolver: &Arc<dyn VariableResolver>) {
        let key = variable.key();
        let removed_variable = {
            let mut registry = self.inner.write();
            let Some(resolvers) = registry.resolvers.get_mut(&key) else {
                return;
            };
            let Some(position) = resolvers.iter().position(|r| same_object(r, resolver)) else {
                return;
            };
            resolvers.remove(position);
            if resolvers.is_empty() {
                registry.variables.remove(&key);
                registry.resolvers.remove(&key);
                Some(registry.listeners())
            } else {
                None
            }
        };

        if let Some(listeners) = removed_variable {
            debug!(variable = %key, "last resolver removed, variable unregistered");
            Self::notify(listeners);
        }
    }

    async fn get_resolvers_by_priority(
        &self,
        name: &str,
        arg: Option<&str>,
        context: &VariableContext,
    ) -> Vec<Arc<dyn VariableResolver>> {
        let Some((variable, resolvers)) = self.snapshot(name) else {
            return Vec::new();
        };
        let request = ResolutionRequest::with_arg(variable, arg.map(str::to_string));

        let scores = join_all(resolvers.iter().map(|resolver| {
            let request = &request;
            async move {
                match resolver.can_resolve(request, context).await {
                    Ok(score) => score,
                    Err(error) => {
                        warn!(variable = %request.variable.name, %error, "resolver probe failed");
                        0
                    }
                }
            }
        }))
        .await;

        let mut ranked: Vec<(u32, Arc<dyn VariableResolver>)> = scores
            .into_iter()
            .zip(resolvers)
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable: equal scores keep registration order.
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        debug!(
            variable = %request.variable.name,
            candidates = ranked.len(),
            best = ?ranked.first().map(|(score, _)| *score),
            "resolvers prioritized"
        );
        ranked.into_iter().map(|(_, resolver)| resolver).collect()
    }

    fn register_argument_picker(
        &self,
        variable: &VariableDefinition,
        picker: Arc<dyn ArgumentPicker>,
    ) -> Disposable {
        self.inner
            .write()
            .pickers
            .insert(variable.key(), Arc::clone(&picker));

        let inner = self.downgrade();
        let variable = variable.clone();
        Disposable::new(move || {
            if let Some(service) = Self::upgrade(&inner) {
                service.unregister_argument_picker(&variable, &picker);
            }
        })
    }

    fn unregister_argument_picker(
        &self,
        variable: &VariableDefinition,
        picker: &Arc<dyn ArgumentPicker>,
    ) {
        let key = variable.key();
        let mut registry = self.inner.write();
        if registry
            .pickers
            .get(&key)
            .is_some_and(|registered| same_object(registered, picker))
        {
            registry.pickers.remove(&key);
        }
    }

    async fn get_argument_picker(
        &self,
        name: &str,
        _context: &VariableContext,
    ) -> Option<Arc<dyn ArgumentPicker>> {
        self.inner
            .read()
            .pickers
            .get(&VariableKey::new(name))
            .cloned()
    }

    async fn resolve_variable(
        &self,
        reference: VariableRef,
        context: &VariableContext,
    ) -> Option<ResolvedVariable> {
        let (name, arg) = reference.into_parts();
        let Some(variable) = self.get_variable(&name) else {
            debug!(variable = %name, "unknown variable");
            return None;
        };

        let Some(resolver) = self.get_resolver(&name, arg.as_deref(), context).await else {
            debug!(variable = %name, "no resolver accepted the request");
            return None;
        };

        let request = ResolutionRequest::with_arg(variable, arg);
        let resolved = resolver.resolve(&request, context).await?;
        Some(resolved.with_arg(request.arg))
    }
}
