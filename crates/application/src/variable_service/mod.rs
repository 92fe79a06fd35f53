//! Variable registry and resolution service
//!
//! Contributions register variable definitions together with resolvers and
//! argument pickers; callers look variables up and resolve references.
//!
//! # Resolver selection
//!
//! Every resolver registered for a variable is probed with the request.
//! The resolver with the highest strictly positive score wins; ties go to the
//! resolver registered first, and a failing probe counts as `0`.
//!
//! # Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use ctxvar_application::ports::{ResolverError, VariableResolver};
//! use ctxvar_application::{DefaultVariableService, VariableService};
//! use ctxvar_domain::{
//!     ResolutionRequest, ResolvedVariable, VariableContext, VariableDefinition, VariableRef,
//! };
//!
//! struct Greeting;
//!
//! #[async_trait]
//! impl VariableResolver for Greeting {
//!     async fn can_resolve(
//!         &self,
//!         _: &ResolutionRequest,
//!         _: &VariableContext,
//!     ) -> Result<u32, ResolverError> {
//!         Ok(1)
//!     }
//!
//!     async fn resolve(
//!         &self,
//!         request: &ResolutionRequest,
//!         _: &VariableContext,
//!     ) -> Option<ResolvedVariable> {
//!         Some(ResolvedVariable::new(request.variable.clone(), "hello"))
//!     }
//! }
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let service = DefaultVariableService::new();
//! let greeting = VariableDefinition::new("demo", "Greeting", "Says hello");
//! service.register_resolver(&greeting, Arc::new(Greeting));
//!
//! let resolved = service
//!     .resolve_variable(VariableRef::from("greeting"), &VariableContext::new())
//!     .await
//!     .unwrap();
//! assert_eq!(resolved.value, "hello");
//! # });
//! ```

mod default_service;
mod disposable;
mod service;

pub use default_service::DefaultVariableService;
pub use disposable::Disposable;
pub use service::{ChangeListener, VariableService};
