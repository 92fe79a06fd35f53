//! `#today` variable contribution

use std::sync::Arc;

use async_trait::async_trait;
use chrono::SecondsFormat;
use ctxvar_domain::{ResolutionRequest, ResolvedVariable, VariableContext, VariableDefinition};

use crate::ports::{Clock, ResolverError, VariableContribution, VariableResolver};
use crate::variable_service::VariableService;

/// Provider id of the today variable.
pub const TODAY_VARIABLE_ID: &str = "today-provider";
/// Name of the today variable.
pub const TODAY_VARIABLE_NAME: &str = "today";
/// Argument selecting ISO 8601 output.
pub const TODAY_IN_ISO_8601_ARG: &str = "inIso8601";
/// Argument selecting Unix seconds output.
pub const TODAY_IN_UNIX_SECONDS_ARG: &str = "inUnixSeconds";

/// Definition of the `today` variable.
#[must_use]
pub fn today_variable() -> VariableDefinition {
    VariableDefinition::new(TODAY_VARIABLE_ID, TODAY_VARIABLE_NAME, "Resolves the current date")
        .with_arg(TODAY_IN_ISO_8601_ARG, "The date formatted in ISO 8601 format")
        .with_arg(TODAY_IN_UNIX_SECONDS_ARG, "The date formatted in Unix seconds format")
}

/// Resolves `#today` to the current date.
pub struct TodayVariableContribution<C> {
    clock: C,
}

impl<C: Clock> TodayVariableContribution<C> {
    /// Creates the contribution.
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    fn format(&self, arg: Option<&str>) -> String {
        let now = self.clock.now();
        match arg {
            Some(TODAY_IN_ISO_8601_ARG) => now.to_rfc3339_opts(SecondsFormat::Millis, true),
            Some(TODAY_IN_UNIX_SECONDS_ARG) => now.timestamp().to_string(),
            _ => now.format("%a %b %d %Y").to_string(),
        }
    }
}

impl<C: Clock + 'static> VariableContribution for TodayVariableContribution<C> {
    fn register_variables(self: Arc<Self>, service: &dyn VariableService) {
        service.register_resolver(&today_variable(), self);
    }
}

#[async_trait]
impl<C: Clock + 'static> VariableResolver for TodayVariableContribution<C> {
    async fn can_resolve(
        &self,
        request: &ResolutionRequest,
        _context: &VariableContext,
    ) -> Result<u32, ResolverError> {
        Ok(u32::from(request.variable.name == TODAY_VARIABLE_NAME))
    }

    async fn resolve(
        &self,
        request: &ResolutionRequest,
        _context: &VariableContext,
    ) -> Option<ResolvedVariable> {
        (request.variable.name == TODAY_VARIABLE_NAME)
            .then(|| ResolvedVariable::new(request.variable.clone(), self.format(request.arg())))
    }
}
