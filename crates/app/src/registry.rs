//! Registry bootstrap

use std::sync::Arc;

use ctxvar_application::ports::{QuickInput, VariableContribution};
use ctxvar_application::{
    DefaultVariableService, FileVariableContribution, TodayVariableContribution, VariableService,
};
use ctxvar_domain::Settings;
use ctxvar_infrastructure::{SystemClock, TerminalQuickInput, TokioFileSystem};
use tracing::info;

/// Builds the registry with the built-in contributions, using the terminal
/// for interactive argument picking.
#[must_use]
pub fn build_service(settings: &Settings) -> DefaultVariableService {
    build_service_with(settings, TerminalQuickInput::new())
}

/// Builds the registry with a custom quick input for the file picker.
///
/// Variables listed in `disabled_variables` are removed once all
/// contributions have registered.
pub fn build_service_with<Q>(settings: &Settings, quick_input: Q) -> DefaultVariableService
where
    Q: QuickInput + 'static,
{
    let file = FileVariableContribution::new(
        TokioFileSystem::new(),
        quick_input,
        settings.workspace_roots.clone(),
        settings.max_context_bytes,
    );
    let today = TodayVariableContribution::new(SystemClock::new());

    let contributions: [Arc<dyn VariableContribution>; 2] = [Arc::new(file), Arc::new(today)];
    let service = DefaultVariableService::with_contributions(contributions);

    for name in &settings.disabled_variables {
        if service.has_variable(name) {
            service.unregister_variable(name);
            info!(variable = %name, "variable disabled by settings");
        }
    }
    service
}
