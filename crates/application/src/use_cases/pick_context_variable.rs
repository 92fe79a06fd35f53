//! Pick context variable use case

use ctxvar_domain::{ResolutionRequest, VariableContext, VariableDefinition};
use tracing::debug;

use crate::ports::{QuickInput, QuickPickItem};
use crate::variable_service::VariableService;

/// Context `type` passed to argument pickers invoked from this flow.
pub const CONTEXT_VARIABLE_PICKER: &str = "context-variable-picker";

const PLACEHOLDER: &str = "Select a context variable to be attached to the message";

/// Lets the user choose a variable and, if it needs one, its argument.
///
/// The result is a request ready to be attached to a chat message. `None`
/// means the user dismissed a selection or cancelled the argument picker.
pub struct PickContextVariable<S, Q> {
    service: S,
    quick_input: Q,
}

impl<S: VariableService, Q: QuickInput> PickContextVariable<S, Q> {
    /// Creates a new `PickContextVariable` use case.
    pub const fn new(service: S, quick_input: Q) -> Self {
        Self {
            service,
            quick_input,
        }
    }

    /// Executes the use case.
    pub async fn execute(&self) -> Option<ResolutionRequest> {
        let mut variables = self.service.get_variables();
        variables.sort_by(|a, b| a.display_label().cmp(b.display_label()));

        let items = variables.iter().map(variable_item).collect();
        let selected = self.quick_input.show_quick_pick(items, PLACEHOLDER).await?;
        let variable = variables.into_iter().find(|v| v.name == selected)?;

        if !variable.takes_argument() {
            return Some(ResolutionRequest::new(variable));
        }

        let context = VariableContext::of_type(CONTEXT_VARIABLE_PICKER);
        let Some(picker) = self
            .service
            .get_argument_picker(&variable.name, &context)
            .await
        else {
            // No dedicated picker: offer the declared arguments themselves.
            let items = variable
                .args
                .iter()
                .map(|arg| QuickPickItem::new(&arg.name, arg.display_label()))
                .collect();
            let arg = self.quick_input.show_quick_pick(items, PLACEHOLDER).await;
            return Some(ResolutionRequest::with_arg(variable, arg));
        };

        let Some(arg) = picker.pick(&context).await.filter(|arg| !arg.is_empty()) else {
            debug!(variable = %variable.name, "argument selection cancelled");
            return None;
        };
        Some(ResolutionRequest::with_arg(variable, Some(arg)))
    }
}

fn variable_item(variable: &VariableDefinition) -> QuickPickItem {
    let item = QuickPickItem::new(&variable.name, variable.display_label());
    if variable.description.is_empty() {
        item
    } else {
        item.with_detail(&variable.description)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ports::{FnArgumentPicker, ResolverError, VariableResolver};
    use crate::variable_service::DefaultVariableService;
    use async_trait::async_trait;
    use ctxvar_domain::ResolvedVariable;
    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Arc;

    /// Quick input answering from a script and recording what it was shown.
    struct ScriptedQuickInput {
        answers: Mutex<VecDeque<Option<String>>>,
        shown: Mutex<Vec<Vec<QuickPickItem>>>,
    }

    impl ScriptedQuickInput {
        fn new(answers: &[Option<&str>]) -> Self {
            Self {
                answers: Mutex::new(
                    answers
                        .iter()
                        .map(|answer| answer.map(str::to_string))
                        .collect(),
                ),
                shown: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl QuickInput for ScriptedQuickInput {
        async fn show_quick_pick(
            &self,
            items: Vec<QuickPickItem>,
            placeholder: &str,
        ) -> Option<String> {
            assert_eq!(placeholder, PLACEHOLDER);
            self.shown.lock().push(items);
            self.answers.lock().pop_front().flatten()
        }
    }

    struct Unused;

    #[async_trait]
    impl VariableResolver for Unused {
        async fn can_resolve(
            &self,
            _: &ResolutionRequest,
            _: &VariableContext,
        ) -> Result<u32, ResolverError> {
            Ok(1)
        }

        async fn resolve(
            &self,
            _: &ResolutionRequest,
            _: &VariableContext,
        ) -> Option<ResolvedVariable> {
            None
        }
    }

    fn file_variable() -> VariableDefinition {
        VariableDefinition::new("file-provider", "file", "Resolves the contents of a file")
            .with_arg("uri", "The URI of the requested file.")
    }

    fn today_variable() -> VariableDefinition {
        VariableDefinition::new("today-provider", "today", "Current date").with_label("Today")
    }

    fn service() -> DefaultVariableService {
        let service = DefaultVariableService::new();
        service.register_resolver(&file_variable(), Arc::new(Unused));
        service.register_resolver(&today_variable(), Arc::new(Unused));
        service
    }

    #[tokio::test]
    async fn dismissing_variable_selection_yields_nothing() {
        let input = ScriptedQuickInput::new(&[None]);
        let use_case = PickContextVariable::new(service(), input);

        assert_eq!(use_case.execute().await, None);

        let shown = use_case.quick_input.shown.lock();
        assert_eq!(shown[0].len(), 2);
        assert_eq!(shown[0][1].label, "file");
        assert_eq!(shown[0][0].label, "Today");
        assert_eq!(shown[0][0].detail.as_deref(), Some("Current date"));
    }

    #[tokio::test]
    async fn variable_without_args_needs_no_argument() {
        let input = ScriptedQuickInput::new(&[Some("today")]);
        let use_case = PickContextVariable::new(service(), input);

        let request = use_case.execute().await.unwrap();
        assert_eq!(request, ResolutionRequest::new(today_variable()));
        assert_eq!(use_case.quick_input.shown.lock().len(), 1);
    }

    #[tokio::test]
    async fn declared_args_are_offered_without_picker() {
        let input = ScriptedQuickInput::new(&[Some("file"), Some("uri")]);
        let use_case = PickContextVariable::new(service(), input);

        let request = use_case.execute().await.unwrap();
        assert_eq!(request.arg.as_deref(), Some("uri"));

        let shown = use_case.quick_input.shown.lock();
        assert_eq!(
            shown[1],
            vec![QuickPickItem::new("uri", "uri: The URI of the requested file.")]
        );
    }

    #[tokio::test]
    async fn dismissed_arg_selection_keeps_variable() {
        let input = ScriptedQuickInput::new(&[Some("file"), None]);
        let use_case = PickContextVariable::new(service(), input);

        let request = use_case.execute().await.unwrap();
        assert_eq!(request, ResolutionRequest::new(file_variable()));
    }

    #[tokio::test]
    async fn argument_picker_supplies_argument() {
        let service = service();
        service.register_argument_picker(
            &file_variable(),
            Arc::new(FnArgumentPicker::new(|ctx: VariableContext| async move {
                assert_eq!(ctx.kind(), Some(CONTEXT_VARIABLE_PICKER));
                Some("/a/b.txt".to_string())
            })),
        );
        let input = ScriptedQuickInput::new(&[Some("file")]);
        let use_case = PickContextVariable::new(service, input);

        let request = use_case.execute().await.unwrap();
        assert_eq!(request.arg.as_deref(), Some("/a/b.txt"));
    }

    #[tokio::test]
    async fn cancelled_argument_picker_yields_nothing() {
        let service = service();
        service.register_argument_picker(
            &file_variable(),
            Arc::new(FnArgumentPicker::new(|_: VariableContext| async { None })),
        );
        let input = ScriptedQuickInput::new(&[Some("file")]);
        let use_case = PickContextVariable::new(service, input);

        assert_eq!(use_case.execute().await, None);
    }

    #[tokio::test]
    async fn empty_argument_counts_as_cancelled() {
        let service = service();
        service.register_argument_picker(
            &file_variable(),
            Arc::new(FnArgumentPicker::new(|_: VariableContext| async {
                Some(String::new())
            })),
        );
        let input = ScriptedQuickInput::new(&[Some("file")]);
        let use_case = PickContextVariable::new(service, input);

        assert_eq!(use_case.execute().await, None);
    }
}
