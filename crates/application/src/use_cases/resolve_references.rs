//! Resolve references use case
//!
//! Expands `#name[:arg]` references in free text through the variable
//! service.

use ctxvar_domain::{ResolvedVariable, VariableContext, VariableRef};
use futures::future::join_all;
use tracing::debug;

use crate::error::{ApplicationError, ApplicationResult};
use crate::references::parse_references;
use crate::variable_service::VariableService;

/// Output of reference expansion for a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveReferencesOutput {
    /// The text with every resolved reference replaced by its value.
    pub expanded: String,

    /// Variables that were successfully resolved, in text order.
    pub resolved: Vec<ResolvedVariable>,

    /// References left untouched because they produced no value.
    pub unresolved: Vec<String>,

    /// Whether every reference was resolved.
    pub is_complete: bool,
}

impl ResolveReferencesOutput {
    fn unchanged(text: &str) -> Self {
        Self {
            expanded: text.to_string(),
            resolved: Vec::new(),
            unresolved: Vec::new(),
            is_complete: true,
        }
    }
}

/// Use case for resolving variable references.
pub struct ResolveReferences<S> {
    service: S,
}

impl<S: VariableService> ResolveReferences<S> {
    /// Creates a new `ResolveReferences` use case.
    pub const fn new(service: S) -> Self {
        Self { service }
    }

    /// Expands all references found in `text`.
    ///
    /// References are resolved concurrently. Unresolved references stay in
    /// the text verbatim.
    pub async fn execute(&self, text: &str, context: &VariableContext) -> ResolveReferencesOutput {
        let references = parse_references(text);
        if references.is_empty() {
            return ResolveReferencesOutput::unchanged(text);
        }

        let values = join_all(references.iter().map(|reference| {
            self.service
                .resolve_variable(reference.to_variable_ref(), context)
        }))
        .await;

        let mut expanded = String::with_capacity(text.len());
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        let mut last_end = 0;

        for (reference, value) in references.iter().zip(values) {
            expanded.push_str(&text[last_end..reference.span.start]);
            if let Some(variable) = value {
                expanded.push_str(&variable.value);
                resolved.push(variable);
            } else {
                let raw = &text[reference.span.clone()];
                debug!(reference = raw, "reference left unresolved");
                expanded.push_str(raw);
                unresolved.push(raw.to_string());
            }
            last_end = reference.span.end;
        }
        expanded.push_str(&text[last_end..]);

        let is_complete = unresolved.is_empty();
        ResolveReferencesOutput {
            expanded,
            resolved,
            unresolved,
            is_complete,
        }
    }

    /// Resolves a single reference such as `file:/a/b.txt` or `#today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is malformed or yields no value.
    pub async fn resolve_one(
        &self,
        reference: &str,
        context: &VariableContext,
    ) -> ApplicationResult<ResolvedVariable> {
        let reference: VariableRef = reference.parse()?;
        let name = reference.name().to_string();
        self.service
            .resolve_variable(reference, context)
            .await
            .ok_or(ApplicationError::NoValue(name))
    }
}
