//! `#file` variable contribution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use ctxvar_domain::{ResolutionRequest, ResolvedVariable, VariableContext, VariableDefinition};
use tracing::{debug, warn};

use crate::ports::{
    ArgumentPicker, FileSystem, QuickInput, QuickPickItem, ResolverError, VariableContribution,
    VariableResolver,
};
use crate::variable_service::VariableService;

/// Provider id of the file variable.
pub const FILE_VARIABLE_ID: &str = "file-provider";
/// Name of the file variable.
pub const FILE_VARIABLE_NAME: &str = "file";
/// Name of the file variable's only argument.
pub const FILE_URI_ARG: &str = "uri";

const FILE_URI_SCHEME: &str = "file://";
const FILE_PICKER_PLACEHOLDER: &str = "Select a file to attach";

/// Definition of the `file` variable.
#[must_use]
pub fn file_variable() -> VariableDefinition {
    VariableDefinition::new(
        FILE_VARIABLE_ID,
        FILE_VARIABLE_NAME,
        "Resolves the contents of a file",
    )
    .with_arg(FILE_URI_ARG, "The URI of the requested file.")
}

/// Resolves `#file:<path>` to a workspace-relative path, with the file
/// contents as context value.
///
/// Registers itself both as resolver and as argument picker of the `file`
/// variable.
pub struct FileVariableContribution<F, Q> {
    file_system: F,
    quick_input: Q,
    workspace_roots: Vec<PathBuf>,
    max_context_bytes: usize,
}

impl<F: FileSystem, Q: QuickInput> FileVariableContribution<F, Q> {
    /// Creates the contribution.
    pub const fn new(
        file_system: F,
        quick_input: Q,
        workspace_roots: Vec<PathBuf>,
        max_context_bytes: usize,
    ) -> Self {
        Self {
            file_system,
            quick_input,
            workspace_roots,
            max_context_bytes,
        }
    }

    /// Finds the file an argument points to.
    ///
    /// Relative paths are looked up below each workspace root in order.
    async fn locate(&self, arg: &str) -> Option<PathBuf> {
        let path = Path::new(arg.strip_prefix(FILE_URI_SCHEME).unwrap_or(arg));
        if path.as_os_str().is_empty() {
            return None;
        }

        if path.is_absolute() {
            return self
                .file_system
                .is_file(path)
                .await
                .then(|| path.to_path_buf());
        }

        for root in &self.workspace_roots {
            let candidate = root.join(path);
            if self.file_system.is_file(&candidate).await {
                return Some(candidate);
            }
        }
        None
    }

    /// Path relative to the first workspace root containing it.
    fn workspace_relative(&self, path: &Path) -> String {
        self.workspace_roots
            .iter()
            .find_map(|root| path.strip_prefix(root).ok())
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

/// Shortens `text` to at most `max` bytes without splitting a character.
fn truncate_at_char_boundary(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

impl<F, Q> VariableContribution for FileVariableContribution<F, Q>
where
    F: FileSystem + 'static,
    Q: QuickInput + 'static,
{
    fn register_variables(self: Arc<Self>, service: &dyn VariableService) {
        let variable = file_variable();
        service.register_resolver(&variable, Arc::clone(&self) as Arc<dyn VariableResolver>);
        service.register_argument_picker(&variable, self);
    }
}

#[async_trait]
impl<F, Q> VariableResolver for FileVariableContribution<F, Q>
where
    F: FileSystem + 'static,
    Q: QuickInput + 'static,
{
    async fn can_resolve(
        &self,
        request: &ResolutionRequest,
        _context: &VariableContext,
    ) -> Result<u32, ResolverError> {
        Ok(u32::from(request.variable.name == FILE_VARIABLE_NAME))
    }

    async fn resolve(
        &self,
        request: &ResolutionRequest,
        _context: &VariableContext,
    ) -> Option<ResolvedVariable> {
        if request.variable.name != FILE_VARIABLE_NAME {
            return None;
        }
        let arg = request.arg()?;
        let Some(path) = self.locate(arg).await else {
            debug!(arg, "file variable target does not exist");
            return None;
        };

        let contents = match self.file_system.read_file_string(&path).await {
            Ok(contents) => contents,
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to read file variable");
                return None;
            }
        };

        let value = self.workspace_relative(&path);
        let contents = truncate_at_char_boundary(contents, self.max_context_bytes);
        Some(ResolvedVariable::new(request.variable.clone(), value).with_context_value(contents))
    }
}

#[async_trait]
impl<F, Q> ArgumentPicker for FileVariableContribution<F, Q>
where
    F: FileSystem + 'static,
    Q: QuickInput + 'static,
{
    async fn pick(&self, _context: &VariableContext) -> Option<String> {
        let mut items = Vec::new();
        for root in &self.workspace_roots {
            match self.file_system.list_files(root).await {
                Ok(files) => items.extend(files.iter().map(|file| {
                    QuickPickItem::new(file.display().to_string(), self.workspace_relative(file))
                        .with_detail(root.display().to_string())
                })),
                Err(error) => warn!(root = %root.display(), %error, "failed to list workspace files"),
            }
        }

        if items.is_empty() {
            debug!("no files to pick from");
            return None;
        }
        items.sort_by(|a, b| a.label.cmp(&b.label));

        self.quick_input
            .show_quick_pick(items, FILE_PICKER_PLACEHOLDER)
            .await
    }
}
