//! Argument picker port

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use ctxvar_domain::VariableContext;

/// Supplies the argument a variable needs before it can be resolved.
///
/// Pickers are typically interactive. `None` means the user cancelled.
#[async_trait]
pub trait ArgumentPicker: Send + Sync {
    /// Asks for an argument.
    async fn pick(&self, context: &VariableContext) -> Option<String>;
}

/// Adapts an async closure into an [`ArgumentPicker`].
///
/// ```
/// use ctxvar_application::{ArgumentPicker, FnArgumentPicker};
/// use ctxvar_domain::VariableContext;
///
/// let picker = FnArgumentPicker::new(|_ctx: VariableContext| async { Some("/a/b.txt".to_string()) });
/// # let _ = &picker as &dyn ArgumentPicker;
/// ```
pub struct FnArgumentPicker<F> {
    pick: F,
}

impl<F> FnArgumentPicker<F> {
    /// Wraps the closure.
    pub const fn new(pick: F) -> Self {
        Self { pick }
    }
}

impl<F> fmt::Debug for FnArgumentPicker<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnArgumentPicker").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F, Fut> ArgumentPicker for FnArgumentPicker<F>
where
    F: Fn(VariableContext) -> Fut + Send + Sync,
    Fut: Future<Output = Option<String>> + Send + 'static,
{
    async fn pick(&self, context: &VariableContext) -> Option<String> {
        (self.pick)(context.clone()).await
    }
}
