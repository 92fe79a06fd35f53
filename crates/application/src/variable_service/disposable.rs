//! Disposable registration handles

use std::fmt;

use parking_lot::Mutex;

type DisposeFn = Box<dyn FnOnce() + Send>;

/// Handle that undoes a registration when disposed.
///
/// Dropping the handle does not dispose it; registrations live until
/// [`Disposable::dispose`] is called explicitly. Disposing twice is a no-op.
pub struct Disposable {
    dispose: Mutex<Option<DisposeFn>>,
}

impl Disposable {
    /// Creates a handle running `dispose` on first disposal.
    pub fn new(dispose: impl FnOnce() + Send + 'static) -> Self {
        Self {
            dispose: Mutex::new(Some(Box::new(dispose))),
        }
    }

    /// Creates a handle that does nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self {
            dispose: Mutex::new(None),
        }
    }

    /// Runs the disposal action if it has not run yet.
    pub fn dispose(&self) {
        let action = self.dispose.lock().take();
        if let Some(action) = action {
            action();
        }
    }

    /// Returns true once the handle has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.dispose.lock().is_none()
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
