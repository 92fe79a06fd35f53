//! Quick input port

use async_trait::async_trait;

/// One entry offered in a quick pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickPickItem {
    /// Identifier returned when the item is chosen.
    pub id: String,
    /// Primary text.
    pub label: String,
    /// Secondary text.
    pub detail: Option<String>,
}

impl QuickPickItem {
    /// Creates an item without detail text.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            detail: None,
        }
    }

    /// Sets the detail text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Interactive single-choice selection.
#[async_trait]
pub trait QuickInput: Send + Sync {
    /// Shows `items` and returns the id of the chosen one, or `None` when the
    /// selection was dismissed.
    async fn show_quick_pick(&self, items: Vec<QuickPickItem>, placeholder: &str)
    -> Option<String>;
}
