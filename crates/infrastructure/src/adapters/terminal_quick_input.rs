//! Terminal quick input adapter
//!
//! Prints a numbered list on stderr and reads the choice from stdin, so the
//! chosen value can be piped from stdout.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use async_trait::async_trait;
use ctxvar_application::ports::{QuickInput, QuickPickItem};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin};
use tokio::sync::Mutex;
use tracing::warn;

/// Line-based quick pick over stdin/stderr.
///
/// Clones share one buffered reader, so answers piped in ahead of later
/// prompts are not lost between calls.
pub struct TerminalQuickInput<R = BufReader<Stdin>> {
    reader: Arc<Mutex<R>>,
}

impl TerminalQuickInput {
    /// Creates a quick input reading answers from stdin.
    #[must_use]
    pub fn new() -> Self {
        Self::with_reader(BufReader::new(tokio::io::stdin()))
    }
}

impl Default for TerminalQuickInput {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> TerminalQuickInput<R> {
    /// Creates a quick input reading answers from `reader`.
    #[must_use]
    pub fn with_reader(reader: R) -> Self {
        Self {
            reader: Arc::new(Mutex::new(reader)),
        }
    }
}

impl<R> Clone for TerminalQuickInput<R> {
    fn clone(&self) -> Self {
        Self {
            reader: Arc::clone(&self.reader),
        }
    }
}

impl<R> fmt::Debug for TerminalQuickInput<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalQuickInput").finish_non_exhaustive()
    }
}

/// Renders the prompt shown for `items`.
fn render(items: &[QuickPickItem], placeholder: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{placeholder}");
    for (index, item) in items.iter().enumerate() {
        let _ = match &item.detail {
            Some(detail) => writeln!(out, "  {:>3}) {}  ({detail})", index + 1, item.label),
            None => writeln!(out, "  {:>3}) {}", index + 1, item.label),
        };
    }
    out.push_str("> ");
    out
}

/// Maps an answer line to the chosen item id.
///
/// Accepts a 1-based index or an item id. Blank input dismisses.
fn parse_selection(line: &str, items: &[QuickPickItem]) -> Option<String> {
    let answer = line.trim();
    if answer.is_empty() {
        return None;
    }
    if let Ok(index) = answer.parse::<usize>() {
        return index
            .checked_sub(1)
            .and_then(|i| items.get(i))
            .map(|item| item.id.clone());
    }
    items
        .iter()
        .find(|item| item.id == answer)
        .map(|item| item.id.clone())
}

#[async_trait]
impl<R> QuickInput for TerminalQuickInput<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    async fn show_quick_pick(
        &self,
        items: Vec<QuickPickItem>,
        placeholder: &str,
    ) -> Option<String> {
        if items.is_empty() {
            return None;
        }

        let mut stderr = tokio::io::stderr();
        if let Err(error) = stderr.write_all(render(&items, placeholder).as_bytes()).await {
            warn!(%error, "failed to write quick pick");
            return None;
        }
        let _ = stderr.flush().await;

        let mut line = String::new();
        let mut reader = self.reader.lock().await;
        match reader.read_line(&mut line).await {
            Ok(0) => None,
            Ok(_) => parse_selection(&line, &items),
            Err(error) => {
                warn!(%error, "failed to read quick pick answer");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn items() -> Vec<QuickPickItem> {
        vec![
            QuickPickItem::new("file", "file").with_detail("Resolves the contents of a file"),
            QuickPickItem::new("today", "Today"),
        ]
    }

    #[test]
    fn renders_numbered_list() {
        let prompt = render(&items(), "Pick one");
        assert_eq!(
            prompt,
            "Pick one\n    1) file  (Resolves the contents of a file)\n    2) Today\n> "
        );
    }

    #[test]
    fn selects_by_index_or_id() {
        assert_eq!(parse_selection("2\n", &items()).as_deref(), Some("today"));
        assert_eq!(parse_selection(" file ", &items()).as_deref(), Some("file"));
    }

    #[test]
    fn blank_or_out_of_range_dismisses() {
        assert_eq!(parse_selection("\n", &items()), None);
        assert_eq!(parse_selection("0", &items()), None);
        assert_eq!(parse_selection("3", &items()), None);
        assert_eq!(parse_selection("Today", &items()), None);
    }

    #[tokio::test]
    async fn piped_answers_reach_successive_prompts() {
        let input = TerminalQuickInput::with_reader(BufReader::new(&b"file\n2\n"[..]));
        let argument_picker = input.clone();

        assert_eq!(
            input.show_quick_pick(items(), "Pick a variable").await.as_deref(),
            Some("file")
        );
        assert_eq!(
            argument_picker
                .show_quick_pick(items(), "Pick an argument")
                .await
                .as_deref(),
            Some("today")
        );
        assert_eq!(input.show_quick_pick(items(), "Pick again").await, None);
    }
}
