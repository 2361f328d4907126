//! Output log: the additive list of rendered lines plus the viewport position.

use crate::markup;

/// Styling class of a log line (`output-line <kind>` in the browser page).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Plain,
    Welcome,
    Info,
    /// Echo of a submitted command, prompt included.
    Echo,
    Error,
}

/// Whether a line's text is a pre-approved HTML fragment or literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    Text,
    Html,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub kind: LineKind,
    pub markup: Markup,
}

impl OutputLine {
    pub fn text(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind,
            markup: Markup::Text,
        }
    }

    pub fn html(kind: LineKind, fragment: impl Into<String>) -> Self {
        Self {
            text: fragment.into(),
            kind,
            markup: Markup::Html,
        }
    }

    /// The line as terminal text, HTML flattened.
    pub fn plain(&self) -> String {
        match self.markup {
            Markup::Text => self.text.clone(),
            Markup::Html => markup::to_plain(&self.text),
        }
    }
}

/// Ordered log of rendered lines. Appending always re-pins the viewport to the
/// newest line; `scroll_up`/`scroll_down` move a scrollback offset counted in
/// lines from the bottom.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    lines: Vec<OutputLine>,
    scrollback: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: OutputLine) {
        self.lines.push(line);
        self.scroll_to_bottom();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.scrollback = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scrollback = 0;
    }

    /// Scrolls towards older lines; the oldest line always stays in view.
    pub fn scroll_up(&mut self, by: usize) {
        self.scrollback = (self.scrollback + by).min(self.lines.len().saturating_sub(1));
    }

    pub fn scroll_down(&mut self, by: usize) {
        self.scrollback = self.scrollback.saturating_sub(by);
    }

    pub fn scrollback(&self) -> usize {
        self.scrollback
    }

    /// The slice of lines that fits in `height` rows at the current position.
    pub fn window(&self, height: usize) -> &[OutputLine] {
        let end = self.lines.len().saturating_sub(self.scrollback);
        let start = end.saturating_sub(height);
        &self.lines[start..end]
    }

    pub fn lines(&self) -> &[OutputLine] {
        &self.lines
    }

    pub fn last(&self) -> Option<&OutputLine> {
        self.lines.last()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
