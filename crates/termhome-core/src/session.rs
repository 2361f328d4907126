//! Terminal session controller.
//!
//! Owns the history, the output log and the single active prompt line, and
//! turns key presses into edits, history walks, completions and submissions.
//! A front-end feeds it [`Key`]s, forwards [`KeyOutcome::Submit`] lines to a
//! [`CommandTransport`], hands the result back through
//! [`Session::finish_submit`], and redraws from [`Session::log`] and
//! [`Session::prompt`].

use crate::completion::{complete, Completion};
use crate::error::TermError;
use crate::history::History;
use crate::output::{LineKind, OutputLine, OutputLog};
use crate::protocol::{CommandReply, CommandStatus};
use crate::transport::CommandTransport;

pub const DEFAULT_PROMPT: &str = "guest@terminal:~$ ";

const WELCOME: &str = r#"<span class="welcome">Welcome to Terminal Homepage!</span>"#;
const WELCOME_HINT: &str = r#"<span class="info">Type "help" for available commands.</span>"#;
const SCROLL_PAGE: usize = 10;

/// Front-end independent key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Up,
    Down,
    Tab,
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// State changed; redraw.
    Handled,
    /// Nothing to do (e.g. Enter on a blank line).
    Ignored,
    /// A trimmed, non-empty line was echoed and recorded; send it.
    Submit(String),
}

/// The active input paired with its static label. The cursor is a char index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    label: String,
    input: String,
    cursor: usize,
    generation: u64,
}

impl PromptLine {
    fn fresh(label: &str, generation: u64) -> Self {
        Self {
            label: label.to_string(),
            input: String::new(),
            cursor: 0,
            generation,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Bumped every time the prompt line is recreated.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the input and move the cursor to the end.
    pub fn set(&mut self, value: &str) {
        self.input = value.to_string();
        self.cursor = self.input.chars().count();
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.input.chars().count() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.input.remove(at);
        true
    }

    pub fn left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn right(&mut self) -> bool {
        if self.cursor >= self.input.chars().count() {
            return false;
        }
        self.cursor += 1;
        true
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    history: History,
    log: OutputLog,
    prompt: PromptLine,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPT)
    }
}

impl Session {
    /// New session with the welcome banner and one empty prompt line.
    pub fn new(prompt_label: &str) -> Self {
        let mut log = OutputLog::new();
        log.push(OutputLine::html(LineKind::Welcome, WELCOME));
        log.push(OutputLine::html(LineKind::Info, WELCOME_HINT));
        Self {
            history: History::new(),
            log,
            prompt: PromptLine::fresh(prompt_label, 0),
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn log(&self) -> &OutputLog {
        &self.log
    }

    pub fn prompt(&self) -> &PromptLine {
        &self.prompt
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        let changed = match key {
            Key::Enter => {
                return match self.begin_submit() {
                    Some(line) => KeyOutcome::Submit(line),
                    None => KeyOutcome::Ignored,
                };
            }
            Key::Up => self.history_older(),
            Key::Down => self.history_newer(),
            Key::Tab => self.autocomplete(),
            Key::Char(c) => {
                self.prompt.insert(c);
                true
            }
            Key::Backspace => self.prompt.backspace(),
            Key::Delete => self.prompt.delete(),
            Key::Left => self.prompt.left(),
            Key::Right => self.prompt.right(),
            Key::Home => {
                self.prompt.home();
                true
            }
            Key::End => {
                self.prompt.end();
                true
            }
            Key::PageUp => {
                self.log.scroll_up(SCROLL_PAGE);
                true
            }
            Key::PageDown => {
                self.log.scroll_down(SCROLL_PAGE);
                true
            }
        };
        if changed {
            KeyOutcome::Handled
        } else {
            KeyOutcome::Ignored
        }
    }

    /// First half of a submission: trim the input and, if anything is left,
    /// echo it and record it in history. Returns the line to send.
    pub fn begin_submit(&mut self) -> Option<String> {
        let line = self.prompt.input().trim().to_string();
        if line.is_empty() {
            return None;
        }
        self.log.push(OutputLine::text(
            LineKind::Echo,
            format!("{}{}", self.prompt.label(), line),
        ));
        self.history.push(line.clone());
        Some(line)
    }

    /// Second half of a submission: render the outcome, then start a fresh
    /// prompt line.
    pub fn finish_submit(&mut self, result: Result<CommandReply, TermError>) {
        match result {
            Ok(reply) => self.apply_reply(reply),
            Err(e) => {
                tracing::warn!(error = %e, "command request failed");
                self.log
                    .push(OutputLine::text(LineKind::Error, format!("Error: {}", e)));
            }
        }
        self.renew_prompt();
    }

    /// Full submission through `transport`. Returns false when the input was
    /// blank and nothing was sent.
    pub async fn submit<T>(&mut self, transport: &T) -> bool
    where
        T: CommandTransport + ?Sized,
    {
        let Some(line) = self.begin_submit() else {
            return false;
        };
        let result = transport.send(&line).await;
        self.finish_submit(result);
        true
    }

    pub fn apply_reply(&mut self, reply: CommandReply) {
        if reply.requests_clear() {
            self.clear();
            return;
        }
        match reply.status {
            CommandStatus::Success => {
                if let Some(output) = reply.output.filter(|o| !o.is_empty()) {
                    self.log.push(OutputLine::html(LineKind::Plain, output));
                }
            }
            CommandStatus::Error | CommandStatus::Unknown => {
                let output = reply
                    .output
                    .filter(|o| !o.is_empty())
                    .unwrap_or_else(|| "Command failed".to_string());
                self.log.push(OutputLine::html(LineKind::Error, output));
            }
            // requests_clear() already covered it.
            CommandStatus::Clear => {}
        }
    }

    /// Empty the log and leave a single fresh prompt line.
    pub fn clear(&mut self) {
        self.log.clear();
        self.renew_prompt();
    }

    fn renew_prompt(&mut self) {
        let generation = self.prompt.generation() + 1;
        self.prompt = PromptLine::fresh(self.prompt.label(), generation);
        self.log.scroll_to_bottom();
    }

    pub fn history_older(&mut self) -> bool {
        match self.history.older() {
            Some(entry) => {
                let entry = entry.to_string();
                self.prompt.set(&entry);
                true
            }
            None => false,
        }
    }

    pub fn history_newer(&mut self) -> bool {
        match self.history.newer() {
            Some(entry) => {
                let entry = entry.to_string();
                self.prompt.set(&entry);
                true
            }
            None => false,
        }
    }

    /// Tab: fill a unique match, list several, ignore none.
    pub fn autocomplete(&mut self) -> bool {
        match complete(self.prompt.input()) {
            Completion::Unique(cmd) => {
                self.prompt.set(cmd);
                true
            }
            Completion::Ambiguous(matches) => {
                self.log.push(OutputLine::text(
                    LineKind::Info,
                    format!("Possible commands: {}", matches.join(", ")),
                ));
                true
            }
            Completion::None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(s: &mut Session, text: &str) {
        for c in text.chars() {
            s.handle_key(Key::Char(c));
        }
    }

    #[test]
    fn starts_with_banner_and_empty_prompt() {
        let s = Session::default();
        assert_eq!(s.log().len(), 2);
        assert_eq!(s.log().lines()[0].kind, LineKind::Welcome);
        assert_eq!(s.prompt().input(), "");
        assert_eq!(s.prompt().label(), DEFAULT_PROMPT);
    }

    #[test]
    fn prompt_editing_is_char_aware() {
        let mut p = PromptLine::fresh("> ", 0);
        for c in "héllo".chars() {
            p.insert(c);
        }
        assert!(p.left());
        assert!(p.left());
        p.insert('X');
        assert_eq!(p.input(), "hélXlo");
        assert!(p.backspace());
        assert!(p.delete());
        assert_eq!(p.input(), "hélo");
        p.home();
        assert!(!p.backspace());
        assert!(!p.left());
        p.end();
        assert!(!p.delete());
        assert!(!p.right());
        assert_eq!(p.cursor(), 4);
    }

    #[test]
    fn enter_on_blank_line_is_ignored() {
        let mut s = Session::default();
        type_str(&mut s, "   ");
        assert_eq!(s.handle_key(Key::Enter), KeyOutcome::Ignored);
        assert!(s.history().is_empty());
        assert_eq!(s.log().len(), 2);
    }

    #[test]
    fn enter_echoes_trimmed_line_once() {
        let mut s = Session::default();
        type_str(&mut s, "  help  ");
        assert_eq!(s.handle_key(Key::Enter), KeyOutcome::Submit("help".into()));
        assert_eq!(s.history().entries(), ["help"]);
        let echo = s.log().last().unwrap();
        assert_eq!(echo.kind, LineKind::Echo);
        assert_eq!(echo.text, format!("{}help", DEFAULT_PROMPT));
    }

    #[test]
    fn finish_resets_prompt() {
        let mut s = Session::default();
        type_str(&mut s, "ls");
        s.handle_key(Key::Enter);
        let before = s.prompt().generation();
        s.finish_submit(Ok(CommandReply::success("a b c")));
        assert_eq!(s.prompt().input(), "");
        assert!(s.prompt().generation() > before);
        assert_eq!(s.log().last().unwrap().text, "a b c");
    }

    #[test]
    fn up_and_down_walk_history_into_the_prompt() {
        let mut s = Session::default();
        for cmd in ["help", "ls"] {
            type_str(&mut s, cmd);
            s.handle_key(Key::Enter);
            s.finish_submit(Ok(CommandReply::success("")));
        }
        assert_eq!(s.handle_key(Key::Up), KeyOutcome::Handled);
        assert_eq!(s.prompt().input(), "ls");
        s.handle_key(Key::Up);
        assert_eq!(s.prompt().input(), "help");
        assert_eq!(s.handle_key(Key::Up), KeyOutcome::Ignored);
        assert_eq!(s.prompt().input(), "help");
        s.handle_key(Key::Down);
        assert_eq!(s.prompt().input(), "ls");
        s.handle_key(Key::Down);
        assert_eq!(s.prompt().input(), "");
    }

    #[test]
    fn tab_fills_unique_match() {
        let mut s = Session::default();
        type_str(&mut s, "Who");
        assert_eq!(s.handle_key(Key::Tab), KeyOutcome::Handled);
        assert_eq!(s.prompt().input(), "whoami");
        assert_eq!(s.prompt().cursor(), 6);
    }

    #[test]
    fn tab_lists_several_matches() {
        let mut s = Session::default();
        type_str(&mut s, "h");
        s.handle_key(Key::Tab);
        let line = s.log().last().unwrap();
        assert_eq!(line.kind, LineKind::Info);
        assert_eq!(line.text, "Possible commands: help, history");
        assert_eq!(s.prompt().input(), "h");
    }

    #[test]
    fn tab_without_match_changes_nothing() {
        let mut s = Session::default();
        type_str(&mut s, "zzz");
        let lines = s.log().len();
        assert_eq!(s.handle_key(Key::Tab), KeyOutcome::Ignored);
        assert_eq!(s.log().len(), lines);
        assert_eq!(s.prompt().input(), "zzz");
    }

    #[test]
    fn error_reply_is_styled_and_defaulted() {
        let mut s = Session::default();
        s.apply_reply(CommandReply::error("Invalid command"));
        assert_eq!(s.log().last().unwrap().kind, LineKind::Error);
        s.apply_reply(CommandReply {
            status: CommandStatus::Unknown,
            output: None,
        });
        assert_eq!(s.log().last().unwrap().text, "Command failed");
    }

    #[test]
    fn empty_success_prints_nothing() {
        let mut s = Session::default();
        s.apply_reply(CommandReply {
            status: CommandStatus::Success,
            output: None,
        });
        s.apply_reply(CommandReply::success(""));
        assert_eq!(s.log().len(), 2);
    }

    #[test]
    fn transport_failure_is_one_error_line() {
        let mut s = Session::default();
        type_str(&mut s, "date");
        s.handle_key(Key::Enter);
        let before = s.log().len();
        s.finish_submit(Err(TermError::Decode("HTTP 500: eof".into())));
        assert_eq!(s.log().len(), before + 1);
        let line = s.log().last().unwrap();
        assert_eq!(line.kind, LineKind::Error);
        assert!(line.text.starts_with("Error: invalid response"));
    }

    #[test]
    fn page_keys_scroll_the_log() {
        let mut s = Session::default();
        for i in 0..30 {
            s.apply_reply(CommandReply::success(i.to_string()));
        }
        s.handle_key(Key::PageUp);
        assert_eq!(s.log().scrollback(), 10);
        s.handle_key(Key::PageDown);
        assert_eq!(s.log().scrollback(), 0);
    }
}
