//! Integration test: full submit cycle through a stub transport.
//!
//! Verifies that:
//! 1. A non-empty submission adds exactly one history entry and one echo line.
//! 2. A `CLEAR_TERMINAL` reply empties the log and leaves one fresh prompt.
//! 3. Transport failures become a single error line and the session carries on.
//! 4. The in-process command table and the session agree on the wire shape.

use std::sync::Mutex;

use termhome_core::{
    CommandReply, CommandTable, CommandTransport, Key, KeyOutcome, LineKind, Session, TermError,
    CLEAR_SENTINEL,
};

/// Replies from a fixed queue and records what it was sent.
struct StubTransport {
    replies: Mutex<Vec<Result<CommandReply, TermError>>>,
    sent: Mutex<Vec<String>>,
}

impl StubTransport {
    fn new(mut replies: Vec<Result<CommandReply, TermError>>) -> Self {
        replies.reverse();
        Self {
            replies: Mutex::new(replies),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CommandTransport for StubTransport {
    async fn send(&self, command: &str) -> Result<CommandReply, TermError> {
        self.sent.lock().unwrap().push(command.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Ok(CommandReply::success("")))
    }
}

/// Serves replies straight from a [`CommandTable`], as the gateway would.
struct TableTransport(CommandTable);

#[async_trait::async_trait]
impl CommandTransport for TableTransport {
    async fn send(&self, command: &str) -> Result<CommandReply, TermError> {
        let wire = serde_json::to_string(&self.0.execute(command)).unwrap();
        serde_json::from_str(&wire).map_err(|e| TermError::Decode(e.to_string()))
    }
}

fn type_line(session: &mut Session, text: &str) {
    for c in text.chars() {
        session.handle_key(Key::Char(c));
    }
}

fn echo_count(session: &Session) -> usize {
    session
        .log()
        .lines()
        .iter()
        .filter(|l| l.kind == LineKind::Echo)
        .count()
}

#[tokio::test]
async fn submit_records_one_history_entry_and_one_echo() {
    let transport = StubTransport::new(vec![Ok(CommandReply::success("<b>hi</b>"))]);
    let mut session = Session::default();

    type_line(&mut session, " echo hi ");
    assert!(session.submit(&transport).await);

    assert_eq!(transport.sent(), ["echo hi"]);
    assert_eq!(session.history().entries(), ["echo hi"]);
    assert_eq!(echo_count(&session), 1);
    assert_eq!(session.log().last().unwrap().plain(), "hi");
    assert_eq!(session.prompt().input(), "");
}

#[tokio::test]
async fn blank_submit_sends_nothing() {
    let transport = StubTransport::new(vec![]);
    let mut session = Session::default();

    type_line(&mut session, "    ");
    assert!(!session.submit(&transport).await);
    assert!(transport.sent().is_empty());
    assert!(session.history().is_empty());
    assert_eq!(echo_count(&session), 0);
}

#[tokio::test]
async fn clear_sentinel_leaves_single_fresh_prompt() {
    let transport = StubTransport::new(vec![
        Ok(CommandReply::success("some output")),
        Ok(CommandReply::success(CLEAR_SENTINEL)),
    ]);
    let mut session = Session::default();

    type_line(&mut session, "about");
    session.submit(&transport).await;
    type_line(&mut session, "clear");
    let generation = session.prompt().generation();
    session.submit(&transport).await;

    assert!(session.log().is_empty());
    assert_eq!(session.prompt().input(), "");
    assert!(session.prompt().generation() > generation);
    // History survives a clear.
    assert_eq!(session.history().entries(), ["about", "clear"]);
}

#[tokio::test]
async fn transport_error_is_a_single_line_and_not_retried() {
    let transport = StubTransport::new(vec![
        Err(TermError::Decode("HTTP 502: expected value".into())),
        Ok(CommandReply::success("ok")),
    ]);
    let mut session = Session::default();

    type_line(&mut session, "date");
    session.submit(&transport).await;
    assert_eq!(transport.sent(), ["date"]);
    let line = session.log().last().unwrap();
    assert_eq!(line.kind, LineKind::Error);
    assert!(line.text.starts_with("Error: "));

    type_line(&mut session, "date");
    session.submit(&transport).await;
    assert_eq!(session.log().last().unwrap().text, "ok");
}

#[tokio::test]
async fn enter_then_finish_matches_submit() {
    let mut session = Session::default();
    type_line(&mut session, "pwd");
    let KeyOutcome::Submit(line) = session.handle_key(Key::Enter) else {
        panic!("expected a submission");
    };
    assert_eq!(line, "pwd");
    // Echo is visible before the reply arrives.
    assert_eq!(session.log().last().unwrap().kind, LineKind::Echo);
    session.finish_submit(Ok(CommandReply::success("/home/guest")));
    assert_eq!(session.log().last().unwrap().text, "/home/guest");
}

#[tokio::test]
async fn table_backed_round_trip() {
    let table = CommandTable::new(
        [("whoami", "guest"), ("clear", "")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    );
    let transport = TableTransport(table);
    let mut session = Session::default();

    type_line(&mut session, "nope");
    session.submit(&transport).await;
    assert_eq!(session.log().last().unwrap().kind, LineKind::Error);
    assert_eq!(session.log().last().unwrap().text, "Invalid command");

    type_line(&mut session, "who");
    session.handle_key(Key::Tab);
    session.submit(&transport).await;
    assert_eq!(session.log().last().unwrap().text, "guest");

    type_line(&mut session, "CLEAR");
    session.submit(&transport).await;
    assert!(session.log().is_empty());
}

#[tokio::test]
async fn history_navigation_never_leaves_bounds() {
    let transport = StubTransport::new(vec![]);
    let mut session = Session::default();
    for cmd in ["help", "ls", "date"] {
        type_line(&mut session, cmd);
        session.submit(&transport).await;
    }

    let keys = [Key::Up; 6]
        .into_iter()
        .chain([Key::Down; 6])
        .chain([Key::Up, Key::Down, Key::Up]);
    for key in keys {
        session.handle_key(key);
        let h = session.history();
        assert!(h.cursor() <= h.len());
    }
    assert_eq!(session.prompt().input(), "date");
}
