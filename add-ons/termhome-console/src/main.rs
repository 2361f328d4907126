//! termhome-console: terminal homepage in the terminal.
//! Talks to a running termhome gateway (`TERMHOME_URL`) over `/api/command`.

use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::time::Duration;
use termhome_console::{draw, enter_screen, map_key, Input};
use termhome_core::{CommandTransport, ConsoleConfig, HttpTransport, KeyOutcome, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ConsoleConfig::from_env();

    // stdout belongs to the TUI; logs go to a file.
    let log_dir = cfg
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let log_name = cfg
        .log_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "termhome-console.log".into());
    let (writer, _guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, log_name));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    let transport = HttpTransport::new(&cfg.gateway_url);
    tracing::info!(endpoint = %transport.endpoint(), "console started");
    let mut session = Session::new(&cfg.prompt);

    // Dropped last: restores the terminal on every exit path, panics included.
    let _screen = enter_screen()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    run(&mut terminal, &mut session, &transport).await
}

async fn run(
    terminal: &mut Tui,
    session: &mut Session,
    transport: &impl CommandTransport,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| draw(f, session, false))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let key = match map_key(key) {
            Input::Quit => return Ok(()),
            Input::Ignore => continue,
            Input::Key(key) => key,
        };

        if let KeyOutcome::Submit(line) = session.handle_key(key) {
            // Show the echo while the single request is in flight.
            terminal.draw(|f| draw(f, session, true))?;
            let reply = transport.send(&line).await;
            session.finish_submit(reply);
        }
    }
}
