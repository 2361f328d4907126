//! Drawing: header plus the terminal pane (log rows, then the prompt line).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use termhome_core::{LineKind, Session};

fn style_for(kind: LineKind) -> Style {
    match kind {
        LineKind::Plain => Style::default().fg(Color::Gray),
        LineKind::Welcome => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        LineKind::Info => Style::default().fg(Color::DarkGray),
        LineKind::Echo => Style::default().fg(Color::Green),
        LineKind::Error => Style::default().fg(Color::Red),
    }
}

pub fn draw(f: &mut Frame, session: &Session, pending: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(f.area());

    render_header(f, chunks[0], pending);
    render_terminal(f, chunks[1], session);
}

fn render_header(f: &mut Frame, area: Rect, pending: bool) {
    let mut spans = vec![
        Span::styled("Terminal Home", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(
            "  Enter run | Tab complete | Up/Down history | PgUp/PgDn scroll | Esc quit",
            Style::default().fg(Color::Gray),
        ),
    ];
    if pending {
        spans.push(Span::styled("  waiting for gateway...", Style::default().fg(Color::Yellow)));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

/// Log rows that fit above the prompt in a pane `height` rows tall. HTML lines
/// are flattened and may span several rows; the newest rows win.
pub fn log_rows(session: &Session, height: usize) -> Vec<(LineKind, String)> {
    let room = height.saturating_sub(1);
    let mut rows: Vec<(LineKind, String)> = session
        .log()
        .window(room)
        .iter()
        .flat_map(|line| {
            let kind = line.kind;
            line.plain()
                .split('\n')
                .map(|row| (kind, row.to_string()))
                .collect::<Vec<_>>()
        })
        .collect();
    let overflow = rows.len().saturating_sub(room);
    rows.drain(..overflow);
    rows
}

fn render_terminal(f: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default().borders(Borders::ALL).title(" Terminal ");
    let inner = block.inner(area);

    let rows = log_rows(session, inner.height as usize);
    let mut lines: Vec<Line> = rows
        .iter()
        .map(|(kind, text)| Line::from(Span::styled(text.clone(), style_for(*kind))))
        .collect();

    let prompt = session.prompt();
    lines.push(Line::from(vec![
        Span::styled(prompt.label().to_string(), style_for(LineKind::Echo)),
        Span::raw(prompt.input().to_string()),
    ]));

    f.render_widget(Paragraph::new(lines).block(block), area);

    let before_cursor: String = prompt
        .label()
        .chars()
        .chain(prompt.input().chars().take(prompt.cursor()))
        .collect();
    let offset = Span::raw(before_cursor).width() as u16;
    let x = (inner.x + offset).min(inner.right().saturating_sub(1));
    let y = inner.y + rows.len() as u16;
    f.set_cursor_position((x, y));
}
