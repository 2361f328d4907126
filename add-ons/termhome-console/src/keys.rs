use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use termhome_core::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Key(Key),
    Quit,
    Ignore,
}

/// Esc and Ctrl-C quit; releases and unmapped keys are ignored.
pub fn map_key(event: KeyEvent) -> Input {
    if event.kind != KeyEventKind::Press {
        return Input::Ignore;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Input::Quit,
            _ => Input::Ignore,
        };
    }
    let key = match event.code {
        KeyCode::Esc => return Input::Quit,
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Char(c) => Key::Char(c),
        _ => return Input::Ignore,
    };
    Input::Key(key)
}
