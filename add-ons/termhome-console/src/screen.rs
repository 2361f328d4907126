//! Raw mode and the alternate screen, undone on drop.

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, stdout};

/// Runs `restore` once when dropped, including while unwinding from a panic.
pub struct ScreenGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> ScreenGuard<F> {
    pub fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for ScreenGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Enables raw mode and enters the alternate screen. The guard is armed as
/// soon as raw mode is on, so a failure after that still restores the terminal.
pub fn enter_screen() -> io::Result<ScreenGuard<fn()>> {
    enable_raw_mode()?;
    let guard = ScreenGuard::new(restore_screen as fn());
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(guard)
}

pub fn restore_screen() {
    if let Err(e) = disable_raw_mode() {
        tracing::warn!(error = %e, "failed to leave raw mode");
    }
    if let Err(e) = execute!(stdout(), LeaveAlternateScreen, Show) {
        tracing::warn!(error = %e, "failed to leave alternate screen");
    }
}
