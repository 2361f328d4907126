//! termhome-console: Ratatui front-end for the terminal homepage.
//!
//! Keys are translated into session keys; the session does the rest and the
//! UI redraws from its log and prompt line.

pub mod keys;
pub mod screen;
pub mod ui;

pub use keys::{map_key, Input};
pub use screen::{enter_screen, restore_screen, ScreenGuard};
pub use ui::{draw, log_rows};
