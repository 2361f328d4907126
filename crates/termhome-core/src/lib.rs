//! termhome core library.
//! Session controller for the fake terminal, the `/api/command` wire protocol,
//! and the configured command table the gateway answers from.

pub mod completion;
pub mod config;
pub mod error;
pub mod history;
pub mod interpreter;
pub mod markup;
pub mod output;
pub mod protocol;
pub mod session;
pub mod transport;

pub use completion::{complete, Completion, ALLOWED_COMMANDS};
pub use config::{ConsoleConfig, HomeConfig, ServerSettings, TerminalSettings};
pub use error::TermError;
pub use history::History;
pub use interpreter::CommandTable;
pub use markup::{escape_html, to_plain};
pub use output::{LineKind, Markup, OutputLine, OutputLog};
pub use protocol::{CommandReply, CommandRequest, CommandStatus, CLEAR_SENTINEL, COMMAND_PATH};
pub use session::{Key, KeyOutcome, PromptLine, Session, DEFAULT_PROMPT};
pub use transport::{CommandTransport, HttpTransport};
