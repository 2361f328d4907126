//! Server-side command table: resolves a submitted line to a reply.

use std::collections::BTreeMap;

use crate::config::HomeConfig;
use crate::protocol::CommandReply;

const INVALID_COMMAND: &str = "Invalid command";
const CLEAR_COMMAND: &str = "clear";

/// Configured command name -> response fragment.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: BTreeMap<String, String>,
}

impl CommandTable {
    /// Names are stored lowercased; lookups lowercase the first word.
    pub fn new(commands: BTreeMap<String, String>) -> Self {
        let commands = commands
            .into_iter()
            .map(|(name, body)| (name.trim().to_lowercase(), body))
            .collect();
        Self { commands }
    }

    pub fn from_config(cfg: &HomeConfig) -> Self {
        Self::new(cfg.commands.clone())
    }

    /// Resolve one submitted line.
    ///
    /// - blank line: empty success
    /// - unknown first word: `error("Invalid command")`
    /// - `clear`: clear reply carrying the sentinel
    /// - otherwise: the configured fragment; extra words are ignored
    pub fn execute(&self, line: &str) -> CommandReply {
        let Some(first) = line.split_whitespace().next() else {
            return CommandReply::success("");
        };
        let name = first.to_lowercase();

        let Some(body) = self.commands.get(&name) else {
            tracing::debug!(command = %name, "rejected unknown command");
            return CommandReply::error(INVALID_COMMAND);
        };

        if name == CLEAR_COMMAND {
            tracing::debug!("clear requested");
            return CommandReply::clear();
        }

        tracing::debug!(command = %name, "resolved command");
        CommandReply::success(body.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
