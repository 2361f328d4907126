//! `/api/command` wire types shared by the gateway and every front-end.

use serde::{Deserialize, Serialize};

/// Route the front-ends POST submitted lines to.
pub const COMMAND_PATH: &str = "/api/command";

/// Output value that tells the client to clear itself instead of printing.
pub const CLEAR_SENTINEL: &str = "CLEAR_TERMINAL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(default)]
    pub command: String,
}

impl CommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Success,
    Error,
    Clear,
    /// Any status string this client does not know. Rendered like `Error`.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub status: CommandStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl CommandReply {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            output: Some(output.into()),
        }
    }

    pub fn error(output: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            output: Some(output.into()),
        }
    }

    pub fn clear() -> Self {
        Self {
            status: CommandStatus::Clear,
            output: Some(CLEAR_SENTINEL.to_string()),
        }
    }

    /// True when the client should wipe its log: either the `clear` status or
    /// the sentinel output on a successful reply.
    pub fn requests_clear(&self) -> bool {
        match self.status {
            CommandStatus::Clear => true,
            CommandStatus::Success => self.output.as_deref() == Some(CLEAR_SENTINEL),
            CommandStatus::Error | CommandStatus::Unknown => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_wire_shape() {
        let json = serde_json::to_value(CommandReply::success("hi")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "success", "output": "hi" }));

        let json = serde_json::to_value(CommandReply::clear()).unwrap();
        assert_eq!(json["status"], "clear");
        assert_eq!(json["output"], CLEAR_SENTINEL);
    }

    #[test]
    fn output_is_optional_and_unknown_status_is_tolerated() {
        let reply: CommandReply = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert_eq!(reply.output, None);

        let reply: CommandReply =
            serde_json::from_str(r#"{"status":"teapot","output":"x"}"#).unwrap();
        assert_eq!(reply.status, CommandStatus::Unknown);
    }

    #[test]
    fn missing_command_field_is_empty() {
        let req: CommandRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.command, "");
    }

    #[test]
    fn sentinel_only_clears_on_success_or_clear() {
        assert!(CommandReply::clear().requests_clear());
        assert!(CommandReply::success(CLEAR_SENTINEL).requests_clear());
        assert!(!CommandReply::error(CLEAR_SENTINEL).requests_clear());
        assert!(!CommandReply::success("CLEAR").requests_clear());
    }
}
