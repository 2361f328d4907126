//! Configuration for the gateway (`config.toml` + environment) and the console
//! client (environment only).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::TermError;
use crate::session::DEFAULT_PROMPT;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_CONSOLE_LOG: &str = "termhome-console.log";

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> String {
    "static".to_string()
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory mounted at `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalSettings {
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
        }
    }
}

/// Gateway configuration.
///
/// | Key | Default | Env override |
/// |-----|---------|--------------|
/// | server.host | 0.0.0.0 | TERMHOME__SERVER__HOST |
/// | server.port | 8000 | TERMHOME__SERVER__PORT |
/// | server.static_dir | static | TERMHOME__SERVER__STATIC_DIR |
/// | terminal.prompt | `guest@terminal:~$ ` | TERMHOME__TERMINAL__PROMPT |
/// | commands.<name> | (none) | (file only) |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub terminal: TerminalSettings,
    /// Command name -> response fragment (HTML allowed).
    #[serde(default)]
    pub commands: BTreeMap<String, String>,
}

impl HomeConfig {
    /// Path from `TERMHOME_CONFIG`, else `config.toml` in the working directory.
    pub fn default_path() -> PathBuf {
        std::env::var("TERMHOME_CONFIG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load from a TOML file plus `TERMHOME__*` environment overrides.
    /// The file must exist; the gateway has nothing to answer with otherwise.
    pub fn load_from_path(path: &Path) -> Result<Self, TermError> {
        let built = config::Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("server.static_dir", default_static_dir())?
            .set_default("terminal.prompt", default_prompt())?
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("TERMHOME").separator("__"))
            .build()?;

        Ok(built.try_deserialize()?)
    }

    /// Parse a TOML document directly, without the environment layer.
    pub fn from_toml_str(contents: &str) -> Result<Self, TermError> {
        let built = config::Config::builder()
            .add_source(config::File::from_str(contents, config::FileFormat::Toml))
            .build()?;
        Ok(built.try_deserialize()?)
    }
}

/// Console client settings, read from the environment.
///
/// | Env | Default |
/// |-----|---------|
/// | TERMHOME_URL | http://127.0.0.1:8000 |
/// | TERMHOME_PROMPT | `guest@terminal:~$ ` |
/// | TERMHOME_LOG | termhome-console.log |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub gateway_url: String,
    pub prompt: String,
    pub log_file: PathBuf,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            prompt: default_prompt(),
            log_file: PathBuf::from(DEFAULT_CONSOLE_LOG),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gateway_url: env_opt_string("TERMHOME_URL").unwrap_or(defaults.gateway_url),
            // The prompt keeps its trailing space, so it is not trimmed.
            prompt: std::env::var("TERMHOME_PROMPT")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.prompt),
            log_file: env_opt_string("TERMHOME_LOG")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
        }
    }
}

fn env_opt_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_sections() {
        let cfg = HomeConfig::from_toml_str("[commands]\nhelp = \"hi\"\n").unwrap();
        assert_eq!(cfg.server, ServerSettings::default());
        assert_eq!(cfg.terminal.prompt, DEFAULT_PROMPT);
        assert_eq!(cfg.commands.get("help").map(String::as_str), Some("hi"));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let server = ServerSettings {
            host: "127.0.0.1".into(),
            port: 9000,
            static_dir: "static".into(),
        };
        assert_eq!(server.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn console_defaults() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.gateway_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.prompt, DEFAULT_PROMPT);
    }
}
