//! Startup configuration for the API service.
//!
//! Values come from command-line flags, falling back to `TODOLIST_*`
//! environment variables, then to built-in defaults.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_DATABASE: &str = "todolist.sqlite3";
const DEFAULT_LOG_DIR_NAME: &str = "logs";

/// API service configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "todolist-server", version, about = "Todo list REST API service")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "TODOLIST_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Store connection string: a SQLite file path, or `:memory:`
    #[arg(long, env = "TODOLIST_DATABASE_URL", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TODOLIST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (defaults to `./logs`)
    #[arg(long, env = "TODOLIST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Effective log level, defaulting per build mode.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(todolist_core::default_log_level())
    }

    /// Absolute log directory; relative values resolve against the working directory.
    pub fn resolved_log_dir(&self) -> std::io::Result<PathBuf> {
        let dir = self
            .log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR_NAME));
        if dir.is_absolute() {
            return Ok(dir);
        }
        Ok(std::env::current_dir()?.join(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "todolist-server",
            "--bind",
            "127.0.0.1:9000",
            "--database",
            ":memory:",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/todolist",
        ])
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.database, ":memory:");
        assert_eq!(config.log_level(), "warn");
        assert_eq!(
            config.resolved_log_dir().unwrap(),
            PathBuf::from("/var/log/todolist")
        );
    }

    #[test]
    fn log_level_defaults_per_build_mode() {
        let config = ServerConfig::try_parse_from(["todolist-server"]).unwrap();
        assert_eq!(config.log_level, None);
        assert_eq!(config.log_level(), todolist_core::default_log_level());
    }

    #[test]
    fn relative_log_dir_resolves_against_cwd() {
        let config =
            ServerConfig::try_parse_from(["todolist-server", "--log-dir", "relative/logs"])
                .unwrap();
        let resolved = config.resolved_log_dir().unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("relative/logs"));
    }

    #[test]
    fn rejects_unparseable_bind_address() {
        assert!(ServerConfig::try_parse_from(["todolist-server", "--bind", "nowhere"]).is_err());
    }
}
