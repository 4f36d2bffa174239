//! # Configuration
//!
//! Command-line and environment settings for the server. Every flag has an
//! environment fallback so the binary can be configured in a container without
//! arguments.

use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_IN_FLIGHT: usize = 1024;
pub const DEFAULT_STORE_BUFFER: usize = 32;

/// Runtime settings for [`UserSystem`](super::UserSystem) and the HTTP listener.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "user-dispatch", version, about = "User CRUD server with per-request workers")]
pub struct Config {
    /// Address the HTTP listener binds to.
    #[arg(long, env = "USER_DISPATCH_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Postgres connection string. Requires the `postgres` feature; the
    /// in-memory store is used when unset.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of requests in flight at once (0 = unbounded).
    #[arg(long, env = "USER_DISPATCH_MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_in_flight: usize,

    /// Mailbox capacity of the in-memory store actor.
    #[arg(long, env = "USER_DISPATCH_STORE_BUFFER", default_value_t = DEFAULT_STORE_BUFFER)]
    pub store_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: None,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            store_buffer: DEFAULT_STORE_BUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_declared_defaults() {
        let config = Config::default();
        assert_eq!(config.bind, DEFAULT_BIND.parse().unwrap());
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_in_flight, 1024);
        assert_eq!(config.store_buffer, 32);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::try_parse_from([
            "user-dispatch",
            "--bind",
            "127.0.0.1:3000",
            "--max-in-flight",
            "0",
            "--store-buffer",
            "4",
            "--database-url",
            "postgres://localhost/users",
        ])
        .unwrap();
        assert_eq!(config.bind, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.max_in_flight, 0);
        assert_eq!(config.store_buffer, 4);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/users"));
    }

    #[test]
    fn test_rejects_bad_bind_address() {
        assert!(Config::try_parse_from(["user-dispatch", "--bind", "not-an-addr"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
