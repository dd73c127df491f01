//! Runtime role of the supervised server

use serde::Serialize;

/// Argument value that selects the primary role
pub const PRIMARY_ARG: &str = "master";

/// Peer a replica follows when nothing else is configured
pub const DEFAULT_PRIMARY_HOST: &str = "127.0.0.1";
pub const DEFAULT_PRIMARY_PORT: u16 = 6379;

/// Role the supervised server runs in.
///
/// Derived once at startup and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Role {
    /// Accepts writes and is the replication source
    Primary,
    /// Mirrors the primary at `host:port`
    Replica { host: String, port: u16 },
}

impl Role {
    /// Derive the role from the first positional argument.
    ///
    /// Exactly `"master"` selects [`Role::Primary`]; anything else, including
    /// no argument at all, selects a replica of `127.0.0.1:6379`.
    pub fn from_arg(arg: Option<&str>) -> Self {
        Self::from_arg_with_peer(arg, DEFAULT_PRIMARY_HOST, DEFAULT_PRIMARY_PORT)
    }

    /// Same as [`Role::from_arg`] with an explicit primary to follow.
    pub fn from_arg_with_peer(arg: Option<&str>, host: &str, port: u16) -> Self {
        match arg {
            Some(PRIMARY_ARG) => Role::Primary,
            _ => Role::Replica {
                host: host.to_string(),
                port,
            },
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self, Role::Primary)
    }

    pub fn label(&self) -> String {
        match self {
            Role::Primary => "master".to_string(),
            Role::Replica { host, port } => format!("replica of {}:{}", host, port),
        }
    }
}
