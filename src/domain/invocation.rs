//! Command line used to (re)start the supervised server

use std::fmt;

use serde::Serialize;

use crate::error::{RedwatchError, RedwatchResult};

use super::role::Role;

/// Own listening port of a replica unless configured otherwise
pub const DEFAULT_REPLICA_PORT: u16 = 6380;

/// Program plus arguments, built once from the [`Role`] and reused on every
/// restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Build the invocation for `role` on top of the base build-and-run command.
    ///
    /// The primary gets the bare command. A replica additionally gets
    /// `--port <replica_port> --replicaof <host> <port>`.
    pub fn for_role(command: &[String], role: &Role, replica_port: u16) -> RedwatchResult<Self> {
        let (program, base_args) = command
            .split_first()
            .filter(|(program, _)| !program.trim().is_empty())
            .ok_or_else(|| RedwatchError::InvalidConfig {
                file: "server.command".into(),
                message: "command must name a program to run".to_string(),
            })?;

        let mut args = base_args.to_vec();
        if let Role::Replica { host, port } = role {
            args.extend([
                "--port".to_string(),
                replica_port.to_string(),
                "--replicaof".to_string(),
                host.clone(),
                port.to_string(),
            ]);
        }

        Ok(Self {
            program: program.clone(),
            args,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
