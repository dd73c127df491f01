//! Scenario tests for redwatch.
//!
//! Each scenario runs the real binary in a scratch project against a
//! recording `sh` server.
//!
//! Run with: cargo test --test scenarios

#![cfg(unix)]

mod common;

#[path = "scenarios/role_args.rs"]
mod role_args;

#[path = "scenarios/restart_on_change.rs"]
mod restart_on_change;

#[path = "scenarios/watch_setup_failure.rs"]
mod watch_setup_failure;

#[path = "scenarios/start_failure.rs"]
mod start_failure;
