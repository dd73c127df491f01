//! Common test utilities for redwatch scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and home directories plus a config writer
//! - `Running`: a live redwatch process with its NDJSON event stream

#![allow(dead_code)]

pub mod env;

pub use env::*;
