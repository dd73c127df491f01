//! redwatch CLI - restart the server whenever its sources change
//!
//! Usage: redwatch [ROLE] [OPTIONS]
//!
//!   redwatch master     run the primary
//!   redwatch            run a replica of 127.0.0.1:6379 on port 6380

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::run::cmd_run(&cli)
}
