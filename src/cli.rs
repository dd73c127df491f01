use std::path::PathBuf;

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// redwatch - restart the server on every source change
#[derive(Parser, Debug)]
#[command(name = "redwatch")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "Pass 'master' to run the primary; anything else runs a replica of 127.0.0.1:6379."
)]
pub struct Cli {
    /// Role selector: 'master' for the primary, anything else for a replica
    pub role: Option<String>,

    /// Emit NDJSON events instead of human output
    #[arg(long)]
    pub json: bool,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config file (defaults to ./redwatch.toml, then the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path or glob to watch, repeatable (overrides watch.paths)
    #[arg(short, long = "watch", value_name = "GLOB")]
    pub watch: Vec<String>,
}
