use std::path::PathBuf;

use clap::Parser;

/// English ⇄ Chinese translator with Cambridge dictionary lookups
#[derive(Parser, Debug)]
#[command(name = "omni", version, about)]
pub struct Args {
    /// JSON config file (defaults to ./omni.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the default config to this path and exit
    #[arg(long, value_name = "PATH")]
    pub init_config: Option<PathBuf>,

    /// Disable text-to-speech
    #[arg(long)]
    pub no_speech: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Translate this text once and exit instead of starting the interactive loop
    pub text: Option<String>,
}
