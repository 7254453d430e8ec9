use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "prompt-dna", about = "prompt-dna configuration and validation utilities")]
pub struct Cli {
    /// key=value file loaded into the environment before any lookup
    #[arg(long, env = "PROMPT_DNA_ENV_FILE")]
    pub env_file: Option<String>,

    /// DEBUG, INFO, WARNING, ERROR or CRITICAL
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
    Validate {
        #[command(subcommand)]
        command: ValidateCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    Get {
        key: String,
        #[arg(long)]
        default: Option<String>,
        #[arg(long)]
        required: bool,
    },
    Int {
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        default: Option<i64>,
        #[arg(long)]
        required: bool,
    },
    Bool {
        key: String,
        #[arg(long)]
        default: bool,
    },
    Path {
        key: String,
        #[arg(long)]
        default: Option<String>,
        #[arg(long)]
        required: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ValidateCommand {
    MemoryKey {
        key: String,
    },
    Language {
        name: String,
    },
    Path {
        path: String,
        /// do not require the path to exist
        #[arg(long)]
        allow_missing: bool,
        /// require a directory instead of a regular file
        #[arg(long)]
        dir: bool,
    },
    Pattern {
        value: String,
        pattern: String,
        #[arg(long, default_value = "value")]
        name: String,
        #[arg(long)]
        min: Option<usize>,
        #[arg(long)]
        max: Option<usize>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
