use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tafsiri", version, about = "Translate UI strings through a persistent cache")]
pub struct Cli {
    /// JSON config profile. Defaults to ./tafsiri.json, then TAFSIRI_* env vars
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate one or more texts, one result per line
    Translate {
        #[arg(required = true)]
        texts: Vec<String>,
        /// Target language, defaults to the active language
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Look a text up in the cache without touching the network
    Cached {
        text: String,
        #[arg(short, long)]
        to: Option<String>,
    },
    /// Show the active language, or switch to LANG
    Language { lang: Option<String> },
    /// List supported languages
    Languages,
    /// Rate limit window and cache usage
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Clear cached translations, all or for one language
    Clear {
        #[arg(long)]
        lang: Option<String>,
    },
    /// Lift the provider back-off window
    ResetRateLimit,
    /// Interactive session reading texts from stdin
    Session,
}
