use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "skilldeck")]
#[command(author, version, about = "Registry, matcher, and linter for SKILL.md collections", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to skilldeck.toml (default: ./skilldeck.toml)
    #[arg(short, long, global = true, env = "SKILLDECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Extra skills directories, highest priority last
    #[arg(short = 'p', long = "path", global = true)]
    pub paths: Vec<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all skills with their descriptions
    List,

    /// Print a skill's instructions
    Show {
        name: String,

        /// Front-matter only
        #[arg(long)]
        meta: bool,
    },

    /// Rank skills against a free-text query
    Match {
        query: String,

        #[arg(long, default_value_t = 5)]
        limit: usize,
    },

    /// Emit the <available_skills> progressive-disclosure block
    Prompt,

    /// Check the collection for structural and style problems
    Lint {
        #[arg(long, value_enum, default_value = "text")]
        format: LintFormat,
    },

    /// Report per-skill line and word counts
    Sizes {
        /// Emit a Markdown table instead of the console report
        #[arg(long)]
        markdown: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum LintFormat {
    #[default]
    Text,
    Json,
}
