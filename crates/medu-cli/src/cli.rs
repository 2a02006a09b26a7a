use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "medu",
    about = "Medu: validate and inspect tiered bilingual medical-education content",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Corpus configuration (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load content and report every validation issue
    Validate(ValidateArgs),
    /// Report Spanish translation coverage
    Coverage(InputArgs),
    /// Show one entry, or one level of it
    Show(ShowArgs),
    /// Show the cross-reference graph of an entry
    Refs(RefsArgs),
    /// List entries carrying a tag
    Tags(TagsArgs),
    /// Convert raw entries to canonical JSON
    Normalize(NormalizeArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// JSON files, or directories searched recursively for *.json
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Fail on warnings as well as errors
    #[arg(long)]
    pub deny_warnings: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    pub id: String,
    #[arg(short, long)]
    pub level: Option<u8>,
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct RefsArgs {
    pub id: String,
    /// List entries referencing `id` instead
    #[arg(long)]
    pub reverse: bool,
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct TagsArgs {
    pub tag: String,
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
