use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "scanctx",
    version,
    about = "Resolve overlay profiles in compliance scan reports: authoritative controls, redundant layers, inherited source"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Link an evaluation and print its profile and control overlay graph
    Graph(GraphArgs),
    /// Print the full layered source of a control
    Code(CodeArgs),
    /// Contextualize a single profile without overlay resolution
    Profile(ProfileArgs),
    /// Check the linked graph for structural problems
    Verify(VerifyArgs),
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// Machine-readable graph summary
    Json,
}

#[derive(Debug, Args, Clone)]
pub struct GraphArgs {
    /// Normalized evaluation JSON, or "-" for stdin
    #[arg(value_name = "EVALUATION")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only list controls that no other control overlays
    #[arg(long)]
    pub effective: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CodeArgs {
    /// Normalized evaluation JSON, or "-" for stdin
    #[arg(value_name = "EVALUATION")]
    pub input: PathBuf,

    /// Control identifier
    #[arg(long)]
    pub control: String,

    /// Profile containing the control; defaults to every outermost layer
    #[arg(long)]
    pub profile: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ProfileArgs {
    /// Normalized profile JSON, or "-" for stdin
    #[arg(value_name = "PROFILE")]
    pub input: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Args, Clone)]
pub struct VerifyArgs {
    /// Normalized evaluation JSON, or "-" for stdin
    #[arg(value_name = "EVALUATION")]
    pub input: PathBuf,
}
