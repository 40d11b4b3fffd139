pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod validate;

use clap::{Parser, Subcommand};

/// glyphsheet - Pixel-font sheet variant and format generator
#[derive(Parser, Debug)]
#[command(name = "glyphsheet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate every variant and format from the master sheet
    Build(build::BuildArgs),

    /// Initialize a glyphsheet project (generates glyphsheet.yaml)
    Init(init::InitArgs),

    /// List subsheets, variants and formats
    List(list::ListArgs),

    /// Check the manifest and master sheet without generating anything
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
