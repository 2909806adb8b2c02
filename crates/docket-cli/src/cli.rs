//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docket - Refine interview question/answer transcripts with a language model.
#[derive(Debug, Parser)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DOCKET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (output path only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Refine every document in the input directory
    Refine(RefineArgs),

    /// Print the prompt for one question/answer pair without calling a provider
    Render(RenderArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the refine command.
#[derive(Debug, Default, Parser)]
pub struct RefineArgs {
    /// Directory of input documents
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum number of records to produce
    #[arg(short = 'n', long)]
    pub max_items: Option<usize>,

    /// Built-in prompt
    #[arg(short, long, value_enum)]
    pub prompt: Option<PromptArg>,

    /// Custom template file with {question} and {answer} placeholders
    #[arg(short, long)]
    pub template: Option<PathBuf>,

    /// Completion provider
    #[arg(long, value_enum)]
    pub provider: Option<ProviderArg>,

    /// Model identifier
    #[arg(short, long, env = "DOCKET_MODEL")]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,
}

/// Arguments for the render command.
#[derive(Debug, Parser)]
pub struct RenderArgs {
    /// Question text
    #[arg(short, long)]
    pub question: String,

    /// Answer text
    #[arg(short, long)]
    pub answer: String,

    /// Built-in prompt
    #[arg(short, long, value_enum)]
    pub prompt: Option<PromptArg>,

    /// Custom template file with {question} and {answer} placeholders
    #[arg(short, long)]
    pub template: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Built-in prompt argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PromptArg {
    /// Categorize question and answer intents
    Categorize,
    /// Judge whether the answer is appropriate
    Evaluate,
}

/// Provider argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ProviderArg {
    /// OpenAI-compatible chat completions
    Openai,
    /// Local Ollama instance
    Ollama,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PromptArg> for docket_refiner::PromptKind {
    fn from(prompt: PromptArg) -> Self {
        match prompt {
            PromptArg::Categorize => docket_refiner::PromptKind::Categorize,
            PromptArg::Evaluate => docket_refiner::PromptKind::Evaluate,
        }
    }
}

impl From<ProviderArg> for crate::config::ProviderKind {
    fn from(provider: ProviderArg) -> Self {
        match provider {
            ProviderArg::Openai => crate::config::ProviderKind::OpenAi,
            ProviderArg::Ollama => crate::config::ProviderKind::Ollama,
        }
    }
}
