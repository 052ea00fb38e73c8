use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rosetta_config::{LogFormat, OverridesConfig};
use rosetta_llm::ProviderKind;

/// Rosetta LLM format translator
#[derive(Debug, Parser)]
#[command(name = "rosetta", about = "Translate LLM requests and responses between vendor wire formats")]
pub struct Args {
    /// Path to configuration file [default: rosetta.toml]
    #[arg(short, long, global = true, env = "ROSETTA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured log format (text or json)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert a request from one vendor format to another
    Request {
        #[command(flatten)]
        input: InputArgs,
        /// Format of the incoming request
        #[arg(long)]
        from: ProviderKind,
        /// Format to build
        #[arg(long)]
        to: ProviderKind,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Convert a response from one vendor format to another
    Response {
        #[command(flatten)]
        input: InputArgs,
        /// Format of the incoming response
        #[arg(long)]
        from: ProviderKind,
        /// Format to build
        #[arg(long)]
        to: ProviderKind,
        /// Model to report when the response omits one
        #[arg(long)]
        model: Option<String>,
    },
    /// Summarize a request in canonical terms
    Inspect {
        #[command(flatten)]
        input: InputArgs,
        /// Format of the incoming request
        #[arg(long)]
        from: ProviderKind,
    },
    /// Anthropic to chat-completion proxy helpers
    Legacy {
        #[command(subcommand)]
        command: LegacyCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum LegacyCommand {
    /// Build a chat-completion payload from an Anthropic request
    Payload {
        #[command(flatten)]
        input: InputArgs,
        /// JSON file holding a pre-converted message array to splice in
        #[arg(long)]
        messages: Option<PathBuf>,
        #[command(flatten)]
        overrides: OverrideArgs,
    },
    /// Build an Anthropic response from a chat-completion response
    Response {
        #[command(flatten)]
        input: InputArgs,
        /// Model to report when the response omits one
        #[arg(long)]
        model: Option<String>,
    },
}

/// Where to read the JSON payload from
#[derive(Debug, Clone, clap::Args)]
pub struct InputArgs {
    /// Input file; stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Request fields to force after parsing
#[derive(Debug, Clone, Default, clap::Args)]
pub struct OverrideArgs {
    /// Target model identifier
    #[arg(long)]
    pub model: Option<String>,
    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[arg(long)]
    pub max_tokens: Option<u32>,
    /// Whether to request streaming
    #[arg(long)]
    pub stream: Option<bool>,
}

impl From<OverrideArgs> for OverridesConfig {
    fn from(args: OverrideArgs) -> Self {
        Self {
            model: args.model,
            temperature: args.temperature,
            max_tokens: args.max_tokens,
            stream: args.stream,
        }
    }
}
