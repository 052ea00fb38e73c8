#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod commands;

use std::io::Write;
use std::path::PathBuf;

use args::{Args, Command, LegacyCommand};
use clap::Parser;
use rosetta_config::{Config, OverridesConfig};

/// Config file read when none is given
const DEFAULT_CONFIG_PATH: &str = "rosetta.toml";

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Load configuration; a missing default file is fine
    let explicit = args.config.is_some();
    let config_path = args.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let mut config = Config::load_or_default(&config_path, explicit)?;

    if let Some(format) = args.log_format {
        config.logging.format = format;
    }

    rosetta_telemetry::init(&config.logging)?;

    tracing::debug!(config_path = %config_path.display(), "starting rosetta");

    let output = match args.command {
        Command::Request {
            input,
            from,
            to,
            overrides,
        } => {
            let overrides = config.overrides.merged_with(&OverridesConfig::from(overrides));
            commands::convert_request(&commands::read_input(input.input.as_deref())?, from, to, &overrides)?
        }
        Command::Response { input, from, to, model } => {
            let model = model.or_else(|| config.response.model.clone());
            commands::convert_response(&commands::read_input(input.input.as_deref())?, from, to, model.as_deref())?
        }
        Command::Inspect { input, from } => commands::inspect(&commands::read_input(input.input.as_deref())?, from)?,
        Command::Legacy {
            command: LegacyCommand::Payload {
                input,
                messages,
                overrides,
            },
        } => {
            let overrides = config.overrides.merged_with(&OverridesConfig::from(overrides));
            let messages = messages.as_deref().map(commands::read_messages).transpose()?;
            commands::legacy_payload(&commands::read_input(input.input.as_deref())?, &overrides, messages)?
        }
        Command::Legacy {
            command: LegacyCommand::Response { input, model },
        } => {
            let model = model.or_else(|| config.response.model.clone());
            rosetta_llm::legacy::convert_to_anthropic_response(
                &commands::read_input(input.input.as_deref())?,
                model.as_deref(),
            )?
        }
    };

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;

    Ok(())
}
