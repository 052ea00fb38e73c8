//! Configuration for the rosetta command-line front end

#![allow(clippy::must_use_candidate)]

mod env;
mod loader;
pub mod logging;
pub mod overrides;

use serde::Deserialize;

pub use logging::{LogFormat, LoggingConfig};
pub use overrides::{OverridesConfig, ResponseConfig};

/// Top-level rosetta configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Log output configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Values forced onto every converted request
    #[serde(default)]
    pub overrides: OverridesConfig,
    /// Response conversion defaults
    #[serde(default)]
    pub response: ResponseConfig,
}
