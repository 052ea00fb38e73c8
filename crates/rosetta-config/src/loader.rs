use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `${VAR}` placeholders, then deserializes and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, variable expansion fails,
    /// TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Load configuration, tolerating a missing file unless it was requested explicitly
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to load, or if an explicit
    /// path does not exist
    pub fn load_or_default(path: &Path, explicit: bool) -> anyhow::Result<Self> {
        if !explicit && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        Self::load(path)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if variable expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that configured values are within range
    ///
    /// # Errors
    ///
    /// Returns an error if the temperature is outside `0.0..=2.0`, the token
    /// limit is zero, or the log filter is empty
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(temperature) = self.overrides.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            anyhow::bail!("overrides.temperature must be between 0.0 and 2.0, got {temperature}");
        }

        if self.overrides.max_tokens == Some(0) {
            anyhow::bail!("overrides.max_tokens must be greater than 0");
        }

        if self.logging.filter.trim().is_empty() {
            anyhow::bail!("logging.filter must not be empty");
        }

        Ok(())
    }
}
