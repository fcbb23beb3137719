use std::path::Path;

use crate::{AnyOrArray, Config};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "carphoto.toml";

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Load an explicitly named file, or fall back to `carphoto.toml`
    ///
    /// The relay runs without any config file, so a missing default file
    /// yields the built-in defaults. A missing explicit file is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file fails to load or validate
    pub fn discover(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Path::new(DEFAULT_CONFIG_PATH);
        if fallback.exists() {
            return Self::load(fallback);
        }

        tracing::debug!("no config file found, using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if relay parameters are empty, the timeout is zero,
    /// or routes are malformed or collide
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_relay_config()?;
        self.validate_routes()?;
        self.validate_cors()?;
        Ok(())
    }

    /// Validate outbound generation settings
    fn validate_relay_config(&self) -> anyhow::Result<()> {
        let relay = &self.relay;

        for (field, value) in [
            ("model", &relay.model),
            ("size", &relay.size),
            ("quality", &relay.quality),
            ("api_key_prefix", &relay.api_key_prefix),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("relay.{field} must not be empty");
            }
        }

        if !matches!(relay.base_url.scheme(), "http" | "https") {
            anyhow::bail!("relay.base_url must be an http or https URL");
        }

        if relay.timeout_seconds == 0 {
            anyhow::bail!("relay.timeout_seconds must be greater than 0");
        }

        Ok(())
    }

    /// Ensure the generate and health routes are well-formed and distinct
    fn validate_routes(&self) -> anyhow::Result<()> {
        if !self.relay.path.starts_with('/') {
            anyhow::bail!("relay.path must start with '/'");
        }

        let health = &self.server.health;
        if health.enabled {
            if !health.path.starts_with('/') {
                anyhow::bail!("server.health.path must start with '/'");
            }
            if health.path == self.relay.path {
                anyhow::bail!("server.health.path and relay.path must differ");
            }
        }

        Ok(())
    }

    /// Credentialed CORS needs explicit origins, methods and headers
    fn validate_cors(&self) -> anyhow::Result<()> {
        let Some(ref cors) = self.server.cors else {
            return Ok(());
        };

        if cors.credentials
            && [&cors.origins, &cors.methods, &cors.headers]
                .iter()
                .any(|value| matches!(value, AnyOrArray::Any))
        {
            anyhow::bail!("server.cors.credentials requires explicit origins, methods and headers");
        }

        Ok(())
    }
}
