use serde::Deserialize;
use std::time::Duration;

/// What to do when a settlement would drive the payer's balance below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverdrawPolicy {
    /// Settlements may overdraw the payer account
    #[default]
    Allow,
    /// Refuse the settlement before anything is written
    Reject,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettlementConfig {
    pub overdraw_policy: OverdrawPolicy,
    /// Lifetime of a cached debt balance
    pub debt_cache_ttl_secs: u64,
    pub debt_cache_capacity: u64,
    /// Re-read splits and transactions right before marking them paid
    pub verify_before_resolve: bool,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            overdraw_policy: OverdrawPolicy::Allow,
            debt_cache_ttl_secs: 30,
            debt_cache_capacity: 1024,
            verify_before_resolve: true,
        }
    }
}

impl SettlementConfig {
    /// Load from an optional `household-ledger` config file and `LEDGER__*`
    /// environment variables (a `.env` file is honoured). Missing keys keep
    /// their defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_builder(
            config::Config::builder()
                .add_source(config::File::with_name("household-ledger").required(false))
                .add_source(
                    config::Environment::with_prefix("LEDGER")
                        .prefix_separator("__")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize::<SettlementConfig>()
    }

    pub fn debt_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.debt_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults_allow_overdraw() {
        let config = SettlementConfig::default();
        assert_eq!(config.overdraw_policy, OverdrawPolicy::Allow);
        assert_eq!(config.debt_cache_ttl(), Duration::from_secs(30));
        assert!(config.verify_before_resolve);
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<(), config::ConfigError> {
        let builder = config::Config::builder().add_source(File::from_str(
            "overdraw_policy = \"reject\"\ndebt_cache_ttl_secs = 5",
            FileFormat::Toml,
        ));
        let config = SettlementConfig::from_builder(builder)?;

        assert_eq!(config.overdraw_policy, OverdrawPolicy::Reject);
        assert_eq!(config.debt_cache_ttl_secs, 5);
        assert_eq!(config.debt_cache_capacity, 1024);
        Ok(())
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let builder = config::Config::builder()
            .add_source(File::from_str("overdraw_policy = \"sometimes\"", FileFormat::Toml));
        assert!(SettlementConfig::from_builder(builder).is_err());
    }
}
