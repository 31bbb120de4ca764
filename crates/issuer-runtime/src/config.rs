//! # Issuer Configuration
//!
//! Everything the issuer reads at startup, with environment overrides.
//!
//! ## Requirements
//!
//! - At least one signing key source must be configured
//! - Validity must stay within the one-year issuance bound

use std::env;
use std::path::PathBuf;

use shared_types::MAX_VALIDITY_SECS;
use thiserror::Error;
use tg_03_pricing::{PriceSchedule, PricingError, TokenTier};

const SECS_PER_DAY: u32 = 60 * 60 * 24;

/// Complete issuer configuration.
#[derive(Debug, Clone)]
pub struct IssuerConfig {
    /// Unencrypted OpenSSH private key file.
    pub private_key_path: Option<PathBuf>,
    /// Matching `.pub` line; defaults to the private path plus `.pub`.
    pub public_key_path: Option<PathBuf>,
    /// Extra signing keys, one base64 key per line.
    pub private_keys_list: Option<PathBuf>,
    /// Extra trusted verification keys, one base64 key per line.
    pub public_keys_list: Option<PathBuf>,
    /// Service address written into issued tickets.
    pub service_url: String,
    /// Grant size to issue.
    pub tier: TokenTier,
    /// Validity of issued tickets.
    pub validity_days: u32,
    /// Price weights.
    pub prices: PriceSchedule,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self {
            private_key_path: None,
            public_key_path: None,
            private_keys_list: None,
            public_keys_list: None,
            service_url: "localhost".to_string(),
            tier: TokenTier::TinyX4,
            validity_days: 30,
            prices: PriceSchedule::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// Neither a private key file nor a private key list is configured.
    #[error("No signing key configured. Set TG_PRIVATE_KEY_PATH or TG_PRIVATE_KEYS_LIST.")]
    MissingSigningKey,

    /// Validity is zero or above the issuance bound.
    #[error("Validity of {days} days is outside 1..={max_days}")]
    InvalidValidity { days: u32, max_days: u32 },

    /// A variable could not be parsed.
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    /// The price weights are unusable.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

impl IssuerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `TG_PRIVATE_KEY_PATH`: OpenSSH private key file
    /// - `TG_PUBLIC_KEY_PATH`: public key line (default: private path + `.pub`)
    /// - `TG_PRIVATE_KEYS_LIST`, `TG_PUBLIC_KEYS_LIST`: key list files
    /// - `TG_SERVICE_URL`: target service (default: localhost)
    /// - `TG_TOKEN_TIER`: tier name (default: tinyx4)
    /// - `TG_VALIDITY_DAYS`: validity (default: 30)
    /// - `TG_PRICE_CONNECTION`, `TG_PRICE_SUBSCRIPTION`, `TG_PRICE_INPUT`,
    ///   `TG_PRICE_OUTPUT`: price weights per month
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        config.private_key_path = lookup("TG_PRIVATE_KEY_PATH").map(PathBuf::from);
        config.public_key_path = lookup("TG_PUBLIC_KEY_PATH")
            .map(PathBuf::from)
            .or_else(|| {
                config
                    .private_key_path
                    .as_ref()
                    .map(|p| PathBuf::from(format!("{}.pub", p.display())))
            });
        config.private_keys_list = lookup("TG_PRIVATE_KEYS_LIST").map(PathBuf::from);
        config.public_keys_list = lookup("TG_PUBLIC_KEYS_LIST").map(PathBuf::from);

        if let Some(url) = lookup("TG_SERVICE_URL") {
            config.service_url = url;
        }
        if let Some(name) = lookup("TG_TOKEN_TIER") {
            config.tier = TokenTier::from_name(&name).map_err(|_| ConfigError::InvalidValue {
                var: "TG_TOKEN_TIER",
                value: name,
            })?;
        }
        if let Some(days) = lookup("TG_VALIDITY_DAYS") {
            config.validity_days = parse("TG_VALIDITY_DAYS", days)?;
        }

        for (var, weight) in [
            ("TG_PRICE_CONNECTION", &mut config.prices.connection),
            ("TG_PRICE_SUBSCRIPTION", &mut config.prices.subscription),
            ("TG_PRICE_INPUT", &mut config.prices.input),
            ("TG_PRICE_OUTPUT", &mut config.prices.output),
        ] {
            if let Some(value) = lookup(var) {
                *weight = parse(var, value)?;
            }
        }

        Ok(config)
    }

    /// Validate before any key is loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.private_key_path.is_none() && self.private_keys_list.is_none() {
            return Err(ConfigError::MissingSigningKey);
        }
        let max_days = MAX_VALIDITY_SECS / SECS_PER_DAY;
        if self.validity_days == 0 || self.validity_days > max_days {
            return Err(ConfigError::InvalidValidity {
                days: self.validity_days,
                max_days,
            });
        }
        self.prices.validate()?;
        Ok(())
    }

    /// Validity in seconds.
    pub fn validity_secs(&self) -> u32 {
        self.validity_days.saturating_mul(SECS_PER_DAY)
    }
}

fn parse<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}
