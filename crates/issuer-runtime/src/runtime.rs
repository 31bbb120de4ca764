//! # Issuer Runtime
//!
//! Startup wiring: key sources are read once into a `KeyStore`, which is then
//! shared by the ticket service for the life of the process.

use std::sync::Arc;
use std::time::Instant;

use shared_crypto::Ed25519PublicKey;
use shared_types::{Payload, UnixSeconds};
use thiserror::Error;
use tg_01_key_container::{
    load_private_key_list, load_public_key_file, load_public_key_list, KeyContainerError,
    KeyMaterial,
};
use tg_02_ticket_codec::{KeyStore, TicketApi, TicketError, TicketService};
use tg_03_pricing::{price_with, PricingError, TierQuote};
use tollgate_telemetry::{log_key_event, ReporterRegistry, KEY_CONTAINERS_LOADED};
use tracing::{info, warn};

use crate::config::{ConfigError, IssuerConfig};

/// Anything that stops the issuer from starting or issuing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuntimeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Key loading failed: {0}")]
    Keys(#[from] KeyContainerError),

    #[error("Ticket error: {0}")]
    Ticket(#[from] TicketError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

/// A signed ticket with what it grants and costs.
#[derive(Debug, Clone)]
pub struct IssuedTicket {
    pub token: String,
    pub payload: Payload,
    pub quote: TierQuote,
    pub price: f64,
}

/// Read every configured key source into a store.
pub fn build_key_store(config: &IssuerConfig) -> Result<KeyStore, KeyContainerError> {
    let mut store = KeyStore::new();

    match (&config.private_key_path, &config.public_key_path) {
        (Some(private_path), Some(public_path)) => {
            let material = KeyMaterial::load(private_path, public_path)?;
            let issuer = store.add_signing_key(material.keypair);
            KEY_CONTAINERS_LOADED.with_label_values(&["private"]).inc();
            log_key_event!(
                info,
                "Key container loaded",
                private_path.display(),
                issuer = %issuer
            );
        }
        (None, Some(public_path)) => {
            let raw = load_public_key_file(public_path)?;
            let public_key = Ed25519PublicKey::from_bytes(raw)
                .map_err(|e| KeyContainerError::InvalidKey(e.to_string()))?;
            store.trust(public_key);
            KEY_CONTAINERS_LOADED.with_label_values(&["public"]).inc();
            log_key_event!(info, "Public key loaded", public_path.display());
        }
        _ => {}
    }

    if let Some(path) = &config.private_keys_list {
        let keys = load_private_key_list(path)?;
        if keys.is_empty() {
            warn!(path = %path.display(), "Private key list holds no usable keys");
        }
        let count = keys.len();
        for keypair in keys {
            store.add_signing_key(keypair);
        }
        KEY_CONTAINERS_LOADED.with_label_values(&["private_list"]).inc();
        log_key_event!(info, "Private key list loaded", path.display(), count);
    }

    if let Some(path) = &config.public_keys_list {
        let keys = load_public_key_list(path)?;
        let count = keys.len();
        for public_key in keys {
            store.trust(public_key);
        }
        KEY_CONTAINERS_LOADED.with_label_values(&["public_list"]).inc();
        log_key_event!(info, "Public key list loaded", path.display(), count);
    }

    info!(
        signing = store.signing_count(),
        trusted = store.trusted_count(),
        "Key store ready"
    );
    Ok(store)
}

/// The running issuer.
pub struct IssuerRuntime {
    config: IssuerConfig,
    service: TicketService,
    reporters: ReporterRegistry,
    started: Instant,
}

impl IssuerRuntime {
    /// Validate the configuration and load keys.
    pub fn new(config: IssuerConfig) -> Result<Self, RuntimeError> {
        config.validate()?;
        let store = build_key_store(&config)?;
        if store.signing_count() == 0 {
            return Err(TicketError::InvalidKey("no signing key loaded".into()).into());
        }

        let service = TicketService::new(Arc::new(store));
        let mut reporters = ReporterRegistry::new();
        reporters.register(Box::new(service.reporter()));

        Ok(Self {
            config,
            service,
            reporters,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> &IssuerConfig {
        &self.config
    }

    pub fn service(&self) -> &TicketService {
        &self.service
    }

    pub fn reporters(&self) -> &ReporterRegistry {
        &self.reporters
    }

    /// Issue a ticket for the configured tier, then verify it back.
    pub fn issue_tier_ticket(&self, now: UnixSeconds) -> Result<IssuedTicket, RuntimeError> {
        let quote = self.config.tier.quote()?;
        let payload = Payload {
            expiration_time: now.saturating_add(self.config.validity_secs()),
            target_url: self.config.service_url.clone(),
            ..Payload::default()
        }
        .with_limits(quote.limits);

        let token = self.service.issue(payload, now)?;
        let payload = self.service.verify(&token)?;
        let price = price_with(&payload, now, &self.config.prices);

        info!(
            tier = %quote.tier,
            issuer = %payload.issuer,
            price,
            "Tier ticket ready"
        );
        Ok(IssuedTicket {
            token,
            payload,
            quote,
            price,
        })
    }

    /// Log every reporter's status lines.
    pub fn report(&self) {
        self.reporters.log_all(self.started.elapsed());
    }
}
