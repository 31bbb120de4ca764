//! # Token Tiers
//!
//! Fixed grant sizes sold to customers. Tier `n` is the one-connection
//! baseline scaled by `2^n`, with the limits rounded down to whole units.

use std::fmt;
use std::str::FromStr;

use shared_types::ResourceLimits;

use super::errors::PricingError;
use super::scale::scale_limits;

/// Limits of the smallest grant.
pub const BASELINE_LIMITS: ResourceLimits = ResourceLimits {
    input_rate: 38.0,
    output_rate: 38.0,
    subscriptions: 2.0,
    connections: 1.0,
};

/// Monthly price of the smallest grant.
pub const BASELINE_MONTHLY_PRICE: f64 = 0.0005 * 2.0;

/// Grant sizes, each twice the previous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenTier {
    Tiny,
    TinyX2,
    /// The free tier.
    TinyX4,
    TinyX8,
    Small,
    Medium,
    MediumX2,
    Large,
    LargeX2,
    LargeX4,
    LargeX8,
    LargeX16,
    LargeX32,
    Giant,
    GiantX2,
    GiantX4,
    GiantX8,
    GiantX16,
    GiantX32,
    GiantX64,
    GiantX128,
    GiantX256,
}

/// Limits and monthly price of a tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierQuote {
    pub tier: TokenTier,
    pub limits: ResourceLimits,
    pub monthly_price: f64,
}

impl TokenTier {
    /// Every tier, smallest first.
    pub const ALL: [TokenTier; 22] = [
        TokenTier::Tiny,
        TokenTier::TinyX2,
        TokenTier::TinyX4,
        TokenTier::TinyX8,
        TokenTier::Small,
        TokenTier::Medium,
        TokenTier::MediumX2,
        TokenTier::Large,
        TokenTier::LargeX2,
        TokenTier::LargeX4,
        TokenTier::LargeX8,
        TokenTier::LargeX16,
        TokenTier::LargeX32,
        TokenTier::Giant,
        TokenTier::GiantX2,
        TokenTier::GiantX4,
        TokenTier::GiantX8,
        TokenTier::GiantX16,
        TokenTier::GiantX32,
        TokenTier::GiantX64,
        TokenTier::GiantX128,
        TokenTier::GiantX256,
    ];

    /// The size multiplier over the baseline.
    pub fn multiplier(self) -> f64 {
        f64::from(1u32 << self as u32)
    }

    /// Stable lowercase name, e.g. `tinyx4`.
    pub fn name(self) -> &'static str {
        match self {
            TokenTier::Tiny => "tiny",
            TokenTier::TinyX2 => "tinyx2",
            TokenTier::TinyX4 => "tinyx4",
            TokenTier::TinyX8 => "tinyx8",
            TokenTier::Small => "small",
            TokenTier::Medium => "medium",
            TokenTier::MediumX2 => "mediumx2",
            TokenTier::Large => "large",
            TokenTier::LargeX2 => "largex2",
            TokenTier::LargeX4 => "largex4",
            TokenTier::LargeX8 => "largex8",
            TokenTier::LargeX16 => "largex16",
            TokenTier::LargeX32 => "largex32",
            TokenTier::Giant => "giant",
            TokenTier::GiantX2 => "giantx2",
            TokenTier::GiantX4 => "giantx4",
            TokenTier::GiantX8 => "giantx8",
            TokenTier::GiantX16 => "giantx16",
            TokenTier::GiantX32 => "giantx32",
            TokenTier::GiantX64 => "giantx64",
            TokenTier::GiantX128 => "giantx128",
            TokenTier::GiantX256 => "giantx256",
        }
    }

    /// Look a tier up by name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, PricingError> {
        let wanted = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|tier| tier.name() == wanted)
            .ok_or_else(|| PricingError::UnknownTier(name.to_string()))
    }

    /// Limits and monthly price for this tier.
    pub fn quote(self) -> Result<TierQuote, PricingError> {
        let factor = self.multiplier();
        let scaled = scale_limits(&BASELINE_LIMITS, factor)?;
        Ok(TierQuote {
            tier: self,
            limits: ResourceLimits {
                input_rate: scaled.input_rate.floor(),
                output_rate: scaled.output_rate.floor(),
                subscriptions: scaled.subscriptions.floor(),
                connections: scaled.connections.floor(),
            },
            monthly_price: BASELINE_MONTHLY_PRICE * factor,
        })
    }
}

impl fmt::Display for TokenTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TokenTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
