//! Savings plan tiers and the published offer catalog.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::SavingsError;

/// Savings plan tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// 2% monthly, entry amounts.
    Basic,
    /// 4% monthly.
    Advanced,
    /// 6% monthly, largest amounts.
    Elite,
}

impl PlanTier {
    /// All tiers in catalog order.
    pub const ALL: [PlanTier; 3] = [PlanTier::Basic, PlanTier::Advanced, PlanTier::Elite];

    /// Returns the storage/wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Basic => "basic",
            PlanTier::Advanced => "advanced",
            PlanTier::Elite => "elite",
        }
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Basic => "Basic",
            PlanTier::Advanced => "Advanced",
            PlanTier::Elite => "Elite",
        }
    }

    /// Published monthly yield as a decimal fraction.
    pub fn published_monthly_yield(&self) -> Decimal {
        match self {
            PlanTier::Basic => Decimal::new(2, 2),
            PlanTier::Advanced => Decimal::new(4, 2),
            PlanTier::Elite => Decimal::new(6, 2),
        }
    }

    /// Published contribution amounts in USD.
    pub fn published_amounts(&self) -> [Decimal; 4] {
        let base: [i64; 4] = [100, 300, 500, 800];
        let scale = match self {
            PlanTier::Basic => 1,
            PlanTier::Advanced => 10,
            PlanTier::Elite => 100,
        };
        base.map(|amount| Decimal::from(amount * scale))
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = SavingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(PlanTier::Basic),
            "advanced" => Ok(PlanTier::Advanced),
            "elite" => Ok(PlanTier::Elite),
            other => Err(SavingsError::invalid_tier(other)),
        }
    }
}

/// One row of the plan catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierOffer {
    pub tier: PlanTier,
    pub name: &'static str,
    pub monthly_yield: Decimal,
    pub amounts: Vec<Decimal>,
}

static CATALOG: Lazy<Vec<TierOffer>> = Lazy::new(|| {
    PlanTier::ALL
        .iter()
        .map(|tier| TierOffer {
            tier: *tier,
            name: tier.display_name(),
            monthly_yield: tier.published_monthly_yield(),
            amounts: tier.published_amounts().to_vec(),
        })
        .collect()
});

/// Returns the informational plan catalog.
///
/// Subscription requests are not checked against it.
pub fn catalog() -> &'static [TierOffer] {
    &CATALOG
}
