//! Savings domain module.
//!
//! Plans, their lifecycle, the tier catalog and dashboard calculations.

mod errors;
mod performance;
mod plan;
mod status;
mod tier;

pub use errors::SavingsError;
pub use performance::{PlanPerformance, DAYS_PER_MONTH};
pub use plan::{PlanTerms, SavingsPlan, DEFAULT_MONTHS_DURATION, MAX_MONTHS_DURATION};
pub use status::PlanStatus;
pub use tier::{catalog, PlanTier, TierOffer};
