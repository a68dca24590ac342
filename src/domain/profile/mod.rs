//! Profile module - The scored user profile and the purchased tier.
//!
//! # Components
//!
//! - `UserProfile` - Demographics, derived metrics, scores and self-reported lists
//! - `BodyMetrics` - BMI/BMR/TDEE derivation
//! - `Tier` - Purchased plan level
//! - `TierEntitlements` - Per-tier content limits

mod entitlements;
mod metrics;
mod tier;
mod user_profile;

pub use entitlements::TierEntitlements;
pub use metrics::{activity_factor, BodyMetrics, MacroTargets};
pub(crate) use metrics::round1;
pub use tier::Tier;
pub use user_profile::{DietaryPreference, Gender, UserProfile};
