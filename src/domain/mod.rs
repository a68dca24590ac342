//! Domain layer containing the personalization rules and bundle validation.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (score value object, errors, state machine)
//! - `profile` - User profile, derived body metrics, tier and entitlements
//! - `scoring` - Score classifier
//! - `risk` - Risk flag builder
//! - `modules` - Module catalog and selector
//! - `labs` - Lab test prioritizer
//! - `narrative` - Narrative hint builder
//! - `supplements` - Supplement recommender
//! - `meal_plan` - Meal plan generator
//! - `engine` - Rule engine tying the above together
//! - `bundle` - Assembled report content
//! - `validation` - Bundle validator and auto-corrector

pub mod bundle;
pub mod engine;
pub mod foundation;
pub mod labs;
pub mod meal_plan;
pub mod modules;
pub mod narrative;
pub mod profile;
pub mod risk;
pub mod scoring;
pub mod supplements;
pub mod validation;
