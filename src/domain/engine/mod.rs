//! Engine module - Runs the personalization rules over one profile and tier.

mod rule_engine;

pub use rule_engine::{RuleEngine, RuleEngineOutput};
