//! Supplements module - Supplement suggestions for the supplement guide.

mod recommender;

pub use recommender::{SupplementRecommender, SupplementRule, SUPPLEMENT_RULES};
