//! Labs module - Lab test recommendations.
//!
//! # Components
//!
//! - `LabTest` - A single recommendation
//! - `LabTestAccumulator` - Call-local max-merge map keyed by exact test name
//! - `LabTestPrioritizer` - Evaluates the `LAB_RULES` table

mod lab_test;
mod prioritizer;

pub use lab_test::{prune_and_sort, LabTest, LabTestAccumulator};
pub use prioritizer::{LabRule, LabTestPrioritizer, LabTestSpec, LabTrigger, LAB_RULES};
