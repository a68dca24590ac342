//! Wellness Report - personalization rules engine and bundle validation.
//!
//! Turns a scored health profile and a purchased tier into a gated set of
//! report modules, prioritized lab tests, narrative hints, a meal plan and a
//! supplement list, then runs a deterministic repair pass over the assembled
//! bundle before it is handed to rendering.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
