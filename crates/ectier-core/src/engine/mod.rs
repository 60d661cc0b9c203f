//! # Engine Module
//!
//! The two-phase scoring engine. The learn pass ([`learner`]) turns high-confidence
//! seed records ([`seed`]) into a frozen [`learner::ExpectedFamilySet`]; the classify
//! pass ([`tier`]) then assigns each record a tier by reading that set and the record's
//! own evidence.
//!
//! - **Configuration** ([`config`]) - target ECs, learning thresholds and fallback switches
//! - **Progress Monitoring** ([`progress`]) - phase and task events for front ends
//! - **Error Handling** ([`error`]) - engine-level error types

pub mod config;
pub mod error;
pub mod learner;
pub mod progress;
pub mod seed;
pub mod tier;
