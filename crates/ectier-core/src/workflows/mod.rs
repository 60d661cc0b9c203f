//! # Workflows Module
//!
//! Top-level entry points that tie [`crate::core`] and [`crate::engine`] together.
//!
//! - **Scoring Workflow** ([`score`]) - learn pass, then parallel classification with a
//!   per-tier summary.
//! - **Report** ([`report`]) - human-readable rendering of the learned family expectations.

pub mod report;
pub mod score;
