//! # ectier Core Library
//!
//! Confidence tiering of EC-annotated protein records. Each record is placed in a
//! gold, silver or bronze tier according to its catalytic evidence, its structural and
//! curation status, and whether its domain families agree with the families learned
//! from the dataset's own high-confidence records.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless record models, table I/O with header
//!   normalization, free-text evidence scanning and the independent family signals.
//!
//! - **[`engine`]: The Logic Core.** Seed selection, the family expectation learner and
//!   the ordered tier rules, plus configuration and progress reporting.
//!
//! - **[`workflows`]: The Public API.** Complete learn-then-classify runs and the
//!   learned-family report.

pub mod core;
pub mod engine;
pub mod workflows;
