//! # Core Module
//!
//! Stateless building blocks of the tiering engine: the record model, table I/O,
//! free-text evidence scanning and the fallback family signals.
//!
//! ## Architecture
//!
//! - **Record Representation** ([`models`]) - Normalized, immutable protein records
//! - **Table I/O** ([`io`]) - Header normalization and TSV reading/writing
//! - **Evidence Scanning** ([`evidence`]) - Reaction and evidence-code extraction from
//!   annotation text, behind a pluggable scanner trait
//! - **Family Signals** ([`family`]) - CAZy/ESTHER cross-reference checks and
//!   hydrolase proxy domains
//! - **Identifiers** ([`utils`]) - Token splitting and identifier classification
//!
//! Nothing in this layer depends on what was learned from the dataset; that lives in
//! [`crate::engine`].

pub mod evidence;
pub mod family;
pub mod io;
pub mod models;
pub mod utils;
