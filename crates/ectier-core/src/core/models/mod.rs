//! # Core Models Module
//!
//! Data structures describing the protein records that flow through the tiering engine.
//!
//! ## Key Components
//!
//! - [`record`] - A normalized, immutable protein entry (EC numbers, family ids,
//!   structures, free-text annotations, review status and cross-references)
//! - [`builder`] - Fluent construction of records outside of table parsing
//!
//! ## Usage
//!
//! ```
//! use ectier::core::models::builder::RecordBuilder;
//!
//! let record = RecordBuilder::new("Q9UR50")
//!     .ec("3.1.1.74")
//!     .family("PF01083")
//!     .reviewed(true)
//!     .build();
//! assert!(record.reviewed);
//! ```

pub mod builder;
pub mod record;
