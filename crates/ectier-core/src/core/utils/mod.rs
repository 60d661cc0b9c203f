//! Identifier parsing and classification helpers shared by the I/O and family layers.

pub mod identifiers;
