//! Reading and writing tab-separated record tables.
//!
//! Header cells are normalized through a synonym table so UniProtKB exports,
//! enriched exports and tables using the short internal names all load the same
//! way. Unrecognized columns are carried through untouched.

pub mod header;
pub mod tsv;
