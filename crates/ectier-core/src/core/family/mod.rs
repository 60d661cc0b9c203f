//! # Family Module
//!
//! Family-membership signals that do not depend on what the learner found in the
//! dataset: curated CAZy and ESTHER cross-references, and (optionally) domain
//! identifiers that reliably stand in for an ESTHER assignment.

use crate::core::models::record::Record;
use crate::core::utils::identifiers::{
    is_carbohydrate_active_family, is_hydrolase_proxy_family, is_hydrolase_proxy_interpro,
};

/// Which independent family signal a record carries, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSignal {
    CarbohydrateActive,
    HydrolaseXref,
    HydrolaseProxy,
}

/// True if the CAZy cross-reference lists a carbohydrate-active family
/// (`GH`, `PL`, `CE` or `CBM` after normalization).
pub fn has_carbohydrate_active_xref(record: &Record) -> bool {
    record
        .cazy_xref
        .split([';', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .any(is_carbohydrate_active_family)
}

pub fn has_hydrolase_xref(record: &Record) -> bool {
    !record.esther_xref.trim().is_empty()
}

/// True if the record carries a domain identifier that stands in for an ESTHER
/// cross-reference: the alpha/beta hydrolase superfamily or a cutinase domain.
pub fn has_hydrolase_proxy(record: &Record) -> bool {
    record
        .interpro_ids
        .iter()
        .any(|id| is_hydrolase_proxy_interpro(id))
        || record
            .family_ids
            .iter()
            .any(|id| is_hydrolase_proxy_family(id))
}

/// First independent family signal found on the record, checked in the order
/// CAZy, ESTHER, proxy. The proxy is only consulted when `use_proxy` is set.
pub fn fallback_signal(record: &Record, use_proxy: bool) -> Option<FallbackSignal> {
    if has_carbohydrate_active_xref(record) {
        Some(FallbackSignal::CarbohydrateActive)
    } else if has_hydrolase_xref(record) {
        Some(FallbackSignal::HydrolaseXref)
    } else if use_proxy && has_hydrolase_proxy(record) {
        Some(FallbackSignal::HydrolaseProxy)
    } else {
        None
    }
}
