//! # Evidence Module
//!
//! Turns free-text annotation into structured evidence flags.
//!
//! Scanning is abstracted behind [`EvidenceScanner`] so that the tiering engine never
//! depends on a particular annotation syntax. [`uniprot::UniProtScanner`] understands the
//! UniProtKB flat-text `CATALYTIC ACTIVITY` and subcellular-location comments.
//!
//! Scanners never fail: malformed or missing text simply yields no evidence.

pub mod uniprot;

use std::collections::{BTreeMap, BTreeSet};

/// Evidence flags for one record and one EC number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvidenceBundle {
    /// A reaction-database reference appears in a reaction statement naming this EC.
    pub has_reaction_id: bool,
    /// The specific evidence code appears in a reaction statement naming this EC.
    pub has_specific_code: bool,
    /// The specific evidence code appears anywhere in the annotation.
    pub any_specific_code: bool,
}

/// Scan result for one annotation against a set of target ECs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalyticEvidence {
    per_ec: BTreeMap<String, (bool, bool)>,
    any_specific_code: bool,
}

impl CatalyticEvidence {
    /// All-false evidence covering every target EC.
    pub fn empty(targets: &BTreeSet<String>) -> Self {
        Self {
            per_ec: targets.iter().map(|ec| (ec.clone(), (false, false))).collect(),
            any_specific_code: false,
        }
    }

    /// ORs block-level findings into the flags of `ec`.
    pub fn record_block(&mut self, ec: &str, has_reaction_id: bool, has_specific_code: bool) {
        let flags = self.per_ec.entry(ec.to_string()).or_default();
        flags.0 |= has_reaction_id;
        flags.1 |= has_specific_code;
    }

    pub fn mark_specific_code_seen(&mut self) {
        self.any_specific_code = true;
    }

    /// Evidence for one EC; ECs that were never scanned report all-false per-EC flags.
    pub fn for_ec(&self, ec: &str) -> EvidenceBundle {
        let (has_reaction_id, has_specific_code) =
            self.per_ec.get(ec).copied().unwrap_or_default();
        EvidenceBundle {
            has_reaction_id,
            has_specific_code,
            any_specific_code: self.any_specific_code,
        }
    }

    /// True if any scanned EC has a reaction reference.
    pub fn any_reaction_id(&self) -> bool {
        self.per_ec.values().any(|(reaction, _)| *reaction)
    }

    /// True if any scanned EC carries the specific evidence code.
    pub fn any_ec_specific_code(&self) -> bool {
        self.per_ec.values().any(|(_, specific)| *specific)
    }

    pub fn any_specific_code(&self) -> bool {
        self.any_specific_code
    }
}

/// Extracts evidence flags from annotation text.
///
/// Implementations must be pure: the same text and targets always produce the same
/// result, and no input may cause a panic or an error.
pub trait EvidenceScanner: Send + Sync {
    /// Scans catalytic-activity text for reaction and evidence markers per target EC.
    fn scan_catalytic(&self, text: &str, targets: &BTreeSet<String>) -> CatalyticEvidence;

    /// True if the subcellular-location text asserts secretion backed by the specific
    /// evidence code.
    fn secreted_with_evidence(&self, subcellular: &str) -> bool;

    /// The evidence code treated as experimental support, e.g. `ECO:0000269`.
    fn specific_code(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_evidence_is_all_false_for_every_target() {
        let targets = BTreeSet::from(["3.1.1.74".to_string(), "3.1.1.1".to_string()]);
        let evidence = CatalyticEvidence::empty(&targets);
        assert_eq!(evidence.for_ec("3.1.1.74"), EvidenceBundle::default());
        assert_eq!(evidence.for_ec("3.1.1.1"), EvidenceBundle::default());
        assert!(!evidence.any_reaction_id());
        assert!(!evidence.any_ec_specific_code());
        assert!(!evidence.any_specific_code());
    }

    #[test]
    fn record_block_accumulates_with_logical_or() {
        let mut evidence = CatalyticEvidence::default();
        evidence.record_block("3.1.1.74", true, false);
        evidence.record_block("3.1.1.74", false, true);
        evidence.record_block("3.1.1.74", false, false);

        let bundle = evidence.for_ec("3.1.1.74");
        assert!(bundle.has_reaction_id);
        assert!(bundle.has_specific_code);
        assert!(!bundle.any_specific_code);
    }

    #[test]
    fn document_wide_flag_is_shared_by_every_ec() {
        let mut evidence = CatalyticEvidence::default();
        evidence.mark_specific_code_seen();
        assert!(evidence.for_ec("9.9.9.9").any_specific_code);
        assert!(!evidence.for_ec("9.9.9.9").has_specific_code);
    }
}
