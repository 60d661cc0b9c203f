use crate::core::evidence::EvidenceBundle;

/// A record is a trustworthy witness for an EC when the EC's reaction statement
/// carries both a reaction reference and the specific evidence code, or when the
/// entry is curated and carries at least one of them.
pub fn is_high_confidence(bundle: &EvidenceBundle, reviewed: bool) -> bool {
    (bundle.has_reaction_id && bundle.has_specific_code)
        || (reviewed && (bundle.has_reaction_id || bundle.has_specific_code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bundle(has_reaction_id: bool, has_specific_code: bool) -> EvidenceBundle {
        EvidenceBundle {
            has_reaction_id,
            has_specific_code,
            any_specific_code: has_specific_code,
        }
    }

    #[test]
    fn unreviewed_records_need_both_markers() {
        assert!(is_high_confidence(&bundle(true, true), false));
        assert!(!is_high_confidence(&bundle(true, false), false));
        assert!(!is_high_confidence(&bundle(false, true), false));
        assert!(!is_high_confidence(&bundle(false, false), false));
    }

    #[test]
    fn reviewed_records_need_either_marker() {
        assert!(is_high_confidence(&bundle(true, true), true));
        assert!(is_high_confidence(&bundle(true, false), true));
        assert!(is_high_confidence(&bundle(false, true), true));
        assert!(!is_high_confidence(&bundle(false, false), true));
    }

    #[test]
    fn document_wide_code_alone_does_not_seed() {
        let evidence = EvidenceBundle {
            has_reaction_id: false,
            has_specific_code: false,
            any_specific_code: true,
        };
        assert!(!is_high_confidence(&evidence, true));
    }

}
