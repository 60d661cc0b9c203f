use super::config::TieringConfig;
use super::learner::ExpectedFamilySet;
use crate::core::evidence::EvidenceScanner;
use crate::core::family::{FallbackSignal, fallback_signal};
use crate::core::models::record::Record;
use serde::Serialize;
use std::fmt;
use tracing::trace;

/// Confidence tier of a record, ordered `Skip < Bronze < Silver < Gold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// The record names none of the target ECs.
    Skip,
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// Reportable tiers, best first.
    pub const RANKED: [Tier; 3] = [Tier::Gold, Tier::Silver, Tier::Bronze];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Skip => "skip",
            Tier::Bronze => "bronze",
            Tier::Silver => "silver",
            Tier::Gold => "gold",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a record's family membership was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FamilyBasis {
    /// A family id matches the learned expectation of one of its target ECs.
    Expected,
    /// An independent family signal (CAZy, ESTHER or proxy domain).
    Fallback(FallbackSignal),
    /// None of its target ECs has a learned expectation, so nothing can be held against it.
    Lenient,
}

/// Per-record inputs to the tier rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierSignals {
    pub family_ok: bool,
    /// A target EC's reaction statement carries a reaction reference.
    pub has_reaction_id: bool,
    /// A target EC's reaction statement carries the specific evidence code.
    pub has_ec_specific_code: bool,
    /// The specific evidence code appears anywhere in the catalytic text.
    pub has_any_specific_code: bool,
    pub has_structure: bool,
    pub secreted_with_evidence: bool,
    pub reviewed: bool,
}

/// One entry of the ordered tier rule list.
pub struct TierRule {
    pub tier: Tier,
    pub description: &'static str,
    pub applies: fn(&TierSignals) -> bool,
}

fn gold_rule(s: &TierSignals) -> bool {
    s.family_ok && s.has_ec_specific_code && (s.has_reaction_id || s.has_structure || s.reviewed)
}

fn silver_rule(s: &TierSignals) -> bool {
    s.family_ok
        && (s.has_reaction_id
            || s.has_structure
            || s.has_any_specific_code
            || s.secreted_with_evidence
            || s.reviewed)
}

/// Tier rules in priority order; the first rule that applies decides the tier and
/// records matching none are [`Tier::Bronze`].
pub const TIER_RULES: [TierRule; 2] = [
    TierRule {
        tier: Tier::Gold,
        description: "family accepted, EC-specific experimental evidence, and a reaction reference, structure or curation",
        applies: gold_rule,
    },
    TierRule {
        tier: Tier::Silver,
        description: "family accepted and any reaction reference, structure, experimental evidence, evidenced secretion or curation",
        applies: silver_rule,
    },
];

pub fn resolve_tier(signals: &TierSignals) -> Tier {
    match TIER_RULES.iter().find(|rule| (rule.applies)(signals)) {
        Some(rule) => {
            trace!(tier = %rule.tier, rule = rule.description, "Tier rule applied.");
            rule.tier
        }
        None => Tier::Bronze,
    }
}

/// Outcome of classifying one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub tier: Tier,
    /// `None` for skipped records.
    pub signals: Option<TierSignals>,
    pub family_basis: Option<FamilyBasis>,
}

impl Classification {
    fn skipped() -> Self {
        Self {
            tier: Tier::Skip,
            signals: None,
            family_basis: None,
        }
    }
}

/// Decides whether the record's family membership is acceptable for its target ECs.
///
/// A matching learned family wins first, then an independent fallback signal. If
/// neither holds, the record is still accepted when none of its target ECs has a
/// learned (non-empty) expectation.
pub fn family_basis(
    record: &Record,
    expected: &ExpectedFamilySet,
    config: &TieringConfig,
) -> Option<FamilyBasis> {
    let mut any_constrained = false;
    for ec in record.target_ecs(&config.target_ecs) {
        if let Some(expectation) = expected.constraint_for(ec) {
            any_constrained = true;
            if expectation.is_met_by(&record.family_ids) {
                return Some(FamilyBasis::Expected);
            }
        }
    }

    if let Some(signal) = fallback_signal(record, config.use_hydrolase_proxy) {
        return Some(FamilyBasis::Fallback(signal));
    }
    if !any_constrained {
        return Some(FamilyBasis::Lenient);
    }
    None
}

/// Classify pass for a single record against a frozen expectation set.
pub fn classify(
    record: &Record,
    scanner: &dyn EvidenceScanner,
    expected: &ExpectedFamilySet,
    config: &TieringConfig,
) -> Classification {
    if !record.is_in_scope(&config.target_ecs) {
        return Classification::skipped();
    }

    let basis = family_basis(record, expected, config);
    let evidence = scanner.scan_catalytic(&record.catalytic_activity, &config.target_ecs);

    let signals = TierSignals {
        family_ok: basis.is_some(),
        has_reaction_id: evidence.any_reaction_id(),
        has_ec_specific_code: evidence.any_ec_specific_code(),
        has_any_specific_code: evidence.any_specific_code(),
        has_structure: record.has_structure(),
        secreted_with_evidence: scanner.secreted_with_evidence(&record.subcellular_location),
        reviewed: record.reviewed,
    };

    Classification {
        tier: resolve_tier(&signals),
        signals: Some(signals),
        family_basis: basis,
    }
}
