use super::{CatalyticEvidence, EvidenceScanner};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Evidence code for experimental evidence used in manual assertion.
pub const DEFAULT_SPECIFIC_CODE: &str = "ECO:0000269";

const REACTION_BLOCK_MARKER: &str = "CATALYTIC ACTIVITY:";
const SECRETED_MARKER: &str = "Secreted";

/// `EC=3.1.1.74`, including incomplete (`3.1.1.-`) and preliminary (`3.1.1.n2`) numbers.
static EC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"EC=(\d+(?:\.(?:n?\d+|-))*)").unwrap());

static RHEA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"RHEA:\d+").unwrap());

static ECO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"ECO:\d{7}").unwrap());

/// Scanner for UniProtKB flat-text comment blocks.
///
/// The catalytic-activity comment is split into reaction statements on the
/// `CATALYTIC ACTIVITY:` marker. Each statement contributes its reaction
/// references (`RHEA:`) and evidence codes (`ECO:`) to every EC it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniProtScanner {
    specific_code: String,
}

impl Default for UniProtScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl UniProtScanner {
    pub fn new() -> Self {
        Self::with_specific_code(DEFAULT_SPECIFIC_CODE)
    }

    pub fn with_specific_code(code: impl Into<String>) -> Self {
        Self {
            specific_code: code.into(),
        }
    }

    fn block_has_specific_code(&self, block: &str) -> bool {
        ECO_RE
            .find_iter(block)
            .any(|code| code.as_str() == self.specific_code)
    }
}

impl EvidenceScanner for UniProtScanner {
    fn scan_catalytic(&self, text: &str, targets: &BTreeSet<String>) -> CatalyticEvidence {
        let mut evidence = CatalyticEvidence::empty(targets);
        if text.trim().is_empty() {
            return evidence;
        }

        for block in text.split(REACTION_BLOCK_MARKER) {
            let has_reaction_id = RHEA_RE.is_match(block);
            let has_specific_code = self.block_has_specific_code(block);

            let block_ecs: BTreeSet<&str> = EC_RE
                .captures_iter(block)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str())
                .collect();
            for ec in block_ecs {
                if targets.contains(ec) {
                    evidence.record_block(ec, has_reaction_id, has_specific_code);
                }
            }

            if has_specific_code {
                evidence.mark_specific_code_seen();
            }
        }
        evidence
    }

    fn secreted_with_evidence(&self, subcellular: &str) -> bool {
        subcellular.contains(SECRETED_MARKER) && subcellular.contains(self.specific_code.as_str())
    }

    fn specific_code(&self) -> &str {
        &self.specific_code
    }
}
