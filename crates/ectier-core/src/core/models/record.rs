use std::collections::BTreeSet;

/// One protein entry from the input table, after column normalization.
///
/// All identifier lists are stored as sorted sets; absent or empty cells
/// become empty sets or empty strings, never placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub accession: String,
    pub ec_numbers: BTreeSet<String>,
    /// Pfam domain-family accessions.
    pub family_ids: BTreeSet<String>,
    pub interpro_ids: BTreeSet<String>,
    /// PDB structure identifiers.
    pub structure_ids: BTreeSet<String>,
    pub catalytic_activity: String,
    pub subcellular_location: String,
    pub reviewed: bool,
    /// CAZy family cross-reference, as exported (`"GH13; CBM20"`).
    pub cazy_xref: String,
    /// ESTHER family cross-reference, as exported.
    pub esther_xref: String,
    pub organism: String,
    pub length: String,
}

impl Record {
    /// ECs of this record that are also in `targets`, in sorted order.
    pub fn target_ecs<'a>(
        &'a self,
        targets: &'a BTreeSet<String>,
    ) -> impl Iterator<Item = &'a String> + 'a {
        self.ec_numbers.intersection(targets)
    }

    pub fn is_in_scope(&self, targets: &BTreeSet<String>) -> bool {
        self.target_ecs(targets).next().is_some()
    }

    pub fn has_structure(&self) -> bool {
        !self.structure_ids.is_empty()
    }
}
