use super::tsv::TableError;
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Semantic columns understood by the tiering engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Accession,
    EntryName,
    ProteinNames,
    GeneNames,
    Organism,
    TaxonId,
    Length,
    EcNumbers,
    FamilyIds,
    InterproIds,
    StructureIds,
    GoMolecularFunction,
    GoBiologicalProcess,
    SubcellularLocation,
    CatalyticActivity,
    Reviewed,
    CazyXref,
    EstherXref,
}

impl Column {
    /// Columns without which no record can be tiered.
    pub const REQUIRED: [Column; 7] = [
        Column::Accession,
        Column::EcNumbers,
        Column::FamilyIds,
        Column::StructureIds,
        Column::CatalyticActivity,
        Column::SubcellularLocation,
        Column::Reviewed,
    ];

    /// Short internal name; also used as the header when writing tables back out.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Column::Accession => "acc",
            Column::EntryName => "entry",
            Column::ProteinNames => "protein",
            Column::GeneNames => "gene",
            Column::Organism => "organism",
            Column::TaxonId => "taxid",
            Column::Length => "length",
            Column::EcNumbers => "ec_list",
            Column::FamilyIds => "pfam_list",
            Column::InterproIds => "interpro_list",
            Column::StructureIds => "pdb_list",
            Column::GoMolecularFunction => "go_mf",
            Column::GoBiologicalProcess => "go_bp",
            Column::SubcellularLocation => "subcellular",
            Column::CatalyticActivity => "catalytic",
            Column::Reviewed => "reviewed",
            Column::CazyXref => "xref_cazy",
            Column::EstherXref => "xref_esther",
        }
    }

    /// Header name used by UniProtKB TSV exports.
    pub fn export_name(self) -> &'static str {
        match self {
            Column::Accession => "Entry",
            Column::EntryName => "Entry Name",
            Column::ProteinNames => "Protein names",
            Column::GeneNames => "Gene Names",
            Column::Organism => "Organism",
            Column::TaxonId => "Organism (ID)",
            Column::Length => "Length",
            Column::EcNumbers => "EC number",
            Column::FamilyIds => "Pfam",
            Column::InterproIds => "InterPro",
            Column::StructureIds => "PDB",
            Column::GoMolecularFunction => "Gene Ontology (molecular function)",
            Column::GoBiologicalProcess => "Gene Ontology (biological process)",
            Column::SubcellularLocation => "Subcellular location [CC]",
            Column::CatalyticActivity => "Catalytic activity",
            Column::Reviewed => "Reviewed",
            Column::CazyXref => "xref_cazy",
            Column::EstherXref => "xref_esther",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.export_name(), self.canonical_name())
    }
}

/// Lower-cased header spellings accepted for each column.
static HEADER_SYNONYMS: Map<&'static str, Column> = phf_map! {
    "entry" => Column::Accession,
    "accession" => Column::Accession,
    "acc" => Column::Accession,
    "entry name" => Column::EntryName,
    "entry_name" => Column::EntryName,
    "protein names" => Column::ProteinNames,
    "protein" => Column::ProteinNames,
    "gene names (primary)" => Column::GeneNames,
    "gene names" => Column::GeneNames,
    "gene" => Column::GeneNames,
    "organism" => Column::Organism,
    "organism (id)" => Column::TaxonId,
    "taxid" => Column::TaxonId,
    "length" => Column::Length,
    "ec number" => Column::EcNumbers,
    "ec_number" => Column::EcNumbers,
    "ec_list" => Column::EcNumbers,
    "pfam" => Column::FamilyIds,
    "pfam_list" => Column::FamilyIds,
    "interpro" => Column::InterproIds,
    "interpro_list" => Column::InterproIds,
    "pdb" => Column::StructureIds,
    "pdb_list" => Column::StructureIds,
    "gene ontology (molecular function)" => Column::GoMolecularFunction,
    "go_mf" => Column::GoMolecularFunction,
    "gene ontology (biological process)" => Column::GoBiologicalProcess,
    "go_bp" => Column::GoBiologicalProcess,
    "subcellular location [cc]" => Column::SubcellularLocation,
    "subcellular location" => Column::SubcellularLocation,
    "subcellular" => Column::SubcellularLocation,
    "catalytic activity" => Column::CatalyticActivity,
    "catalytic" => Column::CatalyticActivity,
    "reviewed" => Column::Reviewed,
    "xref_cazy" => Column::CazyXref,
    "cazy" => Column::CazyXref,
    "xref_esther" => Column::EstherXref,
    "esther" => Column::EstherXref,
};

/// Trims a raw header cell and repairs the truncated `ntry` spelling some
/// exports produce for `Entry`.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim_start_matches('\u{feff}').trim();
    if trimmed.eq_ignore_ascii_case("ntry") {
        return "Entry".to_string();
    }
    trimmed.to_string()
}

pub fn resolve_column(raw: &str) -> Option<Column> {
    let normalized = normalize_header(raw).to_lowercase();
    HEADER_SYNONYMS.get(normalized.as_str()).copied()
}

/// Positions of recognized columns within a header row, plus the output names
/// of every column (canonical names for recognized ones, the raw header otherwise).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnLayout {
    names: Vec<String>,
    positions: HashMap<Column, usize>,
}

impl ColumnLayout {
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, TableError> {
        let mut layout = ColumnLayout::default();

        for (index, raw) in headers.into_iter().enumerate() {
            match resolve_column(raw) {
                Some(column) => {
                    if layout.positions.contains_key(&column) {
                        warn!(
                            header = raw,
                            column = column.canonical_name(),
                            "Duplicate header for an already mapped column; keeping the first."
                        );
                        layout.names.push(normalize_header(raw));
                    } else {
                        layout.positions.insert(column, index);
                        layout.names.push(column.canonical_name().to_string());
                    }
                }
                None => layout.names.push(normalize_header(raw)),
            }
        }

        let missing: Vec<Column> = Column::REQUIRED
            .into_iter()
            .filter(|column| !layout.positions.contains_key(column))
            .collect();
        if !missing.is_empty() {
            return Err(TableError::MissingColumns {
                columns: missing.iter().map(ToString::to_string).collect(),
            });
        }

        debug!(
            recognized = layout.positions.len(),
            total = layout.names.len(),
            "Resolved input header."
        );
        Ok(layout)
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn width(&self) -> usize {
        self.names.len()
    }
}
