use super::header::{Column, ColumnLayout};
use crate::core::models::record::Record;
use crate::core::utils::identifiers::{parse_reviewed_flag, parse_token_set};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, WriterBuilder};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Input table has no header row")]
    MissingHeader,
    #[error("Required column(s) missing from header: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
}

/// A tab-separated record table: the normalized records plus the raw rows
/// they came from, kept in input order for passthrough output.
#[derive(Debug, Clone)]
pub struct RecordTable {
    layout: ColumnLayout,
    rows: Vec<StringRecord>,
    records: Vec<Record>,
}

impl RecordTable {
    /// Reads a headed TSV table. Fails only on structural problems (unreadable
    /// input, no header, required columns absent); short rows and empty cells
    /// are accepted and read as empty values.
    pub fn read_from(reader: impl Read) -> Result<Self, TableError> {
        let mut tsv = ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .flexible(true)
            .has_headers(true)
            .from_reader(reader);

        let headers = StringRecord::from_byte_record_lossy(tsv.byte_headers()?.clone());
        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(TableError::MissingHeader);
        }
        let layout = ColumnLayout::from_headers(headers.iter())?;

        let mut rows = Vec::new();
        let mut records = Vec::new();
        let mut lossy_rows = 0usize;
        for result in tsv.byte_records() {
            let row = match StringRecord::from_byte_record(result?) {
                Ok(row) => row,
                Err(err) => {
                    lossy_rows += 1;
                    StringRecord::from_byte_record_lossy(err.into_byte_record())
                }
            };
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            records.push(Self::parse_record(&layout, &row));
            rows.push(row);
        }

        if lossy_rows > 0 {
            warn!(rows = lossy_rows, "Replaced invalid UTF-8 bytes in record table.");
        }
        debug!(records = records.len(), "Parsed record table.");
        Ok(Self {
            layout,
            rows,
            records,
        })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let file = File::open(path.as_ref())?;
        let table = Self::read_from(BufReader::new(file))?;
        info!(
            path = %path.as_ref().display(),
            records = table.records.len(),
            "Loaded record table."
        );
        Ok(table)
    }

    fn parse_record(layout: &ColumnLayout, row: &StringRecord) -> Record {
        let cell = |column: Column| cell_value(layout, row, column);

        Record {
            accession: cell(Column::Accession).trim().to_string(),
            ec_numbers: parse_token_set(cell(Column::EcNumbers)),
            family_ids: parse_token_set(cell(Column::FamilyIds)),
            interpro_ids: parse_token_set(cell(Column::InterproIds)),
            structure_ids: parse_token_set(cell(Column::StructureIds)),
            catalytic_activity: cell(Column::CatalyticActivity).to_string(),
            subcellular_location: cell(Column::SubcellularLocation).to_string(),
            reviewed: parse_reviewed_flag(cell(Column::Reviewed)),
            cazy_xref: cell(Column::CazyXref).trim().to_string(),
            esther_xref: cell(Column::EstherXref).trim().to_string(),
            organism: cell(Column::Organism).trim().to_string(),
            length: cell(Column::Length).trim().to_string(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Raw cell text of `column` in row `index`; empty when the row, the column or
    /// the cell is absent.
    pub fn cell(&self, index: usize, column: Column) -> &str {
        self.rows
            .get(index)
            .map_or("", |row| cell_value(&self.layout, row, column))
    }

    /// Writes the selected input rows unchanged, with one extra column appended.
    ///
    /// `selection` yields `(row index, extra value)` pairs; rows shorter than the
    /// header are padded with empty cells so the extra column stays aligned.
    pub fn write_with_extra_column<'a>(
        &self,
        extra_column: &str,
        selection: impl IntoIterator<Item = (usize, &'a str)>,
        writer: impl Write,
    ) -> Result<usize, TableError> {
        let mut out = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .flexible(true)
            .from_writer(writer);

        let width = self.layout.width();
        let mut header: Vec<&str> = self.layout.names().iter().map(String::as_str).collect();
        header.push(extra_column);
        out.write_record(&header)?;

        let mut written = 0;
        for (index, value) in selection {
            let Some(row) = self.rows.get(index) else {
                continue;
            };
            let mut cells: Vec<&str> = (0..width).map(|i| row.get(i).unwrap_or("")).collect();
            cells.push(value);
            out.write_record(&cells)?;
            written += 1;
        }
        out.flush()?;
        Ok(written)
    }

    pub fn write_with_extra_column_to_path<'a, P: AsRef<Path>>(
        &self,
        extra_column: &str,
        selection: impl IntoIterator<Item = (usize, &'a str)>,
        path: P,
    ) -> Result<usize, TableError> {
        let file = File::create(path)?;
        self.write_with_extra_column(extra_column, selection, BufWriter::new(file))
    }
}

fn cell_value<'r>(layout: &ColumnLayout, row: &'r StringRecord, column: Column) -> &'r str {
    layout
        .position(column)
        .and_then(|index| row.get(index))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "Entry\tOrganism\tLength\tEC number\tPfam\tPDB\tCatalytic activity\tSubcellular location [CC]\tReviewed\txref_cazy\txref_esther";

    fn table(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn read_from_parses_uniprot_export_rows() {
        let input = table(&[
            "Q9UR50\tFusarium solani\t230\t3.1.1.74\tPF01083;\t1CEX;1AGY;\tCATALYTIC ACTIVITY: EC=3.1.1.74\tSecreted\treviewed\t\tCutinase",
        ]);
        let table = RecordTable::read_from(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);

        let record = &table.records()[0];
        assert_eq!(record.accession, "Q9UR50");
        assert!(record.ec_numbers.contains("3.1.1.74"));
        assert!(record.family_ids.contains("PF01083"));
        assert_eq!(record.structure_ids.len(), 2);
        assert!(record.reviewed);
        assert_eq!(record.esther_xref, "Cutinase");
        assert!(record.cazy_xref.is_empty());
        assert_eq!(record.organism, "Fusarium solani");
        assert_eq!(record.length, "230");
    }

    #[test]
    fn short_rows_and_blank_lines_degrade_to_empty_fields() {
        let input = table(&["P00001\tE. coli", "", "P00002\t\t\t3.1.1.74"]);
        let table = RecordTable::read_from(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.records()[0];
        assert!(first.ec_numbers.is_empty());
        assert!(!first.reviewed);
        assert!(first.catalytic_activity.is_empty());

        let second = &table.records()[1];
        assert!(second.ec_numbers.contains("3.1.1.74"));
        assert!(second.family_ids.is_empty());
    }

    #[test]
    fn invalid_utf8_in_a_cell_keeps_every_row() {
        let mut input = table(&["P1\tOrg\t100\t3.1.1.74\tPF01083"]).into_bytes();
        input.extend_from_slice(b"P2\tOrg\t120\t3.1.1.74\tPF00001\t\tcaf\xe9 ester; EC=3.1.1.74\n");

        let table = RecordTable::read_from(input.as_slice()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].accession, "P1");

        let second = &table.records()[1];
        assert_eq!(second.accession, "P2");
        assert!(second.family_ids.contains("PF00001"));
        assert_eq!(second.catalytic_activity, "caf\u{FFFD} ester; EC=3.1.1.74");
    }

    #[test]
    fn cell_returns_raw_text_or_empty() {
        let input = table(&["P1\tOrg\t100\t3.1.1.74; 3.1.1.1\tPF01083"]);
        let table = RecordTable::read_from(input.as_bytes()).unwrap();
        assert_eq!(table.cell(0, Column::EcNumbers), "3.1.1.74; 3.1.1.1");
        assert_eq!(table.cell(0, Column::Reviewed), "");
        assert_eq!(table.cell(0, Column::InterproIds), "");
        assert_eq!(table.cell(5, Column::Accession), "");
    }

    #[test]
    fn quotes_in_free_text_are_kept_verbatim() {
        let input = table(&[
            "P1\t\t\t3.1.1.74\t\t\tCATALYTIC ACTIVITY: Reaction=\"ester\" + H2O\t\t\t\t",
        ]);
        let table = RecordTable::read_from(input.as_bytes()).unwrap();
        assert!(table.records()[0].catalytic_activity.contains("\"ester\""));
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let input = "Entry\tPfam\nP1\tPF01083\n";
        let result = RecordTable::read_from(input.as_bytes());
        assert!(matches!(result, Err(TableError::MissingColumns { .. })));
    }

    #[test]
    fn empty_input_has_no_header() {
        let result = RecordTable::read_from("".as_bytes());
        assert!(matches!(result, Err(TableError::MissingHeader)));
    }

    #[test]
    fn read_from_path_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = RecordTable::read_from_path(dir.path().join("absent.tsv"));
        assert!(matches!(result, Err(TableError::Io(_))));
    }

    #[test]
    fn write_with_extra_column_uses_canonical_headers_and_pads_rows() {
        let input = table(&[
            "P1\tOrg\t100\t3.1.1.74\tPF01083\t\t\t\treviewed\t\t",
            "P2\tOrg",
        ]);
        let table = RecordTable::read_from(input.as_bytes()).unwrap();

        let dir = tempdir().unwrap();
        let out_path = dir.path().join("full.tsv");
        let written = table
            .write_with_extra_column_to_path("Tier", [(1, "bronze"), (0, "gold")], &out_path)
            .unwrap();
        assert_eq!(written, 2);

        let content = fs::read_to_string(&out_path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("acc\torganism\tlength\tec_list\tpfam_list"));
        assert!(lines[0].ends_with("\tTier"));
        assert_eq!(lines[1].split('\t').count(), 12);
        assert!(lines[1].starts_with("P2\tOrg\t"));
        assert!(lines[1].ends_with("\tbronze"));
        assert!(lines[2].starts_with("P1\t"));
        assert!(lines[2].ends_with("\tgold"));
    }

    #[test]
    fn write_with_extra_column_skips_unknown_indices() {
        let input = table(&["P1\tOrg\t100\t3.1.1.74\t\t\t\t\t\t\t"]);
        let table = RecordTable::read_from(input.as_bytes()).unwrap();
        let mut buffer = Vec::new();
        let written = table
            .write_with_extra_column("Tier", [(7, "gold")], &mut buffer)
            .unwrap();
        assert_eq!(written, 0);
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
