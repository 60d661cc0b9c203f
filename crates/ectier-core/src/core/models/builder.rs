use super::record::Record;

/// Fluent constructor for [`Record`], mainly for programmatic callers and tests.
pub struct RecordBuilder {
    record: Record,
}

impl RecordBuilder {
    pub fn new(accession: &str) -> Self {
        Self {
            record: Record {
                accession: accession.to_string(),
                ..Record::default()
            },
        }
    }

    pub fn ec(mut self, ec: &str) -> Self {
        self.record.ec_numbers.insert(ec.to_string());
        self
    }

    pub fn family(mut self, family_id: &str) -> Self {
        self.record.family_ids.insert(family_id.to_string());
        self
    }

    pub fn interpro(mut self, interpro_id: &str) -> Self {
        self.record.interpro_ids.insert(interpro_id.to_string());
        self
    }

    pub fn structure(mut self, structure_id: &str) -> Self {
        self.record.structure_ids.insert(structure_id.to_string());
        self
    }

    pub fn catalytic_activity(mut self, text: &str) -> Self {
        self.record.catalytic_activity = text.to_string();
        self
    }

    pub fn subcellular_location(mut self, text: &str) -> Self {
        self.record.subcellular_location = text.to_string();
        self
    }

    pub fn reviewed(mut self, reviewed: bool) -> Self {
        self.record.reviewed = reviewed;
        self
    }

    pub fn cazy_xref(mut self, xref: &str) -> Self {
        self.record.cazy_xref = xref.to_string();
        self
    }

    pub fn esther_xref(mut self, xref: &str) -> Self {
        self.record.esther_xref = xref.to_string();
        self
    }

    pub fn organism(mut self, organism: &str) -> Self {
        self.record.organism = organism.to_string();
        self
    }

    pub fn length(mut self, length: &str) -> Self {
        self.record.length = length.to_string();
        self
    }

    pub fn build(self) -> Record {
        self.record
    }
}
