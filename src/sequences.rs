use indexmap::IndexMap;

use crate::entry::SequenceEntryToEdit;
use crate::row::{FieldKind, Row, rows_from_fields};
use crate::submission::SubmissionFile;

pub const SEQUENCE_FILE_NAME: &str = "sequences.fasta";
pub const SEQUENCE_MEDIA_TYPE: &str = "text/plain";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditableSequences {
    rows: Vec<Row>,
}

impl EditableSequences {
    pub fn from_sequence_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows: Vec<Row> = Vec::new();
        for name in names {
            let name = name.into();
            if rows.iter().all(|row| row.key() != name) {
                rows.push(Row::empty(name));
            }
        }
        Self { rows }
    }

    pub fn from_initial_data<S: AsRef<str>>(
        entry: &SequenceEntryToEdit,
        segment_names: &[S],
    ) -> Self {
        let mut seen: Vec<&str> = Vec::new();
        for name in segment_names {
            if !seen.contains(&name.as_ref()) {
                seen.push(name.as_ref());
            }
        }
        let rows = rows_from_fields(
            seen.into_iter().map(|name| {
                let value = entry.original_data.sequence(name).unwrap_or_default();
                (name, value)
            }),
            entry.errors(),
            entry.warnings(),
            FieldKind::NucleotideSequence,
        );
        Self { rows }
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.key() == key)
    }

    pub fn contains_segment(&self, key: &str) -> bool {
        self.row(key).is_some()
    }

    pub fn update(&self, row: Row) -> Self {
        let mut rows = self.rows.clone();
        if let Some(existing) = rows.iter_mut().find(|existing| existing.key() == row.key()) {
            existing.value = row.value;
        }
        Self { rows }
    }

    pub fn fasta_ids(&self, submission_id: &str) -> Vec<String> {
        let single = self.rows.len() == 1;
        self.rows
            .iter()
            .filter(|row| !row.is_empty())
            .map(|row| {
                if single {
                    submission_id.to_string()
                } else {
                    format!("{submission_id}_{}", row.key())
                }
            })
            .collect()
    }

    /// Builds `sequences.fasta`, omitting empty segments. `None` when all are empty.
    pub fn sequence_fasta(&self, submission_id: &str) -> Option<SubmissionFile> {
        let records: Vec<String> = self
            .fasta_ids(submission_id)
            .into_iter()
            .zip(self.rows.iter().filter(|row| !row.is_empty()))
            .map(|(header, row)| format!(">{header}\n{}", row.value))
            .collect();
        if records.is_empty() {
            return None;
        }
        Some(SubmissionFile::new(
            SEQUENCE_FILE_NAME,
            SEQUENCE_MEDIA_TYPE,
            records.join("\n"),
        ))
    }

    pub fn sequence_record(&self) -> IndexMap<String, String> {
        self.rows
            .iter()
            .map(|row| (row.key().to_string(), row.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_with_annotations() -> SequenceEntryToEdit {
        serde_json::from_value(serde_json::json!({
            "accession": "LOC_0002",
            "version": 1,
            "originalData": {
                "metadata": {"L": "not a segment"},
                "unalignedNucleotideSequences": {"L": "ACGT", "S": "TTTT"}
            },
            "errors": [
                {
                    "unprocessedFields": [{"name": "L", "type": "NucleotideSequence"}],
                    "processedFields": [],
                    "message": "too many Ns"
                },
                {
                    "unprocessedFields": [{"name": "L", "type": "Metadata"}],
                    "processedFields": [],
                    "message": "metadata field L is invalid"
                }
            ],
            "warnings": [{
                "unprocessedFields": [{"name": "L", "type": "NucleotideSequence"}],
                "processedFields": [],
                "message": "short sequence"
            }]
        }))
        .unwrap()
    }

    #[test]
    fn initial_data_attaches_sequence_annotations_only() {
        let entry = entry_with_annotations();
        let sequences = EditableSequences::from_initial_data(&entry, &["L", "M"]);

        let rows = sequences.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key(), "L");
        assert_eq!(rows[0].value, "ACGT");
        assert_eq!(rows[0].initial_value, "ACGT");
        assert_eq!(rows[0].errors, vec!["too many Ns".to_string()]);
        assert_eq!(rows[0].warnings, vec!["short sequence".to_string()]);

        assert_eq!(rows[1].key(), "M");
        assert!(rows[1].is_empty());
        assert!(rows[1].initial_value.is_empty());
        assert!(rows[1].errors.is_empty());
        assert!(rows[1].warnings.is_empty());

        assert!(!sequences.contains_segment("S"));
        assert!(entry.errors()[1].refers_to("L", FieldKind::Metadata));
    }

    #[test]
    fn update_never_adds_segments() {
        let sequences = EditableSequences::from_sequence_names(["L", "S"]);
        let updated = sequences.update(Row::new("M", "ACGT"));
        assert_eq!(updated, sequences);
        assert!(!updated.contains_segment("M"));
    }

    #[test]
    fn duplicate_names_collapse() {
        let sequences = EditableSequences::from_sequence_names(["main", "main"]);
        assert_eq!(sequences.rows().len(), 1);
    }

    #[test]
    fn single_segment_header_is_unqualified() {
        let sequences =
            EditableSequences::from_sequence_names(["main"]).update(Row::new("main", "ACGT"));
        let file = sequences.sequence_fasta("subId").unwrap();
        assert_eq!(file.content, ">subId\nACGT");
        assert_eq!(file.name, SEQUENCE_FILE_NAME);
    }

    #[test]
    fn multi_segment_records_joined() {
        let sequences = EditableSequences::from_sequence_names(["L", "M", "S"])
            .update(Row::new("L", "AAA"))
            .update(Row::new("S", "CCC"));
        let file = sequences.sequence_fasta("x").unwrap();
        assert_eq!(file.content, ">x_L\nAAA\n>x_S\nCCC");
        assert_eq!(sequences.fasta_ids("x"), vec!["x_L".to_string(), "x_S".to_string()]);
    }

    #[test]
    fn all_empty_yields_none() {
        let sequences = EditableSequences::from_sequence_names(["L", "S"]);
        assert!(sequences.sequence_fasta("x").is_none());
        assert_eq!(sequences.sequence_record().len(), 2);
    }
}
