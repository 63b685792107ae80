use indexmap::IndexMap;

use crate::entry::SequenceEntryToEdit;
use crate::error::SeqsubError;
use crate::reserved::ReservedField;
use crate::row::{FieldKind, Row, rows_from_fields};
use crate::submission::SubmissionFile;

pub const METADATA_FILE_NAME: &str = "metadata.tsv";
pub const METADATA_MEDIA_TYPE: &str = "text/tab-separated-values";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditableMetadata {
    rows: Vec<Row>,
}

impl EditableMetadata {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_initial_data(entry: &SequenceEntryToEdit) -> Self {
        let rows = rows_from_fields(
            entry
                .original_data
                .metadata
                .iter()
                .map(|(key, value)| (key.as_str(), value.clone())),
            entry.errors(),
            entry.warnings(),
            FieldKind::Metadata,
        );
        Self { rows }
    }

    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        rows.into_iter()
            .fold(Self::empty(), |metadata, row| metadata.update_with(row))
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.key() == key)
    }

    pub fn row_or_empty(&self, key: &str) -> Row {
        self.row(key).cloned().unwrap_or_else(|| Row::empty(key))
    }

    pub fn update_with(&self, row: Row) -> Self {
        let mut rows = self.rows.clone();
        match rows.iter_mut().find(|existing| existing.key() == row.key()) {
            Some(existing) => existing.value = row.value,
            None => rows.push(row),
        }
        Self { rows }
    }

    pub fn submission_id(&self) -> Option<&str> {
        self.row(ReservedField::SubmissionId.as_str())
            .map(|row| row.value.as_str())
            .filter(|value| !value.is_empty())
    }

    pub fn modified_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter(|row| row.is_modified())
    }

    /// Builds `metadata.tsv`, or `None` when there is nothing to submit.
    pub fn metadata_tsv(
        &self,
        submission_id: Option<&str>,
        accession: Option<&str>,
        fasta_ids: Option<&str>,
    ) -> Result<Option<SubmissionFile>, SeqsubError> {
        if !self.has_submittable_content() {
            return Ok(None);
        }

        let mut rows = self.rows.clone();
        let injected = [
            (ReservedField::SubmissionId, submission_id),
            (ReservedField::Accession, accession),
            (ReservedField::FastaIds, fasta_ids),
        ];
        let mut prepend = Vec::new();
        for (field, value) in injected {
            let Some(value) = value else {
                continue;
            };
            match rows.iter_mut().find(|row| row.key() == field.as_str()) {
                Some(row) => row.value = value.to_string(),
                None => prepend.push(Row::new(field.as_str(), value)),
            }
        }
        prepend.extend(rows);

        let content = write_tsv(&prepend)?;
        Ok(Some(SubmissionFile::new(
            METADATA_FILE_NAME,
            METADATA_MEDIA_TYPE,
            content,
        )))
    }

    pub fn metadata_record(&self) -> IndexMap<String, String> {
        self.rows
            .iter()
            .map(|row| (row.key().to_string(), row.value.clone()))
            .collect()
    }

    fn has_submittable_content(&self) -> bool {
        let mut populated = self.rows.iter().filter(|row| !row.is_empty());
        match (populated.next(), populated.next()) {
            (None, _) => false,
            (Some(only), None) => only.key() != ReservedField::SubmissionId.as_str(),
            _ => true,
        }
    }
}

fn write_tsv(rows: &[Row]) -> Result<String, SeqsubError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer
        .write_record(rows.iter().map(Row::key))
        .map_err(|err| SeqsubError::Tsv(err.to_string()))?;
    writer
        .write_record(rows.iter().map(|row| row.value.as_str()))
        .map_err(|err| SeqsubError::Tsv(err.to_string()))?;
    let bytes = writer
        .into_inner()
        .map_err(|err| SeqsubError::Tsv(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| SeqsubError::Tsv(err.to_string()))
}
