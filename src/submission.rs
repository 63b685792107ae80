use indexmap::IndexMap;
use serde::Serialize;

use crate::entry::SequenceEntryToEdit;
use crate::error::SeqsubError;
use crate::metadata::EditableMetadata;
use crate::sequences::EditableSequences;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionFile {
    pub name: String,
    pub media_type: String,
    pub content: String,
}

impl SubmissionFile {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionBundle {
    pub metadata: SubmissionFile,
    pub sequences: Option<SubmissionFile>,
}

impl SubmissionBundle {
    /// Fails with `NothingToSubmit` for empty metadata, and with `NoSequences`
    /// when `require_sequences` is set but every segment is empty.
    pub fn build(
        metadata: &EditableMetadata,
        sequences: &EditableSequences,
        submission_id: &str,
        require_sequences: bool,
    ) -> Result<Self, SeqsubError> {
        let fasta = sequences.sequence_fasta(submission_id);
        if require_sequences && fasta.is_none() {
            return Err(SeqsubError::NoSequences);
        }
        let fasta_ids = fasta
            .as_ref()
            .map(|_| sequences.fasta_ids(submission_id).join(" "));
        let tsv = metadata
            .metadata_tsv(Some(submission_id), None, fasta_ids.as_deref())?
            .ok_or(SeqsubError::NothingToSubmit)?;
        Ok(Self {
            metadata: tsv,
            sequences: fasta,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisedData {
    pub metadata: IndexMap<String, String>,
    pub unaligned_nucleotide_sequences: IndexMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisedEntry {
    pub accession: String,
    pub version: u64,
    pub data: RevisedData,
}

impl RevisedEntry {
    pub fn new(
        entry: &SequenceEntryToEdit,
        metadata: &EditableMetadata,
        sequences: &EditableSequences,
    ) -> Self {
        let unaligned_nucleotide_sequences = sequences
            .sequence_record()
            .into_iter()
            .map(|(segment, value)| (segment, Some(value).filter(|value| !value.is_empty())))
            .collect();
        Self {
            accession: entry.accession.clone(),
            version: entry.version,
            data: RevisedData {
                metadata: metadata.metadata_record(),
                unaligned_nucleotide_sequences,
            },
        }
    }
}
