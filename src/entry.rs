use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::row::ProcessingAnnotation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SequenceValue {
    Single(String),
    Parts(Vec<String>),
}

impl SequenceValue {
    pub fn to_sequence(&self) -> String {
        match self {
            SequenceValue::Single(value) => value.clone(),
            SequenceValue::Parts(parts) => parts.concat(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginalData {
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    #[serde(default)]
    pub unaligned_nucleotide_sequences: IndexMap<String, Option<SequenceValue>>,
}

impl OriginalData {
    pub fn sequence(&self, segment: &str) -> Option<String> {
        self.unaligned_nucleotide_sequences
            .get(segment)
            .and_then(|value| value.as_ref())
            .map(SequenceValue::to_sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEntryToEdit {
    pub accession: String,
    pub version: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub submission_id: Option<String>,
    #[serde(default)]
    pub group_id: Option<u64>,
    #[serde(default)]
    pub original_data: OriginalData,
    #[serde(default)]
    pub errors: Option<Vec<ProcessingAnnotation>>,
    #[serde(default)]
    pub warnings: Option<Vec<ProcessingAnnotation>>,
}

impl SequenceEntryToEdit {
    pub fn errors(&self) -> &[ProcessingAnnotation] {
        self.errors.as_deref().unwrap_or_default()
    }

    pub fn warnings(&self) -> &[ProcessingAnnotation] {
        self.warnings.as_deref().unwrap_or_default()
    }

    pub fn accession_version(&self) -> String {
        format!("{}.{}", self.accession, self.version)
    }
}
