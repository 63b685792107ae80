use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::accession::{AccessionRecord, RecordType, merge_inputs, serialize_seqset_records};
use crate::config::ResolvedConfig;
use crate::entry::SequenceEntryToEdit;
use crate::error::SeqsubError;
use crate::fields::{FieldGroup, group_fields, metadata_to_fields};
use crate::metadata::EditableMetadata;
use crate::reserved::ReservedField;
use crate::row::Row;
use crate::sequences::EditableSequences;
use crate::store::OutputDir;
use crate::submission::{RevisedEntry, SubmissionBundle};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormInput {
    #[serde(default)]
    pub metadata: IndexMap<String, String>,
    #[serde(default)]
    pub sequences: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitResult {
    pub submission_id: String,
    pub metadata_path: String,
    pub sequences_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviseResult {
    pub modified_fields: Vec<String>,
    pub body: RevisedEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessionsResult {
    pub records: Vec<AccessionRecord>,
    pub focal: String,
    pub background: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldsResult {
    pub organism: String,
    pub groups: Vec<FieldGroup>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    pub require_sequences: bool,
    pub dry_run: bool,
}

pub struct App {
    config: ResolvedConfig,
}

impl App {
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn metadata_from_form(&self, input: &FormInput) -> EditableMetadata {
        let declared = self
            .config
            .input_fields
            .iter()
            .map(|key| Row::new(key.as_str(), input.metadata.get(key).cloned().unwrap_or_default()));
        let extra = input
            .metadata
            .iter()
            .filter(|(key, _)| !self.config.input_fields.contains(key))
            .map(|(key, value)| {
                debug!(field = %key, "form field not declared in config");
                Row::new(key.as_str(), value.as_str())
            });
        EditableMetadata::from_rows(declared.chain(extra))
    }

    pub fn sequences_from_form(&self, input: &FormInput) -> Result<EditableSequences, SeqsubError> {
        let sequences = EditableSequences::from_sequence_names(self.config.segments.iter().cloned());
        apply_sequence_edits(sequences, &input.sequences)
    }

    pub fn submit(
        &self,
        input: &FormInput,
        submission_id: Option<&str>,
        output: &OutputDir,
        options: SubmitOptions,
    ) -> Result<SubmitResult, SeqsubError> {
        let metadata = self.metadata_from_form(input);
        let sequences = self.sequences_from_form(input)?;
        let submission_id = submission_id
            .map(str::to_string)
            .or_else(|| metadata.submission_id().map(str::to_string))
            .ok_or(SeqsubError::MissingSubmissionId)?;

        let bundle = SubmissionBundle::build(
            &metadata,
            &sequences,
            &submission_id,
            options.require_sequences,
        )?;

        let metadata_path = output.path_for(&bundle.metadata);
        let sequences_path = bundle.sequences.as_ref().map(|file| output.path_for(file));
        if options.dry_run {
            info!(%submission_id, "dry run, nothing written");
        } else {
            output.write(&bundle.metadata)?;
            if let Some(file) = &bundle.sequences {
                output.write(file)?;
            }
            info!(%submission_id, path = %output.root(), "submission files written");
        }

        Ok(SubmitResult {
            submission_id,
            metadata_path: metadata_path.to_string(),
            sequences_path: sequences_path.map(|path| path.to_string()),
        })
    }

    pub fn revise(
        &self,
        entry: &SequenceEntryToEdit,
        edits: Option<&FormInput>,
    ) -> Result<ReviseResult, SeqsubError> {
        let mut metadata = EditableMetadata::from_initial_data(entry);
        let mut sequences = EditableSequences::from_initial_data(entry, &self.config.segments);

        for segment in entry.original_data.unaligned_nucleotide_sequences.keys() {
            if !sequences.contains_segment(segment) {
                warn!(%segment, accession = %entry.accession, "entry segment not in config, dropped");
            }
        }

        if let Some(edits) = edits {
            for (key, value) in &edits.metadata {
                if ReservedField::from_key(key) == Some(ReservedField::AccessionVersion) {
                    warn!(field = %key, "ignoring edit of reserved field");
                    continue;
                }
                metadata = metadata.update_with(metadata.row_or_empty(key).with_value(value.as_str()));
            }
            sequences = apply_sequence_edits(sequences, &edits.sequences)?;
        }

        let modified_fields = metadata
            .modified_rows()
            .chain(sequences.rows().iter().filter(|row| row.is_modified()))
            .map(|row| row.key().to_string())
            .collect::<Vec<_>>();
        let stale_errors = metadata
            .modified_rows()
            .filter(|row| !row.errors.is_empty())
            .count();
        if stale_errors > 0 {
            debug!(stale_errors, "edited fields still carry errors from the last processing run");
        }
        info!(
            accession = %entry.accession_version(),
            modified = modified_fields.len(),
            "revision prepared"
        );

        Ok(ReviseResult {
            modified_fields,
            body: RevisedEntry::new(entry, &metadata, &sequences),
        })
    }

    pub fn accessions(
        &self,
        focal: &str,
        background: &str,
        record_type: Option<RecordType>,
    ) -> AccessionsResult {
        let record_type = record_type.unwrap_or(self.config.accession_record_type);
        let records = merge_inputs(focal, background, record_type);
        debug!(count = records.len(), %record_type, "parsed accession input");
        AccessionsResult {
            focal: serialize_seqset_records(&records, true),
            background: serialize_seqset_records(&records, false),
            records,
        }
    }

    pub fn fields(&self) -> FieldsResult {
        FieldsResult {
            organism: self.config.organism.clone(),
            groups: group_fields(&metadata_to_fields(&self.config.metadata)),
        }
    }
}

fn apply_sequence_edits(
    sequences: EditableSequences,
    edits: &IndexMap<String, String>,
) -> Result<EditableSequences, SeqsubError> {
    edits.iter().try_fold(sequences, |sequences, (segment, value)| {
        if !sequences.contains_segment(segment) {
            return Err(SeqsubError::UnknownSegment(segment.clone()));
        }
        Ok(sequences.update(Row::new(segment.as_str(), value.as_str())))
    })
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SeqsubError> {
    let content =
        fs::read_to_string(path).map_err(|_| SeqsubError::InputRead(path.to_path_buf()))?;
    serde_json::from_str(&content).map_err(|err| SeqsubError::InputParse(err.to_string()))
}
