use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::accession::RecordType;
use crate::error::SeqsubError;
use crate::fields::MetadataDefinition;
use crate::reserved::ReservedField;

pub const DEFAULT_CONFIG_FILE: &str = "seqsub.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub schema_version: Option<u32>,
    #[serde(default)]
    pub organism: Option<String>,
    #[serde(default)]
    pub metadata: Vec<MetadataDefinition>,
    #[serde(default)]
    pub segments: Vec<String>,
    #[serde(default)]
    pub input_fields: Option<Vec<String>>,
    #[serde(default)]
    pub accession_record_type: Option<RecordType>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub schema_version: u32,
    pub organism: String,
    pub metadata: Vec<MetadataDefinition>,
    pub segments: Vec<String>,
    pub input_fields: Vec<String>,
    pub accession_record_type: RecordType,
}

impl ResolvedConfig {
    pub fn is_multi_segmented(&self) -> bool {
        self.segments.len() > 1
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, SeqsubError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Err(SeqsubError::MissingConfig);
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| SeqsubError::ConfigRead(config_path.clone()))?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|err| SeqsubError::ConfigParse(err.to_string()))?;

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, SeqsubError> {
        let schema_version = config.schema_version.unwrap_or(1);

        let segments = if config.segments.is_empty() {
            default_segments()
        } else {
            config.segments
        };

        let input_fields = match config.input_fields {
            Some(fields) => fields,
            None => default_input_fields(&config.metadata),
        };

        if let Some(duplicate) = first_duplicate(&segments) {
            return Err(SeqsubError::ConfigParse(format!(
                "segment listed twice: {duplicate}"
            )));
        }

        Ok(ResolvedConfig {
            schema_version,
            organism: config.organism.unwrap_or_default(),
            metadata: config.metadata,
            segments,
            input_fields,
            accession_record_type: config.accession_record_type.unwrap_or(RecordType::Loculus),
        })
    }
}

pub fn default_segments() -> Vec<String> {
    vec!["main".to_string()]
}

pub fn default_input_fields(metadata: &[MetadataDefinition]) -> Vec<String> {
    std::iter::once(ReservedField::SubmissionId.as_str().to_string())
        .chain(
            metadata
                .iter()
                .filter(|definition| !ReservedField::is_reserved(&definition.name))
                .map(|definition| definition.name.clone()),
        )
        .collect()
}

fn first_duplicate(values: &[String]) -> Option<&str> {
    values
        .iter()
        .enumerate()
        .find(|(index, value)| values[..*index].contains(value))
        .map(|(_, value)| value.as_str())
}
