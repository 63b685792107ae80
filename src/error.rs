use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum SeqsubError {
    #[error("missing config file seqsub.json in current directory")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("failed to read input file at {0}")]
    InputRead(PathBuf),

    #[error("failed to parse input JSON: {0}")]
    InputParse(String),

    #[error("unknown record type: {0}")]
    InvalidRecordType(String),

    #[error("unknown segment: {0}")]
    UnknownSegment(String),

    #[error("please enter metadata before submitting")]
    #[diagnostic(help("every metadata field is empty, or only the submission id is set"))]
    NothingToSubmit,

    #[error("missing submission id")]
    MissingSubmissionId,

    #[error("please enter at least one sequence before submitting")]
    NoSequences,

    #[error("failed to write TSV: {0}")]
    Tsv(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
