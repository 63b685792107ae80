pub mod accession;
pub mod app;
pub mod config;
pub mod entry;
pub mod error;
pub mod fields;
pub mod metadata;
pub mod output;
pub mod reserved;
pub mod row;
pub mod sequences;
pub mod store;
pub mod submission;
pub mod validation;
