use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SeqsubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Loculus,
    #[value(name = "genbank")]
    GenBank,
    Sra,
    Gisaid,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::Loculus => write!(f, "loculus"),
            RecordType::GenBank => write!(f, "genbank"),
            RecordType::Sra => write!(f, "sra"),
            RecordType::Gisaid => write!(f, "gisaid"),
        }
    }
}

impl FromStr for RecordType {
    type Err = SeqsubError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "loculus" => Ok(RecordType::Loculus),
            "genbank" => Ok(RecordType::GenBank),
            "sra" => Ok(RecordType::Sra),
            "gisaid" => Ok(RecordType::Gisaid),
            _ => Err(SeqsubError::InvalidRecordType(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessionRecord {
    pub accession: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_focal: Option<bool>,
}

impl AccessionRecord {
    pub fn is_focal(&self) -> bool {
        self.is_focal.unwrap_or(true)
    }
}

pub fn deserialize_accession_input(
    input: &str,
    is_focal: bool,
    record_type: RecordType,
) -> Vec<AccessionRecord> {
    to_records(
        input.split(|ch: char| ch == ',' || ch.is_whitespace()),
        is_focal,
        record_type,
    )
}

pub fn deserialize_accession_input_with(
    input: &str,
    is_focal: bool,
    record_type: RecordType,
    delimiter: &Regex,
) -> Vec<AccessionRecord> {
    to_records(delimiter.split(input), is_focal, record_type)
}

fn to_records<'a>(
    tokens: impl Iterator<Item = &'a str>,
    is_focal: bool,
    record_type: RecordType,
) -> Vec<AccessionRecord> {
    tokens
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|accession| AccessionRecord {
            accession: accession.to_string(),
            record_type,
            is_focal: Some(is_focal),
        })
        .collect()
}

pub fn serialize_seqset_records(records: &[AccessionRecord], is_focal: bool) -> String {
    serialize_seqset_records_with(records, is_focal, ",")
}

pub fn serialize_seqset_records_with(
    records: &[AccessionRecord],
    is_focal: bool,
    delimiter: &str,
) -> String {
    join_accessions(
        records.iter().filter(|record| record.is_focal() == is_focal),
        delimiter,
    )
}

pub fn serialize_records_of_type(
    records: &[AccessionRecord],
    record_type: RecordType,
    delimiter: &str,
) -> String {
    join_accessions(
        records
            .iter()
            .filter(|record| record.record_type == record_type),
        delimiter,
    )
}

pub fn merge_inputs(focal: &str, background: &str, record_type: RecordType) -> Vec<AccessionRecord> {
    let mut records = deserialize_accession_input(focal, true, record_type);
    records.extend(deserialize_accession_input(background, false, record_type));
    records
}

fn join_accessions<'a>(
    records: impl Iterator<Item = &'a AccessionRecord>,
    delimiter: &str,
) -> String {
    records
        .map(|record| record.accession.as_str())
        .collect::<Vec<_>>()
        .join(&format!("{delimiter} "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_commas_and_whitespace() {
        let records =
            deserialize_accession_input(" A1,A2\n\tA3 ,, A4 ", false, RecordType::Loculus);
        let accessions: Vec<_> = records.iter().map(|r| r.accession.as_str()).collect();
        assert_eq!(accessions, vec!["A1", "A2", "A3", "A4"]);
        assert!(records.iter().all(|r| r.is_focal == Some(false)));
    }

    #[test]
    fn empty_input_is_empty_list() {
        assert!(deserialize_accession_input("", true, RecordType::Loculus).is_empty());
        assert!(deserialize_accession_input(" ,\n ", true, RecordType::Loculus).is_empty());
    }

    #[test]
    fn custom_delimiter() {
        let delimiter = Regex::new(r";").unwrap();
        let records =
            deserialize_accession_input_with("A 1; B2", true, RecordType::GenBank, &delimiter);
        let accessions: Vec<_> = records.iter().map(|r| r.accession.as_str()).collect();
        assert_eq!(accessions, vec!["A 1", "B2"]);
    }

    #[test]
    fn unflagged_records_count_as_focal() {
        let records = vec![AccessionRecord {
            accession: "X".to_string(),
            record_type: RecordType::Sra,
            is_focal: None,
        }];
        assert_eq!(serialize_seqset_records(&records, true), "X");
        assert_eq!(serialize_seqset_records(&records, false), "");
    }

    #[test]
    fn serializes_by_type() {
        let mut records = merge_inputs("A1 A2", "", RecordType::GenBank);
        records.extend(merge_inputs("S1", "", RecordType::Sra));
        assert_eq!(
            serialize_records_of_type(&records, RecordType::GenBank, ","),
            "A1, A2"
        );
        assert_eq!(serialize_records_of_type(&records, RecordType::Sra, ","), "S1");
    }

    #[test]
    fn record_json_shape() {
        let record = AccessionRecord {
            accession: "LOC_1.1".to_string(),
            record_type: RecordType::Loculus,
            is_focal: Some(true),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"accession":"LOC_1.1","type":"loculus","isFocal":true}"#
        );
    }

    #[test]
    fn parses_record_type() {
        assert_eq!("GenBank".parse::<RecordType>().unwrap(), RecordType::GenBank);
        assert!("ena".parse::<RecordType>().is_err());
    }
}
