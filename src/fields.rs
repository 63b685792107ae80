use std::cmp::Ordering;
use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::reserved::ReservedField;

pub const DEFAULT_HEADER: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDefinition {
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub order: Option<f64>,
    #[serde(default, rename = "type")]
    pub field_type: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub hide_on_sequence_details_page: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub display_name: String,
    pub header: Option<String>,
    pub order: Option<f64>,
    pub always_included: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldGroup {
    pub header: String,
    pub fields: Vec<FieldDescriptor>,
}

pub fn metadata_to_fields(metadata: &[MetadataDefinition]) -> Vec<FieldDescriptor> {
    metadata
        .iter()
        .map(|definition| {
            let always_included = definition.name == ReservedField::AccessionVersion.as_str();
            FieldDescriptor {
                name: definition.name.clone(),
                display_name: definition
                    .display_name
                    .clone()
                    .unwrap_or_else(|| definition.name.clone()),
                header: definition.header.clone(),
                order: definition.order,
                always_included,
                visible: always_included,
            }
        })
        .collect()
}

pub fn name_to_label_map_to_fields(
    labels: &IndexMap<String, String>,
    visibilities: Option<&IndexMap<String, bool>>,
    original_metadata: Option<&[MetadataDefinition]>,
) -> Vec<FieldDescriptor> {
    labels
        .iter()
        .map(|(name, label)| {
            let definition = original_metadata
                .and_then(|metadata| metadata.iter().find(|definition| &definition.name == name));
            let always_included = name == ReservedField::AccessionVersion.as_str();
            let visible = visibilities
                .and_then(|visibilities| visibilities.get(name).copied())
                .unwrap_or(false);
            FieldDescriptor {
                name: name.clone(),
                display_name: label.clone(),
                header: definition.and_then(|definition| definition.header.clone()),
                order: definition.and_then(|definition| definition.order),
                always_included,
                visible: visible || always_included,
            }
        })
        .collect()
}

pub fn group_fields(fields: &[FieldDescriptor]) -> Vec<FieldGroup> {
    let mut named: BTreeMap<&str, Vec<FieldDescriptor>> = BTreeMap::new();
    let mut other = Vec::new();
    for field in fields {
        match field.header.as_deref() {
            Some(header) if header != DEFAULT_HEADER => {
                named.entry(header).or_default().push(field.clone())
            }
            _ => other.push(field.clone()),
        }
    }

    let mut groups: Vec<FieldGroup> = named
        .into_iter()
        .map(|(header, fields)| FieldGroup {
            header: header.to_string(),
            fields,
        })
        .collect();
    if !other.is_empty() {
        groups.push(FieldGroup {
            header: DEFAULT_HEADER.to_string(),
            fields: other,
        });
    }
    for group in &mut groups {
        group.fields.sort_by(compare_fields);
    }
    groups
}

fn compare_fields(a: &FieldDescriptor, b: &FieldDescriptor) -> Ordering {
    match (a.order, b.order) {
        (Some(left), Some(right)) => left
            .total_cmp(&right)
            .then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(name: &str, header: Option<&str>, order: Option<f64>) -> MetadataDefinition {
        MetadataDefinition {
            name: name.to_string(),
            display_name: None,
            header: header.map(str::to_string),
            order,
            field_type: None,
            required: false,
            hide_on_sequence_details_page: false,
        }
    }

    #[test]
    fn flags_accession_version() {
        let fields = metadata_to_fields(&[
            definition("accessionVersion", None, None),
            definition("host", Some("Host"), None),
        ]);
        assert!(fields[0].always_included);
        assert!(!fields[1].always_included);
        assert_eq!(fields[1].display_name, "host");
    }

    #[test]
    fn groups_and_sorts() {
        let fields = metadata_to_fields(&[
            definition("zeta", None, None),
            definition("b", Some("Sample"), None),
            definition("a", Some("Sample"), None),
            definition("late", Some("Sample"), Some(2.0)),
            definition("early", Some("Sample"), Some(1.0)),
            definition("host", Some("Host"), None),
            definition("Alpha", Some("Other"), None),
        ]);
        let groups = group_fields(&fields);
        let headers: Vec<_> = groups.iter().map(|g| g.header.as_str()).collect();
        assert_eq!(headers, vec!["Host", "Sample", "Other"]);
        let sample: Vec<_> = groups[1].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(sample, vec!["early", "late", "a", "b"]);
        let other: Vec<_> = groups[2].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(other, vec!["Alpha", "zeta"]);
    }

    #[test]
    fn label_map_enriched_from_metadata() {
        let mut labels = IndexMap::new();
        labels.insert("host".to_string(), "Host species".to_string());
        labels.insert("date".to_string(), "Collection date".to_string());
        let mut visibilities = IndexMap::new();
        visibilities.insert("date".to_string(), true);
        let metadata = vec![definition("host", Some("Host"), Some(3.0))];

        let fields = name_to_label_map_to_fields(&labels, Some(&visibilities), Some(&metadata));

        assert_eq!(fields[0].display_name, "Host species");
        assert_eq!(fields[0].header.as_deref(), Some("Host"));
        assert_eq!(fields[0].order, Some(3.0));
        assert!(!fields[0].visible);
        assert_eq!(fields[1].header, None);
        assert!(fields[1].visible);
    }

    #[test]
    fn nan_order_sorts_without_panicking() {
        let fields = metadata_to_fields(&[
            definition("c", Some("Sample"), Some(f64::NAN)),
            definition("b", Some("Sample"), Some(2.0)),
            definition("a", Some("Sample"), Some(1.0)),
            definition("d", Some("Sample"), Some(f64::NAN)),
        ]);
        let groups = group_fields(&fields);
        let names: Vec<_> = groups[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c", "d"]);
    }
}
