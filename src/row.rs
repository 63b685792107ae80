use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Metadata,
    NucleotideSequence,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationSource {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingAnnotation {
    #[serde(default)]
    pub unprocessed_fields: Vec<AnnotationSource>,
    #[serde(default)]
    pub processed_fields: Vec<AnnotationSource>,
    pub message: String,
}

impl ProcessingAnnotation {
    pub fn refers_to(&self, key: &str, kind: FieldKind) -> bool {
        self.unprocessed_fields
            .iter()
            .any(|source| source.kind == kind && source.name == key)
    }
}

/// One editable scalar field.
///
/// `errors` and `warnings` describe the server's view of `initial_value` and
/// are carried unchanged through edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    key: String,
    pub value: String,
    pub initial_value: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Row {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: key.into(),
            initial_value: value.clone(),
            value,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn empty(key: impl Into<String>) -> Self {
        Self::new(key, String::new())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..self.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_modified(&self) -> bool {
        self.value != self.initial_value
    }
}

pub fn rows_from_fields<'a, I>(
    fields: I,
    errors: &[ProcessingAnnotation],
    warnings: &[ProcessingAnnotation],
    kind: FieldKind,
) -> Vec<Row>
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    fields
        .into_iter()
        .map(|(key, value)| {
            let mut row = Row::new(key, value);
            row.errors = messages_for(errors, key, kind);
            row.warnings = messages_for(warnings, key, kind);
            row
        })
        .collect()
}

fn messages_for(annotations: &[ProcessingAnnotation], key: &str, kind: FieldKind) -> Vec<String> {
    annotations
        .iter()
        .filter(|annotation| annotation.refers_to(key, kind))
        .map(|annotation| annotation.message.clone())
        .collect()
}
