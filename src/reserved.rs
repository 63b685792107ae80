use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedField {
    SubmissionId,
    Accession,
    FastaIds,
    AccessionVersion,
}

impl ReservedField {
    pub const ALL: [ReservedField; 4] = [
        ReservedField::SubmissionId,
        ReservedField::Accession,
        ReservedField::FastaIds,
        ReservedField::AccessionVersion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservedField::SubmissionId => "id",
            ReservedField::Accession => "accession",
            ReservedField::FastaIds => "fastaIds",
            ReservedField::AccessionVersion => "accessionVersion",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }

    pub fn is_reserved(key: &str) -> bool {
        Self::from_key(key).is_some()
    }
}

impl fmt::Display for ReservedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
