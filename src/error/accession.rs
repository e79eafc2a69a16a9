use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub struct AccessionNumberError {
    pub input: String,
    pub kind: AccessionNumberErrorKind,
}

#[derive(Debug, PartialEq, Eq)]
pub enum AccessionNumberErrorKind {
    MissingSeparator,
    EmptyId,
}

impl AccessionNumberErrorKind {
    fn msg(&self) -> &'static str {
        match self {
            Self::MissingSeparator => "accession number must contain a '.' after the prefix",
            Self::EmptyId => "accession number must contain an identifier after the prefix",
        }
    }
}

impl fmt::Display for AccessionNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid accession number '{}': {}",
            self.input,
            self.kind.msg()
        )
    }
}
