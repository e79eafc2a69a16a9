//! Conversion between FOLIO instance ids and accession numbers.
//!
//! An accession number is the instance id with every `-` replaced by `.`, prefixed by an
//! institution-specific prefix and a `.` separator. For example, with the prefix `clc`, the
//! instance id `4f114d62-90b8-4b2b-befb-5d81be6963cc` has accession number
//! `clc.4f114d62.90b8.4b2b.befb.5d81be6963cc`.
use crate::error::{AccessionNumberError, AccessionNumberErrorKind};

/// Construct the accession number for the instance `id` using the given `prefix`.
///
/// A `.` separator is appended to the prefix unless it already ends with one.
pub fn accession_number_from_id(id: &str, prefix: &str) -> String {
    let mut accession_number = String::with_capacity(prefix.len() + id.len() + 1);
    accession_number.push_str(prefix);
    if !prefix.ends_with('.') {
        accession_number.push('.');
    }
    accession_number.extend(id.chars().map(|ch| if ch == '-' { '.' } else { ch }));
    accession_number
}

/// Recover the instance id from an accession number.
///
/// Everything up to and including the first `.` is the prefix; the remainder has each `.`
/// converted back into `-`. The prefix itself must therefore not contain a `.`.
pub fn id_from_accession_number(accession_number: &str) -> Result<String, AccessionNumberError> {
    let Some((_, id_part)) = accession_number.split_once('.') else {
        return Err(AccessionNumberError {
            input: accession_number.to_owned(),
            kind: AccessionNumberErrorKind::MissingSeparator,
        });
    };

    if id_part.is_empty() {
        return Err(AccessionNumberError {
            input: accession_number.to_owned(),
            kind: AccessionNumberErrorKind::EmptyId,
        });
    }

    Ok(id_part.replace('.', "-"))
}
