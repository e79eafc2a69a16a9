//! Utilities for extracting and cleaning bibliographic fields from FOLIO instance data.
//!
//! Catalog data in FOLIO is entered by hand over many years, so the same information can be
//! formatted in several ways. These functions are best-effort heuristics: they handle the common
//! formatting conventions and otherwise pass the data through mostly unchanged.
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;

use crate::folio::{Contributor, Identifier, Publication, TYPE_ID_ISBN, TYPE_ID_ISSN};

/// The leading part of a contributor name, before any trailing qualifiers such as relator terms
/// or dates.
static CONTRIBUTOR_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-.,\p{L} ]+").unwrap());

/// Strip trailing `.` and `/` characters, as well as surrounding whitespace.
pub fn clean_text(text: &str) -> &str {
    text.trim_end().trim_end_matches(['.', '/']).trim()
}

/// Split a title statement into the title and the statement of responsibility (the author).
///
/// The first applicable rule is used:
/// 1. Split at the first `/`, as in `Spacetime physics / Edwin F. Taylor`.
/// 2. Split at the first `[by]`.
/// 3. Split at the last `, by`.
///
/// A separator at the very start of the text is ignored. If no rule applies, the entire
/// text is the title. A trailing `:` is removed from the title, and a leading `edited by` is
/// removed from the author.
///
/// Titles which themselves contain a `/` are split incorrectly; there is no way to
/// distinguish them from the separator.
pub fn split_title_author(text: &str) -> (&str, Option<&str>) {
    #[inline]
    fn split_at_separator<'a>(text: &'a str, start: usize, sep: &str) -> (&'a str, Option<&'a str>) {
        (
            text[..start].trim(),
            Some(text[start + sep.len()..].trim()),
        )
    }

    let (title, author) = if let Some(start) = text.find('/').filter(|i| *i > 0) {
        split_at_separator(text, start, "/")
    } else if let Some(start) = text.find("[by]").filter(|i| *i > 0) {
        split_at_separator(text, start, "[by]")
    } else if let Some(start) = text.rfind(", by").filter(|i| *i > 0) {
        split_at_separator(text, start, ", by")
    } else {
        (text, None)
    };

    let title = title.strip_suffix(':').map_or(title, str::trim);
    let author = author.map(|author| author.strip_prefix("edited by").map_or(author, str::trim));

    (title, author)
}

/// The year of the first publication entry, keeping only the digits of the date.
///
/// For example, a date of `c2015.` results in `2015`.
pub fn extract_year(publication: &[Publication]) -> String {
    publication
        .first()
        .map(|entry| {
            entry
                .date_of_publication
                .chars()
                .filter(char::is_ascii_digit)
                .collect()
        })
        .unwrap_or_default()
}

/// The publisher of the first publication entry.
pub fn extract_publisher(publication: &[Publication]) -> &str {
    publication
        .first()
        .map_or("", |entry| entry.publisher.as_str())
}

/// The first edition statement.
pub fn extract_edition(editions: &[String]) -> &str {
    editions.first().map_or("", String::as_str)
}

/// The value of the first ISBN or ISSN identifier.
///
/// Identifier values often carry trailing annotations, like `9780271067544 (pbk. : alk.
/// paper)`, so the value is truncated at the first space.
pub fn extract_isbn_issn(identifiers: &[Identifier]) -> Option<&str> {
    let identifier = identifiers.iter().find(|identifier| {
        matches!(
            identifier.identifier_type_id.as_str(),
            TYPE_ID_ISBN | TYPE_ID_ISSN
        )
    })?;

    let value = identifier
        .value
        .split_once(' ')
        .map_or(identifier.value.as_str(), |(head, _)| head);

    (!value.is_empty()).then_some(value)
}

fn extracted_name(name: &str) -> &str {
    match CONTRIBUTOR_NAME_RE.find(name) {
        Some(matched) => matched.as_str().trim_matches([' ', ',']),
        None => name,
    }
}

/// Join the contributor names with ` and `.
///
/// A single contributor which is not the primary contributor stands in for a longer list, so
/// it is written as `Name et al.`.
pub fn authors_from_contributors(contributors: &[Contributor]) -> String {
    match contributors {
        [only] if !only.primary => format!("{} et al.", extracted_name(&only.name)),
        _ => contributors
            .iter()
            .map(|contributor| extracted_name(&contributor.name))
            .join(" and "),
    }
}
