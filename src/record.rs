//! # The normalized record
//! A [`Record`] holds the bibliographic data of a single FOLIO instance record.
use std::{cmp::Ordering, fmt, sync::OnceLock};

use serde::Serialize;
use serde_json::Value;

use crate::{http::Client, thumbnail::thumbnail_url_for};

/// The bibliographic data of a FOLIO instance record.
///
/// Fields which are missing from the source data are empty strings. For example, journals do not
/// have a `year`, so the `year` of a journal is `""`. The default value, with every field empty,
/// is the empty record.
///
/// Records are equal when all of their fields are equal, including the raw data. Records are
/// ordered by `id`; records with the same `id` but different data are unordered. Use
/// [`Record::cmp_by_id`] to compare by `id` alone.
#[derive(Clone, Default, Serialize)]
pub struct Record {
    /// The FOLIO instance id.
    pub id: String,
    /// The accession number, derived from the instance id.
    pub accession_number: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub edition: String,
    pub year: String,
    /// The first ISBN or ISSN of the instance, if any.
    pub isbn_issn: Option<String>,
    /// The instance JSON from which this record was built.
    #[serde(skip)]
    pub raw_data: Option<Value>,
    #[serde(skip)]
    pub(crate) thumbnail: OnceLock<String>,
}

impl Record {
    /// Whether this record is equal to the empty record.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Compare two records by instance id.
    pub fn cmp_by_id(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }

    /// The URL of a cover thumbnail for this record, or the empty string if there is none.
    ///
    /// The lookup happens on the first call only; subsequent calls return the saved value,
    /// irrespective of the client.
    pub fn thumbnail_url<C: Client>(&self, client: &C) -> &str {
        self.thumbnail.get_or_init(|| {
            self.isbn_issn
                .as_deref()
                .and_then(|value| thumbnail_url_for(value, client))
                .unwrap_or_default()
        })
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.accession_number == other.accession_number
            && self.title == other.title
            && self.author == other.author
            && self.publisher == other.publisher
            && self.edition == other.edition
            && self.year == other.year
            && self.isbn_issn == other.isbn_issn
            && self.raw_data == other.raw_data
    }
}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.cmp_by_id(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("accession_number", &self.accession_number)
            .field("author", &self.author)
            .field("edition", &self.edition)
            .field("id", &self.id)
            .field("isbn_issn", &self.isbn_issn)
            .field("publisher", &self.publisher)
            .field("title", &self.title)
            .field("year", &self.year)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "id:               {}", self.id)?;
        writeln!(f, "accession_number: {}", self.accession_number)?;
        writeln!(f, "title:            {}", self.title)?;
        writeln!(f, "author:           {}", self.author)?;
        writeln!(f, "publisher:        {}", self.publisher)?;
        writeln!(f, "edition:          {}", self.edition)?;
        writeln!(f, "year:             {}", self.year)?;
        write!(
            f,
            "isbn_issn:        {}",
            self.isbn_issn.as_deref().unwrap_or_default()
        )
    }
}
