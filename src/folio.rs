//! # Record retrieval
//! This module turns an identifier into a [`Record`] by querying a FOLIO server through its Okapi
//! gateway.
//!
//! Instances can be looked up by item barcode, by accession number, or by instance id. Barcode
//! lookups search the inventory and may match any number of instances, whereas accession numbers
//! are converted locally into an instance id which is fetched directly.
mod response;

use std::{borrow::Cow, time::Duration};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::Value;

use crate::{
    Record,
    accession::{accession_number_from_id, id_from_accession_number},
    config::OkapiConfig,
    error::{Error, ServiceError},
    http::{Client, Fetched, classify},
    logger::{debug, info, warn},
    normalize::{
        authors_from_contributors, clean_text, extract_edition, extract_isbn_issn, extract_publisher,
        extract_year, split_title_author,
    },
};

pub use self::response::{
    Contributor, Identifier, Instance, Publication, TYPE_ID_ISBN, TYPE_ID_ISSN, select_instance,
};

/// Characters escaped in an identifier placed in a path segment: all but the unreserved ones,
/// except that `.` is also escaped so that `.` and `..` are never dot-segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'~');
/// Characters escaped in an identifier placed in a query value.
const QUERY_VALUE: &AsciiSet = &PATH_SEGMENT.remove(b'.');

/// How long to pause after hitting the rate limit.
pub const RATE_LIMIT_SLEEP: Duration = Duration::from_secs(15);
/// How many times to pause for the rate limit before giving up.
pub const MAX_SLEEP_CYCLES: usize = 8;

/// An identifier for an instance record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Barcode(String),
    AccessionNumber(String),
    InstanceId(String),
}

impl Lookup {
    /// The identifier itself.
    pub fn value(&self) -> &str {
        match self {
            Self::Barcode(s) | Self::AccessionNumber(s) | Self::InstanceId(s) => s,
        }
    }
}

/// The identifiers which a caller may provide to [`Folio::record`], at most one of which may be
/// present. Empty strings count as absent.
#[derive(Debug, Default, Clone)]
pub struct LookupArgs {
    pub barcode: Option<String>,
    pub accession_number: Option<String>,
    pub instance_id: Option<String>,
}

impl LookupArgs {
    /// Determine the [`Lookup`] to perform, if any.
    pub fn resolve(self) -> Result<Option<Lookup>, Error> {
        let Self {
            barcode,
            accession_number,
            instance_id,
        } = self;

        let mut provided = [
            barcode.map(Lookup::Barcode),
            accession_number.map(Lookup::AccessionNumber),
            instance_id.map(Lookup::InstanceId),
        ]
        .into_iter()
        .flatten()
        .filter(|lookup| !lookup.value().is_empty());

        let lookup = provided.next();
        if provided.next().is_some() {
            return Err(Error::InvalidArgument(
                "barcode, accession number, and instance id are mutually exclusive".into(),
            ));
        }
        Ok(lookup)
    }
}

/// An interface to a FOLIO server.
///
/// A `Folio` holds no state other than its configuration and client, so a single value can be
/// used for any number of lookups. Each lookup blocks until it completes, including any pauses
/// due to rate limiting.
pub struct Folio<C> {
    config: OkapiConfig,
    client: C,
}

impl<C: Client> Folio<C> {
    pub fn new(config: OkapiConfig, client: C) -> Self {
        Self { config, client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Get the record for the identifier in `args`.
    ///
    /// If no identifier is provided, this returns the empty record without contacting the server.
    /// If the server has no matching record, this returns [`Error::NotFound`].
    pub fn record(&self, args: LookupArgs) -> Result<Record, Error> {
        match args.resolve()? {
            Some(lookup) => self.record_for(&lookup),
            None => Ok(Record::default()),
        }
    }

    /// Get the record for the provided identifier.
    pub fn record_for(&self, lookup: &Lookup) -> Result<Record, Error> {
        let url = match lookup {
            Lookup::Barcode(barcode) => self.barcode_url(barcode),
            Lookup::AccessionNumber(accession_number) => {
                self.instance_url(&id_from_accession_number(accession_number)?)
            }
            Lookup::InstanceId(instance_id) => self.instance_url(instance_id),
        };

        match self.fetch_instance(&url)? {
            Some(instance) => self.record_from_instance(instance),
            None => Err(Error::NotFound(lookup.value().to_owned())),
        }
    }

    /// Build a record from a saved response, without contacting the server.
    ///
    /// The response can be either a list of instances, or a single instance such as the
    /// [`raw_data`](Record::raw_data) of another record.
    pub fn record_from_json(&self, json: &str) -> Result<Record, Error> {
        let value: Value = serde_json::from_str(json).map_err(ServiceError::from)?;
        self.record_from_value(value)
    }

    /// Build a record from a parsed response, without contacting the server.
    pub fn record_from_value(&self, value: Value) -> Result<Record, Error> {
        const SOURCE: &str = "saved response";
        match select_instance(value, SOURCE)? {
            Some(instance) => self.record_from_instance(instance),
            None => Err(Error::NotFound(SOURCE.to_owned())),
        }
    }

    /// The accession number corresponding to an instance id, using the configured prefix.
    pub fn accession_number_from_id(&self, instance_id: &str) -> String {
        accession_number_from_id(instance_id, &self.config.an_prefix)
    }

    fn barcode_url(&self, barcode: &str) -> String {
        format!(
            "{}/inventory/instances?query=item.barcode%3D%3D{}",
            self.config.okapi_url,
            utf8_percent_encode(barcode, QUERY_VALUE)
        )
    }

    fn instance_url(&self, instance_id: &str) -> String {
        format!(
            "{}/instance-storage/instances/{}",
            self.config.okapi_url,
            utf8_percent_encode(instance_id, PATH_SEGMENT)
        )
    }

    fn fetch_instance(&self, url: &str) -> Result<Option<Value>, ServiceError> {
        let Some(body) = self.get_with_retry(url)? else {
            return Ok(None);
        };

        let value = serde_json::from_slice(&body)?;
        let instance = select_instance(value, url)?;
        if instance.is_none() {
            info!("Got 0 records for '{url}'");
        }
        Ok(instance)
    }

    /// Perform the GET request, pausing and retrying for as long as the server reports that the
    /// rate limit is exceeded, up to [`MAX_SLEEP_CYCLES`] times.
    fn get_with_retry(&self, url: &str) -> Result<Option<Vec<u8>>, ServiceError> {
        let headers = [
            ("x-okapi-token", self.config.okapi_token.as_str()),
            ("x-okapi-tenant", self.config.tenant_id.as_str()),
            ("content-type", "application/json"),
        ];

        let mut cycles = 0;
        loop {
            debug!("Requesting '{url}'");
            let response = self.client.get(url, &headers)?;

            match classify(response, url)? {
                Fetched::Content(body) => return Ok(Some(body)),
                Fetched::NoContent => {
                    info!("FOLIO returned no result for '{url}'");
                    return Ok(None);
                }
                Fetched::RateLimited => {
                    cycles += 1;
                    if cycles > MAX_SLEEP_CYCLES {
                        return Err(ServiceError::RateLimitExceeded(url.to_owned()));
                    }
                    warn!(
                        "Hit rate limit for '{url}'; pausing {}s",
                        RATE_LIMIT_SLEEP.as_secs()
                    );
                    self.client.wait(RATE_LIMIT_SLEEP);
                }
            }
        }
    }

    fn record_from_instance(&self, raw_data: Value) -> Result<Record, Error> {
        let instance = Instance::try_from(&raw_data)?;

        let (title, author) = split_title_author(&instance.title);
        let author = match author.filter(|author| !author.is_empty()) {
            Some(author) => Cow::Borrowed(author),
            None => Cow::Owned(authors_from_contributors(&instance.contributors)),
        };

        let record = Record {
            accession_number: self.accession_number_from_id(&instance.id),
            title: clean_text(title).to_owned(),
            author: clean_text(&author).to_owned(),
            publisher: extract_publisher(&instance.publication).to_owned(),
            edition: extract_edition(&instance.editions).to_owned(),
            year: extract_year(&instance.publication),
            isbn_issn: extract_isbn_issn(&instance.identifiers).map(ToOwned::to_owned),
            id: instance.id,
            raw_data: Some(raw_data),
            ..Default::default()
        };

        debug!("Created {record:?}");
        Ok(record)
    }
}
