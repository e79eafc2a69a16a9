//! # folio-lookup
//! Look up bibliographic records in a [FOLIO](https://www.folio.org/) library services platform.
//!
//! A [`Folio`] value combines the Okapi connection settings with an HTTP [`Client`], and turns an
//! item barcode, an accession number, or an instance id into a normalized [`Record`].
//!
//! ```no_run
//! use folio_lookup::{Folio, LookupArgs, OkapiConfig, UreqClient};
//!
//! let config = OkapiConfig::new("https://okapi.example.edu", "token", "fs00001", "clc");
//! let folio = Folio::new(config, UreqClient::new());
//! let record = folio.record(LookupArgs {
//!     barcode: Some("35047019077817".into()),
//!     ..Default::default()
//! })?;
//! println!("{record}");
//! # Ok::<(), folio_lookup::Error>(())
//! ```
pub mod accession;
pub mod config;
pub mod error;
pub mod folio;
pub mod http;
pub mod logger;
pub mod normalize;
pub mod record;
pub mod thumbnail;

pub use self::{
    config::OkapiConfig,
    error::{Error, ServiceError},
    folio::{Folio, Lookup, LookupArgs},
    http::{Client, UreqClient},
    record::Record,
};
