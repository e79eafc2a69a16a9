mod validate;

use std::{fs::read_to_string, io, path::Path};

use anyhow::{Error, anyhow};
use serde::Deserialize;
use toml::from_str;

use crate::logger::{debug, info};
pub use validate::report_config_errors as validate;

/// The settings required to communicate with a FOLIO server through Okapi.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OkapiConfig {
    /// The base URL of the Okapi gateway.
    pub okapi_url: String,
    /// The API token sent in the `x-okapi-token` header.
    pub okapi_token: String,
    /// The tenant sent in the `x-okapi-tenant` header.
    pub tenant_id: String,
    /// The prefix of accession numbers.
    pub an_prefix: String,
}

impl OkapiConfig {
    pub fn new<S: Into<String>>(okapi_url: S, okapi_token: S, tenant_id: S, an_prefix: S) -> Self {
        Self {
            okapi_url: okapi_url.into().trim_end_matches('/').to_owned(),
            okapi_token: okapi_token.into(),
            tenant_id: tenant_id.into(),
            an_prefix: an_prefix.into(),
        }
    }
}

/// A direct representation of the configuration file, for easy deserialization.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    pub okapi: RawOkapiConfig,
}

/// A direct representation of the `[okapi]` section of the configuration, in which every
/// setting is optional.
#[derive(Debug, Default, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawOkapiConfig {
    pub okapi_url: Option<String>,
    pub okapi_token: Option<String>,
    pub tenant_id: Option<String>,
    pub an_prefix: Option<String>,
}

impl RawOkapiConfig {
    /// Replace the settings in `self` with the settings which are present in `overrides`.
    pub fn override_with(self, overrides: RawOkapiConfig) -> Self {
        Self {
            okapi_url: overrides.okapi_url.or(self.okapi_url),
            okapi_token: overrides.okapi_token.or(self.okapi_token),
            tenant_id: overrides.tenant_id.or(self.tenant_id),
            an_prefix: overrides.an_prefix.or(self.an_prefix),
        }
    }
}

impl TryFrom<RawOkapiConfig> for OkapiConfig {
    type Error = Error;

    fn try_from(raw: RawOkapiConfig) -> Result<Self, Self::Error> {
        fn required(value: Option<String>, key: &str) -> Result<String, Error> {
            value.ok_or_else(|| anyhow!("Missing configuration setting 'okapi.{key}'"))
        }

        Ok(Self::new(
            required(raw.okapi_url, "okapi_url")?,
            required(raw.okapi_token, "okapi_token")?,
            required(raw.tenant_id, "tenant_id")?,
            required(raw.an_prefix, "an_prefix")?,
        ))
    }
}

impl RawConfig {
    /// Load configuration by deserializing a toml file at the provided path, returning the default
    /// if `missing_ok` is true.
    fn load<P: AsRef<Path>>(path: P, missing_ok: bool) -> Result<Self, Error> {
        match read_to_string(&path) {
            Ok(st) => {
                info!(
                    "Loading configuration at path '{}'",
                    path.as_ref().display()
                );
                let config = from_str(&st)?;
                debug!("Using configuration:\n{config:?}");
                Ok(config)
            }
            Err(err) => {
                if missing_ok && err.kind() == io::ErrorKind::NotFound {
                    info!(
                        "Configuration file not found at path '{}'; using default configuration",
                        path.as_ref().display()
                    );
                    Ok(Self::default())
                } else {
                    Err(anyhow!("Failed to load configuration file: {err}"))
                }
            }
        }
    }
}

#[cold]
pub fn write_default<W: ?Sized + io::Write>(writer: &mut W) -> Result<(), io::Error> {
    writer.write_all(include_str!("config/default_config.toml").as_bytes())
}

/// Attempt to load the `[okapi]` settings from the configuration file at the provided path.
///
/// If `missing_ok` is true and the file is not found, every setting is absent.
pub fn load<P: AsRef<Path>>(path: P, missing_ok: bool) -> Result<RawOkapiConfig, Error> {
    let RawConfig { okapi } = RawConfig::load(path, missing_ok)?;
    Ok(okapi)
}
