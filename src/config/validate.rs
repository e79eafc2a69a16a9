use std::{fmt, path::Path};

use anyhow::Error;
use ureq::http::Uri;

use super::{RawConfig, RawOkapiConfig};
use crate::logger::error;

/// Validate the configuration file loaded at the provided path.
///
/// An explicit error is returned if configuration loading fails; otherwise, errors
/// are simply printed to STDERR using the [`logger::error`](crate::logger::error)
/// macro.
pub fn report_config_errors<P: AsRef<Path>>(path: P) -> Result<(), Error> {
    let raw_config = RawConfig::load(path, true)?;

    for problem in okapi_problems(&raw_config.okapi) {
        error!("Invalid config: {problem}");
    }

    Ok(())
}

/// One of the ways in which an `[okapi]` setting can be invalid.
#[derive(Debug, PartialEq)]
enum OkapiProblem {
    /// The URL could not be parsed.
    InvalidUrl(String),
    /// The URL is not an absolute `http` or `https` URL.
    UnsupportedUrl(String),
    /// A setting is present but empty.
    Empty(&'static str),
    /// The accession number prefix contains a separator before its end.
    PrefixSeparator(String),
}

impl fmt::Display for OkapiProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(url) => write!(f, "'okapi.okapi_url' is not a valid URL: '{url}'"),
            Self::UnsupportedUrl(url) => write!(
                f,
                "'okapi.okapi_url' must be an absolute http or https URL: '{url}'"
            ),
            Self::Empty(key) => write!(f, "'okapi.{key}' must not be empty"),
            Self::PrefixSeparator(prefix) => write!(
                f,
                "'okapi.an_prefix' may only contain '.' as its final character: '{prefix}'"
            ),
        }
    }
}

fn okapi_problems(okapi: &RawOkapiConfig) -> Vec<OkapiProblem> {
    let mut problems = Vec::new();

    if let Some(url) = &okapi.okapi_url {
        match url.parse::<Uri>() {
            Ok(uri) => {
                if !matches!(uri.scheme_str(), Some("http" | "https")) || uri.host().is_none() {
                    problems.push(OkapiProblem::UnsupportedUrl(url.clone()));
                }
            }
            Err(_) => problems.push(OkapiProblem::InvalidUrl(url.clone())),
        }
    }

    for (key, value) in [
        ("okapi_token", &okapi.okapi_token),
        ("tenant_id", &okapi.tenant_id),
        ("an_prefix", &okapi.an_prefix),
    ] {
        if value.as_deref().is_some_and(|s| s.trim().is_empty()) {
            problems.push(OkapiProblem::Empty(key));
        }
    }

    // the instance id is everything after the first '.', so the prefix cannot contain one
    if let Some(prefix) = &okapi.an_prefix {
        let body = prefix.strip_suffix('.').unwrap_or(prefix);
        if body.contains('.') {
            problems.push(OkapiProblem::PrefixSeparator(prefix.clone()));
        }
    }

    problems
}
