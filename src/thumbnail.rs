//! # Cover thumbnails
//! Look up a cover image for an ISBN, first from Open Library and then from Google Books.
use serde::Deserialize;
use ureq::http::StatusCode;

use crate::{
    http::{BodyBytes, Client},
    logger::debug,
};

/// Open Library returns a 1x1 pixel placeholder image instead of a 404 when it has no cover.
const OPEN_LIBRARY_PLACEHOLDER_MAX_BYTES: usize = 810;

/// Whether the value looks like an ISSN rather than an ISBN.
pub fn probable_issn(value: &str) -> bool {
    value.len() < 10 && value.contains('-')
}

/// Get the URL of a cover thumbnail for the given ISBN.
///
/// Returns `None` for empty values, for values which look like an ISSN, and if neither service
/// has a cover. Failures to contact a service are treated as the service having no cover.
pub fn thumbnail_url_for<C: Client>(value: &str, client: &C) -> Option<String> {
    if value.is_empty() || probable_issn(value) {
        return None;
    }

    thumbnail_url_from_open_library(value, client)
        .or_else(|| thumbnail_url_from_google(value, client))
}

fn thumbnail_url_from_open_library<C: Client>(value: &str, client: &C) -> Option<String> {
    for size in ['L', 'M', 'S'] {
        let url = format!("https://covers.openlibrary.org/b/isbn/{value}-{size}.jpg");
        debug!("Looking up Open Library cover at '{url}'");

        match client.get(url.as_str(), &[]) {
            Ok(response) if response.status() == StatusCode::OK => {
                let body = response.into_body().bytes().ok()?;
                return (body.len() > OPEN_LIBRARY_PLACEHOLDER_MAX_BYTES).then_some(url);
            }
            Ok(response) => debug!("Open Library returned status {}", response.status()),
            Err(err) => debug!("Failed to contact Open Library: {err}"),
        }
    }
    None
}

#[derive(Deserialize)]
struct GoogleVolumes {
    #[serde(default)]
    items: Vec<GoogleVolume>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVolume {
    volume_info: Option<GoogleVolumeInfo>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleVolumeInfo {
    image_links: Option<GoogleImageLinks>,
}

#[derive(Deserialize)]
struct GoogleImageLinks {
    thumbnail: Option<String>,
}

fn thumbnail_url_from_google<C: Client>(value: &str, client: &C) -> Option<String> {
    let url = format!("https://www.googleapis.com/books/v1/volumes?q={value}");
    debug!("Looking up Google Books cover at '{url}'");

    let response = client
        .get(url.as_str(), &[])
        .inspect_err(|err| debug!("Failed to contact Google Books: {err}"))
        .ok()?;

    if response.status() != StatusCode::OK {
        debug!("Google Books returned status {}", response.status());
        return None;
    }

    let body = response.into_body().bytes().ok()?;
    match serde_json::from_slice::<GoogleVolumes>(&body) {
        Ok(GoogleVolumes { items }) => items
            .into_iter()
            .next()?
            .volume_info?
            .image_links?
            .thumbnail,
        Err(err) => {
            debug!("Unexpected response from Google Books: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::mock::MockClient;

    const GOOGLE_RESPONSE: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 1,
        "items": [{
            "volumeInfo": {
                "title": "Spacetime Physics",
                "imageLinks": {
                    "smallThumbnail": "http://books.google.com/books/content?id=PDA8YcvMc_QC&zoom=5",
                    "thumbnail": "http://books.google.com/books/content?id=PDA8YcvMc_QC&zoom=1"
                }
            }
        }]
    }"#;

    #[test]
    fn test_probable_issn() {
        assert!(probable_issn("0036-8075"));
        assert!(!probable_issn("0716723271"));
        assert!(!probable_issn("978-0-596-52068-7"));
        assert!(!probable_issn("12345"));
    }

    #[test]
    fn test_issn_is_never_queried() {
        let client = MockClient::new();
        assert_eq!(thumbnail_url_for("0036-8075", &client), None);
        assert_eq!(thumbnail_url_for("", &client), None);
        assert!(client.requests().is_empty());
    }

    #[test]
    fn test_open_library_cover() {
        let client = MockClient::new()
            .respond(404, "")
            .respond(200, &"x".repeat(5000));
        assert_eq!(
            thumbnail_url_for("0716723271", &client).as_deref(),
            Some("https://covers.openlibrary.org/b/isbn/0716723271-M.jpg")
        );
        assert_eq!(client.requests().len(), 2);
    }

    #[test]
    fn test_open_library_placeholder_falls_back_to_google() {
        let client = MockClient::new()
            .respond(200, "GIF89a")
            .respond(200, GOOGLE_RESPONSE);
        assert_eq!(
            thumbnail_url_for("0716723271", &client).as_deref(),
            Some("http://books.google.com/books/content?id=PDA8YcvMc_QC&zoom=1")
        );
        assert_eq!(
            client.uris(),
            [
                "https://covers.openlibrary.org/b/isbn/0716723271-L.jpg",
                "https://www.googleapis.com/books/v1/volumes?q=0716723271",
            ]
        );
    }

    #[test]
    fn test_no_cover_anywhere() {
        let client = MockClient::new()
            .respond_times(3, 404, "")
            .respond(200, r#"{"kind": "books#volumes", "totalItems": 0}"#);
        assert_eq!(thumbnail_url_for("9781592407323", &client), None);
        assert_eq!(client.requests().len(), 4);

        let client = MockClient::new()
            .respond_times(3, 404, "")
            .respond(500, "");
        assert_eq!(thumbnail_url_for("9781592407323", &client), None);
    }
}
