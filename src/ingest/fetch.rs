/// District CSV retrieval.
///
/// Pages read one CSV per reporting period from a fixed location, either
/// an HTTP base URL (the published site) or a local directory (offline
/// builds). HTTP requests carry a cache-busting timestamp so a browser or
/// proxy cache never serves a stale period file.
///
/// A failed request fails the whole operation: there is no retry, no
/// fallback data and no timeout beyond the client's own.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ingest::csv_text::parse_csv;
use crate::model::{Dataset, FetchError};

/// Where period CSV files are read from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CsvSource {
    /// `{base_url}/{name}.csv?t={millis}`
    Http { base_url: String },
    /// `{dir}/{name}.csv`
    Local { dir: PathBuf },
}

/// Builds the request URL for a named CSV with a cache-busting query.
///
/// Takes `now` explicitly so the URL is deterministic in tests.
pub fn csv_url(base_url: &str, name: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}/{}.csv?t={}",
        base_url.trim_end_matches('/'),
        name,
        now.timestamp_millis()
    )
}

/// Fetch and parse the CSV for `name` from `source`.
pub fn fetch_csv(
    client: &reqwest::blocking::Client,
    source: &CsvSource,
    name: &str,
) -> Result<Dataset, FetchError> {
    let text = match source {
        CsvSource::Http { base_url } => {
            fetch_text(client, &csv_url(base_url, name, Utc::now()))?
        }
        CsvSource::Local { dir } => read_local(&dir.join(format!("{}.csv", name)))?,
    };

    Ok(parse_csv(&text))
}

/// GET `url` and return the decoded body. Non-2xx is an error carrying the URL.
pub fn fetch_text(client: &reqwest::blocking::Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().map_err(|e| FetchError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    if !response.status().is_success() {
        return Err(FetchError::Http {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    response.text().map_err(|e| FetchError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn read_local(path: &Path) -> Result<String, FetchError> {
    std::fs::read_to_string(path).map_err(|e| FetchError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
