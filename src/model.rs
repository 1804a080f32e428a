/// Core data types for the district rainfall tables.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no external dependencies, only types.

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// Row and dataset types
// ---------------------------------------------------------------------------

/// One data line of a district CSV file, keyed by column name.
///
/// Every header of the owning `Dataset` is present as a key; cells that
/// were missing in the source line hold an empty string. Display order is
/// never taken from the map, always from `Dataset::headers`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell. A repeated column name overwrites the earlier value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Returns the cell for `column`, or `None` if the column is unknown.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Returns the cell for `column`, or `""` if the column is unknown.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// All cell values, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.cells.values().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

/// A full parsed table for one source file.
///
/// `headers` is the authoritative column schema and display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Builds a dataset from positional records, padding short records
    /// with empty strings and ignoring surplus fields.
    #[cfg(test)]
    pub fn from_records<S: AsRef<str>>(headers: &[S], records: &[Vec<S>]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| AsRef::<str>::as_ref(h).to_string()).collect();
        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .enumerate()
                    .map(|(i, h)| {
                        let cell = record.get(i).map(AsRef::<str>::as_ref).unwrap_or("");
                        (h.clone(), cell.to_string())
                    })
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when retrieving a district CSV file.
///
/// This is the only failure class that is raised. Malformed rows, missing
/// columns and non-numeric cells are defaulted silently downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Non-2xx HTTP response.
    Http { url: String, status: u16 },
    /// The request never produced a response (DNS, connect, read body).
    Transport { url: String, message: String },
    /// A local CSV file could not be read.
    Io { path: String, message: String },
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http { url, status } => {
                write!(f, "Failed to fetch {}: HTTP error {}", url, status)
            }
            FetchError::Transport { url, message } => {
                write!(f, "Failed to fetch {}: {}", url, message)
            }
            FetchError::Io { path, message } => write!(f, "Failed to read {}: {}", path, message),
        }
    }
}

impl std::error::Error for FetchError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_value_defaults_to_empty_string() {
        let row: Row = [("District", "Pune")].into_iter().collect();
        assert_eq!(row.value("District"), "Pune");
        assert_eq!(row.value("Normal"), "");
        assert!(row.get("Normal").is_none());
    }

    #[test]
    fn test_from_records_pads_short_records() {
        let ds = Dataset::from_records(
            &["District", "Actual", "Normal"],
            &[vec!["Pune", "120"], vec!["Nashik", "80", "90", "extra"]],
        );
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].value("Normal"), "");
        assert!(ds.rows[0].contains("Normal"), "padded column should still be keyed");
        assert_eq!(ds.rows[1].value("Normal"), "90");
    }

    #[test]
    fn test_fetch_error_display_carries_url() {
        let err = FetchError::Http {
            url: "http://localhost/data/june.csv?t=1".to_string(),
            status: 404,
        };
        assert!(err.to_string().contains("http://localhost/data/june.csv?t=1"));
    }
}
