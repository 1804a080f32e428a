/// Lenient parser for the district rainfall CSV files.
///
/// The files are small, hand-exported spreadsheets. There is no quoting,
/// no escaping and no schema: the first non-blank line is the header and
/// every later line is zipped positionally against it.

use crate::model::{Dataset, Row};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse raw CSV text into a `Dataset`.
///
/// Never fails. Blank or whitespace-only input yields an empty header
/// list and no rows. A short line yields `""` for its missing trailing
/// columns; surplus fields on a long line are dropped.
pub fn parse_csv(text: &str) -> Dataset {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let text = text.replace('\r', "");

    let mut lines = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty());

    let Some(header_line) = lines.next() else {
        return Dataset::default();
    };

    let headers: Vec<String> = header_line
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();

    let rows = lines
        .map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let mut row = Row::new();
            for (i, header) in headers.iter().enumerate() {
                row.insert(header.clone(), fields.get(i).copied().unwrap_or(""));
            }
            row
        })
        .collect();

    Dataset::new(headers, rows)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
