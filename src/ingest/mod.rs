/// Reading district CSV files.
///
/// Submodules:
/// - `csv_text` — lenient text to `Dataset` parser.
/// - `fetch` — HTTP / local file retrieval with cache busting.

pub mod csv_text;
pub mod fetch;

pub use csv_text::parse_csv;
pub use fetch::{fetch_csv, CsvSource};
