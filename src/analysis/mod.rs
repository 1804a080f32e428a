/// One-shot computations over a parsed dataset.
///
/// The interactive view lives in `table`; this module only derives
/// figures that are recomputed on demand and never stored.
///
/// Submodules:
/// - `summary` — dataset-wide averages across bilingual column spellings.

pub mod summary;

pub use summary::{summarize, Summary};
