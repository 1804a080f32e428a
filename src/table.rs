//! Interactive district table: filter, sort, paginate, export.
//!
//! `DistrictTable` owns one dataset and its view state exclusively. Every
//! mutating operation re-renders into the table's own markup buffer, which
//! stands in for the page container the table is mounted in.
//!
//! Filtering always restarts from the full dataset, so a fresh filter
//! discards any ordering applied by an earlier `sort_by`. Callers that
//! want the sort kept must call `sort_by` again after `set_filter`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::coerce::{escape_attr, escape_html, to_number};
use crate::model::{Dataset, Row};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_EXPORT_FILENAME: &str = "export.csv";
pub const NO_RECORDS_TEXT: &str = "No records found / कोई रिकॉर्ड नहीं मिला";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => " ▲",
            SortDirection::Descending => " ▼",
        }
    }
}

/// A CSV artifact produced from the filtered view, ready to be offered
/// as a download or written next to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

impl CsvExport {
    /// Writes the artifact into `dir` under its filename.
    pub fn save(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let path = dir.join(&self.filename);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}

pub struct DistrictTable {
    data: Dataset,
    /// Indices into `data.rows`, in display order.
    filtered: Vec<usize>,
    query: String,
    sort_column: Option<String>,
    sort_direction: SortDirection,
    page: usize,
    page_size: usize,
    markup: String,
}

impl DistrictTable {
    /// Mounts a dataset with the full set visible, unsorted, on page 1.
    ///
    /// A `page_size` of zero is treated as 1.
    pub fn new(data: Dataset, page_size: usize) -> Self {
        let filtered = (0..data.rows.len()).collect();
        let mut table = Self {
            data,
            filtered,
            query: String::new(),
            sort_column: None,
            sort_direction: SortDirection::Descending,
            page: 1,
            page_size: page_size.max(1),
            markup: String::new(),
        };
        table.render();
        table
    }

    pub fn headers(&self) -> &[String] {
        &self.data.headers
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    /// `ceil(filtered / page_size)`, never less than 1.
    pub fn max_page(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size).max(1)
    }

    pub fn sort_state(&self) -> Option<(&str, SortDirection)> {
        self.sort_column
            .as_deref()
            .map(|col| (col, self.sort_direction))
    }

    /// The last rendered markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Rows of the filtered set, in display order.
    pub fn filtered_rows(&self) -> impl Iterator<Item = &Row> {
        self.filtered.iter().map(|&i| &self.data.rows[i])
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> Vec<&Row> {
        let start = (self.page - 1) * self.page_size;
        self.filtered_rows().skip(start).take(self.page_size).collect()
    }

    /// Case-insensitive substring filter over every cell of a row.
    ///
    /// Always restarts from the full dataset. An empty (or whitespace)
    /// query shows everything. Resets to page 1.
    pub fn set_filter(&mut self, query: &str) {
        self.query = query.trim().to_lowercase();

        self.filtered = if self.query.is_empty() {
            (0..self.data.rows.len()).collect()
        } else {
            let q = &self.query;
            self.data
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row.values().any(|v| v.to_lowercase().contains(q.as_str())))
                .map(|(i, _)| i)
                .collect()
        };

        self.page = 1;
        self.render();
    }

    /// Sorts the filtered set by the coerced numeric value of `column`.
    ///
    /// Sorting the current column again flips the direction; a new column
    /// starts descending. The sort is stable, so rows whose values coerce
    /// to the same number keep their relative order.
    pub fn sort_by(&mut self, column: &str) {
        if self.sort_column.as_deref() == Some(column) {
            self.sort_direction = self.sort_direction.flipped();
        } else {
            self.sort_column = Some(column.to_string());
            self.sort_direction = SortDirection::Descending;
        }

        let rows = &self.data.rows;
        let direction = self.sort_direction;
        self.filtered.sort_by(|&a, &b| {
            let va = to_number(rows[a].value(column));
            let vb = to_number(rows[b].value(column));
            let ord = va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        self.render();
    }

    /// Moves to page `n`, clamped into `[1, max_page]`.
    pub fn go_to_page(&mut self, n: i64) {
        let max = self.max_page() as i64;
        self.page = n.clamp(1, max) as usize;
        self.render();
    }

    /// Re-renders the current page into the markup buffer and returns it.
    pub fn render(&mut self) -> &str {
        let mut html = String::new();
        let columns = self.data.headers.len().max(1);

        html.push_str("<table class=\"district-table\">\n<thead><tr>");
        for header in &self.data.headers {
            let indicator = match self.sort_state() {
                Some((col, dir)) if col == header.as_str() => dir.indicator(),
                _ => "",
            };
            let _ = write!(
                html,
                "<th data-column=\"{}\">{}{}</th>",
                escape_attr(header),
                escape_html(header),
                indicator
            );
        }
        html.push_str("</tr></thead>\n<tbody>\n");

        let visible = self.visible_rows();
        if visible.is_empty() {
            let _ = writeln!(
                html,
                "<tr class=\"empty\"><td colspan=\"{}\">{}</td></tr>",
                columns,
                escape_html(NO_RECORDS_TEXT)
            );
        } else {
            for row in visible {
                html.push_str("<tr>");
                for header in &self.data.headers {
                    let _ = write!(html, "<td>{}</td>", escape_html(row.value(header)));
                }
                html.push_str("</tr>\n");
            }
        }

        html.push_str("</tbody>\n</table>\n");
        let _ = writeln!(
            html,
            "<div class=\"pagination\">Page {} of {} ({} records)</div>",
            self.page,
            self.max_page(),
            self.filtered.len()
        );

        self.markup = html;
        &self.markup
    }

    /// Serializes the filtered (not paginated) set as quoted CSV.
    ///
    /// Does not touch view state.
    pub fn export_csv(&self, filename: Option<&str>) -> CsvExport {
        let mut lines = Vec::with_capacity(self.filtered.len() + 1);
        lines.push(quote_record(self.data.headers.iter().map(String::as_str)));
        for row in self.filtered_rows() {
            lines.push(quote_record(self.data.headers.iter().map(|h| row.value(h))));
        }

        CsvExport {
            filename: filename.unwrap_or(DEFAULT_EXPORT_FILENAME).to_string(),
            content: lines.join("\n"),
        }
    }
}

fn quote_record<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
