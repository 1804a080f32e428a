//! Top-ten district bar chart.
//!
//! The chart is a single horizontal bar series of up to ten points, drawn
//! onto a `ChartSurface`. The caller owns the `ChartHandle` of whatever is
//! currently drawn and hands it back on the next render, which disposes of
//! it before drawing again, so a surface never shows two overlapping charts.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::coerce::{escape_attr, escape_html, format_number, to_number};
use crate::ingest::fetch::{fetch_csv, CsvSource};
use crate::model::{Dataset, FetchError, Row};

pub const TOP_N: usize = 10;

/// Known spellings of the value column, used when no column is given.
pub const VALUE_COLUMN_CANDIDATES: &[&str] = &[
    "Actual Rainfall (mm)",
    "Actual (mm)",
    "Actual",
    "Rainfall (mm)",
    "Rainfall",
    "वास्तविक वर्षा (मिमी)",
    "वास्तविक",
];

/// One bar: a district label and its coerced value.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
}

/// Everything a surface needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub title: String,
    pub points: Vec<BarPoint>,
}

/// Identifies a chart drawn on a surface. Not `Clone`: whoever holds it
/// is the one responsible for disposing of it.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    id: u64,
}

impl ChartHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A drawing target for bar charts (canvas, SVG document, test double).
pub trait ChartSurface {
    fn draw_horizontal_bars(&mut self, series: &BarSeries) -> ChartHandle;
    fn dispose(&mut self, handle: ChartHandle);
}

// ---------------------------------------------------------------------------
// Column and label selection
// ---------------------------------------------------------------------------

/// Picks the value column: explicit override, else the first header (in
/// header order) that is a known candidate, else the second header.
pub fn select_value_column(headers: &[String], value_key: Option<&str>) -> Option<String> {
    if let Some(key) = value_key {
        return Some(key.to_string());
    }

    headers
        .iter()
        .find(|h| VALUE_COLUMN_CANDIDATES.contains(&h.as_str()))
        .cloned()
        .or_else(|| headers.get(1).cloned())
}

/// Label for a bar: the first header's cell, else a `District` /
/// `district` cell, else the first non-empty cell in header order.
pub fn row_label(row: &Row, headers: &[String]) -> String {
    let first = headers.first().map(|h| row.value(h)).unwrap_or("");
    [first, row.value("District"), row.value("district")]
        .into_iter()
        .find(|v| !v.is_empty())
        .or_else(|| headers.iter().map(|h| row.value(h)).find(|v| !v.is_empty()))
        .unwrap_or("")
        .to_string()
}

/// Highest ten rows by `value_key`, returned in ascending order.
///
/// Rows are sorted descending (stable), the first ten kept, and the slice
/// reversed so the largest bar is drawn last.
pub fn top_ten(dataset: &Dataset, value_key: Option<&str>) -> Vec<BarPoint> {
    let column = select_value_column(&dataset.headers, value_key);
    let value_of = |row: &Row| column.as_deref().map(|c| to_number(row.value(c))).unwrap_or(0.0);

    let mut ranked: Vec<&Row> = dataset.rows.iter().collect();
    ranked.sort_by(|a, b| {
        value_of(*b)
            .partial_cmp(&value_of(*a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut points: Vec<BarPoint> = ranked
        .into_iter()
        .take(TOP_N)
        .map(|row| BarPoint {
            label: row_label(row, &dataset.headers),
            value: value_of(row),
        })
        .collect();
    points.reverse();
    points
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Draws the top-ten chart for `dataset`, disposing of the chart held in
/// `slot` first and storing the new handle there.
pub fn render_top_ten<S: ChartSurface>(
    surface: &mut S,
    slot: &mut Option<ChartHandle>,
    dataset: &Dataset,
    value_key: Option<&str>,
) {
    let title = select_value_column(&dataset.headers, value_key).unwrap_or_default();
    let series = BarSeries {
        title,
        points: top_ten(dataset, value_key),
    };

    if let Some(previous) = slot.take() {
        surface.dispose(previous);
    }
    *slot = Some(surface.draw_horizontal_bars(&series));
}

/// Fetches the CSV for `name` and renders its top-ten chart.
///
/// A failed fetch propagates and leaves `slot` (and the surface) as is.
pub fn fetch_and_render_top_ten<S: ChartSurface>(
    client: &reqwest::blocking::Client,
    source: &CsvSource,
    name: &str,
    surface: &mut S,
    slot: &mut Option<ChartHandle>,
    value_key: Option<&str>,
) -> Result<(), FetchError> {
    let dataset = fetch_csv(client, source, name)?;
    render_top_ten(surface, slot, &dataset, value_key);
    Ok(())
}

// ---------------------------------------------------------------------------
// SVG surface
// ---------------------------------------------------------------------------

const SVG_WIDTH: f64 = 640.0;
const BAR_HEIGHT: f64 = 24.0;
const BAR_GAP: f64 = 6.0;
const LABEL_WIDTH: f64 = 160.0;
const VALUE_WIDTH: f64 = 70.0;
const TITLE_HEIGHT: f64 = 28.0;

/// Renders charts as standalone SVG documents.
#[derive(Debug, Default)]
pub struct SvgSurface {
    next_id: u64,
    charts: BTreeMap<u64, String>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charts currently drawn.
    pub fn live_charts(&self) -> usize {
        self.charts.len()
    }

    pub fn svg(&self, handle: &ChartHandle) -> Option<&str> {
        self.charts.get(&handle.id).map(String::as_str)
    }
}

impl ChartSurface for SvgSurface {
    fn draw_horizontal_bars(&mut self, series: &BarSeries) -> ChartHandle {
        self.next_id += 1;
        let id = self.next_id;
        self.charts.insert(id, svg_document(series));
        ChartHandle { id }
    }

    fn dispose(&mut self, handle: ChartHandle) {
        self.charts.remove(&handle.id);
    }
}

fn svg_document(series: &BarSeries) -> String {
    let rows = series.points.len() as f64;
    let height = TITLE_HEIGHT + rows * (BAR_HEIGHT + BAR_GAP) + BAR_GAP;
    let plot_width = SVG_WIDTH - LABEL_WIDTH - VALUE_WIDTH;
    let max = series
        .points
        .iter()
        .map(|p| p.value)
        .fold(0.0_f64, f64::max);

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" role=\"img\" aria-label=\"{}\">",
        SVG_WIDTH,
        height,
        escape_attr(&series.title)
    );
    let _ = writeln!(
        svg,
        "<text x=\"0\" y=\"18\" font-weight=\"bold\">{}</text>",
        escape_html(&series.title)
    );

    for (i, point) in series.points.iter().enumerate() {
        let y = TITLE_HEIGHT + i as f64 * (BAR_HEIGHT + BAR_GAP);
        // Negative values draw as zero-width bars; the label still shows them.
        let width = if max > 0.0 { (point.value.max(0.0) / max) * plot_width } else { 0.0 };
        let _ = writeln!(
            svg,
            "<text x=\"{}\" y=\"{}\" text-anchor=\"end\">{}</text>",
            LABEL_WIDTH - 8.0,
            y + BAR_HEIGHT * 0.7,
            escape_html(&point.label)
        );
        let _ = writeln!(
            svg,
            "<rect class=\"bar\" x=\"{}\" y=\"{}\" width=\"{:.1}\" height=\"{}\" fill=\"#2b7bb9\"/>",
            LABEL_WIDTH,
            y,
            width,
            BAR_HEIGHT
        );
        let _ = writeln!(
            svg,
            "<text x=\"{:.1}\" y=\"{}\">{}</text>",
            LABEL_WIDTH + width + 6.0,
            y + BAR_HEIGHT * 0.7,
            format_number(point.value, 1)
        );
    }

    svg.push_str("</svg>\n");
    svg
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::parse_csv;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_explicit_value_key_wins() {
        let h = headers(&["District", "Actual (mm)", "Normal (mm)"]);
        assert_eq!(
            select_value_column(&h, Some("Normal (mm)")).as_deref(),
            Some("Normal (mm)")
        );
    }

    #[test]
    fn test_known_candidate_is_selected() {
        let h = headers(&["District", "Normal (mm)", "Actual (mm)"]);
        assert_eq!(select_value_column(&h, None).as_deref(), Some("Actual (mm)"));
    }

    #[test]
    fn test_first_matching_header_wins_over_candidate_priority() {
        // "Actual (mm)" is listed before "Rainfall (mm)" among the candidates,
        // but "Rainfall (mm)" comes first in the file.
        let h = headers(&["District", "Rainfall (mm)", "Actual (mm)"]);
        assert_eq!(select_value_column(&h, None).as_deref(), Some("Rainfall (mm)"));

        let ds = parse_csv("District,Rainfall (mm),Actual (mm)\nA,5,100\nB,9,1\n");
        let labels: Vec<_> = top_ten(&ds, None).into_iter().map(|p| p.label).collect();
        assert_eq!(labels, vec!["A", "B"], "bars should be ranked by Rainfall (mm)");
    }

    #[test]
    fn test_falls_back_to_second_header() {
        let h = headers(&["Name", "Total", "Other"]);
        assert_eq!(select_value_column(&h, None).as_deref(), Some("Total"));
        assert_eq!(select_value_column(&headers(&["Only"]), None), None);
    }

    #[test]
    fn test_top_ten_is_ascending_slice_of_highest() {
        let mut text = String::from("District,Actual\n");
        for i in 1..=12 {
            text.push_str(&format!("D{},{}\n", i, i * 10));
        }
        let points = top_ten(&parse_csv(&text), None);
        assert_eq!(points.len(), 10);
        assert_eq!(points.first().map(|p| p.label.as_str()), Some("D3"));
        assert_eq!(points.last().map(|p| p.label.as_str()), Some("D12"));
        assert!(points.windows(2).all(|w| w[0].value <= w[1].value));
    }

    #[test]
    fn test_fewer_than_ten_rows_are_all_kept() {
        let points = top_ten(&parse_csv("District,Actual\nA,5\nB,3\nC,N/A\n"), None);
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_label_falls_back_to_district_then_first_value() {
        let h = headers(&["Code", "District", "Actual"]);
        let row: Row = [("Code", ""), ("District", "Pune"), ("Actual", "3")].into_iter().collect();
        assert_eq!(row_label(&row, &h), "Pune");

        let h = headers(&["Code", "Name", "Actual"]);
        let row: Row = [("Code", ""), ("Name", "Nashik"), ("Actual", "3")].into_iter().collect();
        assert_eq!(row_label(&row, &h), "Nashik");
    }

    #[test]
    fn test_rerender_disposes_previous_chart() {
        let ds = parse_csv("District,Actual\nA,1\nB,2\n");
        let mut surface = SvgSurface::new();
        let mut slot = None;

        render_top_ten(&mut surface, &mut slot, &ds, None);
        let first_id = slot.as_ref().map(ChartHandle::id);
        render_top_ten(&mut surface, &mut slot, &ds, None);

        assert_eq!(surface.live_charts(), 1, "only one chart may be live per surface");
        assert_ne!(slot.as_ref().map(ChartHandle::id), first_id);
    }

    #[test]
    fn test_svg_contains_escaped_labels_and_one_bar_per_point() {
        let ds = parse_csv("District,Actual\nA&B,10\nC,20\n");
        let mut surface = SvgSurface::new();
        let mut slot = None;
        render_top_ten(&mut surface, &mut slot, &ds, None);

        let handle = slot.expect("chart should be drawn");
        let svg = surface.svg(&handle).expect("svg should exist");
        assert!(svg.contains("A&amp;B"));
        assert_eq!(svg.matches("class=\"bar\"").count(), 2);
    }

    #[test]
    fn test_failed_fetch_keeps_existing_chart() {
        let mut surface = SvgSurface::new();
        let mut slot = None;
        render_top_ten(&mut surface, &mut slot, &parse_csv("District,Actual\nA,1\n"), None);

        let client = reqwest::blocking::Client::new();
        let source = CsvSource::Local {
            dir: std::env::temp_dir().join("rainfall_chart_missing_dir"),
        };
        let result =
            fetch_and_render_top_ten(&client, &source, "june", &mut surface, &mut slot, None);

        assert!(result.is_err());
        assert!(slot.is_some());
        assert_eq!(surface.live_charts(), 1);
    }
}
