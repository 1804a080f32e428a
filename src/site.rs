/// Static page builder.
///
/// For each reporting period: fetch the CSV, mount it in a
/// `DistrictTable`, compute the summary cards and the top-ten chart, and
/// write one HTML file per table page (`{period}.html`, `{period}-2.html`,
/// ...) plus `{period}.csv` (the quoted export) into the output directory. A period that fails to fetch is logged and skipped;
/// the rest of the site is still built.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::analysis::{summarize, Summary};
use crate::chart::{render_top_ten, select_value_column, ChartHandle, SvgSurface};
use crate::coerce::{escape_html, format_number};
use crate::config::Config;
use crate::ingest::fetch::{fetch_csv, CsvSource};
use crate::logging::{self, LogSource};
use crate::model::FetchError;
use crate::periods::{Period, PERIOD_REGISTRY};
use crate::table::DistrictTable;

#[derive(Debug)]
pub enum BuildError {
    Fetch(FetchError),
    Write { path: String, message: String },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Fetch(e) => write!(f, "{}", e),
            BuildError::Write { path, message } => write!(f, "Cannot write {}: {}", path, message),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<FetchError> for BuildError {
    fn from(err: FetchError) -> Self {
        BuildError::Fetch(err)
    }
}

/// Files written for one period. `html` holds one file per table page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutput {
    pub html: Vec<PathBuf>,
    pub csv: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    pub written: Vec<String>,
    pub failed: Vec<String>,
}

/// Summary cards markup. The empty aggregate renders nothing.
pub fn summary_cards(summary: &Summary) -> String {
    if summary.is_empty() {
        return String::new();
    }

    let cards = [
        ("Districts / जिले", summary.row_count.to_string()),
        ("Avg. actual (mm) / औसत वास्तविक", format_number(summary.avg_actual, 1)),
        ("Avg. normal (mm) / औसत सामान्य", format_number(summary.avg_normal, 1)),
        ("Avg. departure (%) / औसत विचलन", format_number(summary.avg_departure, 1)),
    ];

    let mut html = String::from("<div class=\"summary\">\n");
    for (label, value) in cards {
        let _ = writeln!(
            html,
            "<div class=\"card\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>",
            escape_html(label),
            value
        );
    }
    html.push_str("</div>\n");
    html
}

/// File name of table page `n` (1-based): `{name}.html`, then `{name}-{n}.html`.
pub fn page_file_name(name: &str, n: usize) -> String {
    if n <= 1 {
        format!("{}.html", name)
    } else {
        format!("{}-{}.html", name, n)
    }
}

/// Previous/next links between the table pages of one period.
fn page_nav(name: &str, n: usize, pages: usize) -> String {
    if pages <= 1 {
        return String::new();
    }

    let mut nav = String::from("<nav class=\"pages\">");
    if n > 1 {
        let _ = write!(nav, "<a rel=\"prev\" href=\"{}\">&laquo; Previous / पिछला</a> ", page_file_name(name, n - 1));
    }
    for i in 1..=pages {
        if i == n {
            let _ = write!(nav, "<strong>{}</strong> ", i);
        } else {
            let _ = write!(nav, "<a href=\"{}\">{}</a> ", page_file_name(name, i), i);
        }
    }
    if n < pages {
        let _ = write!(nav, "<a rel=\"next\" href=\"{}\">Next / अगला &raquo;</a>", page_file_name(name, n + 1));
    }
    nav.push_str("</nav>\n");
    nav
}

fn page_html(period: &Period, cards: &str, chart_svg: &str, table_markup: &str, nav: &str) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(
        html,
        "<title>{} / {}</title>\n</head>\n<body>",
        escape_html(period.title),
        escape_html(period.title_hi)
    );
    let _ = writeln!(
        html,
        "<h1>{}<br><small>{}</small></h1>",
        escape_html(period.title),
        escape_html(period.title_hi)
    );
    html.push_str(cards);
    let _ = writeln!(html, "<figure class=\"chart\">\n{}</figure>", chart_svg);
    html.push_str(table_markup);
    html.push_str(nav);
    let _ = writeln!(
        html,
        "<p><a href=\"{}.csv\" download>Download CSV / सीएसवी डाउनलोड करें</a></p>",
        period.name
    );
    html.push_str("</body>\n</html>\n");
    html
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    std::fs::write(path, contents).map_err(|e| BuildError::Write {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Builds and writes every table page of one period, plus its export.
pub fn build_period_page(
    client: &reqwest::blocking::Client,
    source: &CsvSource,
    period: &Period,
    page_size: usize,
    out_dir: &Path,
) -> Result<PageOutput, BuildError> {
    let dataset = fetch_csv(client, source, period.name)?;
    logging::debug(
        LogSource::Parse,
        Some(period.name),
        &format!("{} rows, {} columns", dataset.len(), dataset.headers.len()),
    );

    let summary = summarize(&dataset);

    let mut surface = SvgSurface::new();
    let mut chart: Option<ChartHandle> = None;
    render_top_ten(&mut surface, &mut chart, &dataset, None);
    logging::debug(
        LogSource::Chart,
        Some(period.name),
        &format!(
            "top ten by {}",
            select_value_column(&dataset.headers, None).as_deref().unwrap_or("(no column)")
        ),
    );
    let chart_svg = chart
        .as_ref()
        .and_then(|h| surface.svg(h))
        .unwrap_or_default()
        .to_string();

    let rows = dataset.len();
    let mut table = DistrictTable::new(dataset, page_size);
    let export = table.export_csv(Some(&format!("{}.csv", period.name)));

    let cards = summary_cards(&summary);
    let pages = table.max_page();
    let mut html_paths = Vec::with_capacity(pages);
    for n in 1..=pages {
        table.go_to_page(n as i64);
        let html = page_html(period, &cards, &chart_svg, table.markup(), &page_nav(period.name, n, pages));
        let html_path = out_dir.join(page_file_name(period.name, n));
        write_file(&html_path, &html)?;
        html_paths.push(html_path);
    }
    logging::debug(
        LogSource::Table,
        Some(period.name),
        &format!("{} rows over {} pages of {}", rows, pages, table.page_size()),
    );

    let csv_path = export.save(out_dir).map_err(|e| BuildError::Write {
        path: out_dir.join(&export.filename).display().to_string(),
        message: e.to_string(),
    })?;

    Ok(PageOutput {
        html: html_paths,
        csv: csv_path,
        rows,
    })
}

/// Builds every registered period. Failures are logged and counted.
pub fn build_site(client: &reqwest::blocking::Client, config: &Config) -> Result<BuildReport, BuildError> {
    let out_dir = &config.site.output_dir;
    std::fs::create_dir_all(out_dir).map_err(|e| BuildError::Write {
        path: out_dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut report = BuildReport::default();
    for period in PERIOD_REGISTRY {
        match build_period_page(client, &config.source, period, config.site.page_size, out_dir) {
            Ok(output) => {
                logging::info(
                    LogSource::Site,
                    Some(period.name),
                    &format!("wrote {} pages ({} rows)", output.html.len(), output.rows),
                );
                report.written.push(period.name.to_string());
            }
            Err(BuildError::Fetch(e)) => {
                logging::log_fetch_failure(period.name, "fetch period csv", &e);
                report.failed.push(period.name.to_string());
            }
            Err(e) => {
                logging::error(LogSource::Site, Some(period.name), &e.to_string());
                report.failed.push(period.name.to_string());
            }
        }
    }

    logging::log_build_summary(PERIOD_REGISTRY.len(), report.written.len(), report.failed.len());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;

    #[test]
    fn test_page_file_names() {
        assert_eq!(page_file_name("june", 1), "june.html");
        assert_eq!(page_file_name("june", 3), "june-3.html");
    }

    #[test]
    fn test_page_nav_links_neighbours() {
        assert_eq!(page_nav("july", 1, 1), "");

        let first = page_nav("july", 1, 3);
        assert!(!first.contains("rel=\"prev\""));
        assert!(first.contains("rel=\"next\" href=\"july-2.html\""));

        let middle = page_nav("july", 2, 3);
        assert!(middle.contains("rel=\"prev\" href=\"july.html\""));
        assert!(middle.contains("rel=\"next\" href=\"july-3.html\""));
        assert!(middle.contains("<strong>2</strong>"));

        let last = page_nav("july", 3, 3);
        assert!(!last.contains("rel=\"next\""));
    }

    #[test]
    fn test_empty_summary_renders_no_cards() {
        assert_eq!(summary_cards(&Summary::default()), "");
    }

    #[test]
    fn test_summary_cards_show_averages() {
        let ds = Dataset::from_records(
            &["District", "Actual", "Normal", "Departure"],
            &[vec!["A", "100", "80", "25"], vec!["B", "50", "100", "-50"]],
        );
        let html = summary_cards(&summarize(&ds));
        assert!(html.contains("<span class=\"value\">2</span>"));
        assert!(html.contains("75.0"));
        assert!(html.contains("-12.5"));
    }
}
