/// Integration test for the static page builder
///
/// Builds the site from a local data directory where only some periods
/// are published, and checks that the missing ones are skipped.

use std::path::PathBuf;

use rainfall_tables::config::Config;
use rainfall_tables::site::build_site;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rainfall_site_{}_{}", name, std::process::id()));
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[test]
fn test_build_site_writes_published_periods_and_skips_missing() {
    let root = scratch_dir("partial");
    let data = root.join("data");
    let out = root.join("public");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(
        data.join("june.csv"),
        "District,Actual (mm),Normal (mm),% Departure\nPune,120,100,20\nNagpur,<b>90</b>,100,-10\n",
    )
    .unwrap();
    std::fs::write(data.join("july.csv"), "").unwrap();

    let config_text = format!(
        "[source]\nkind = \"local\"\ndir = {:?}\n\n[site]\noutput_dir = {:?}\npage_size = 1\n",
        data.display().to_string(),
        out.display().to_string()
    );
    let config = Config::parse(&config_text, "inline").expect("config should parse");

    let client = reqwest::blocking::Client::new();
    let report = build_site(&client, &config).expect("build should not abort");

    assert_eq!(report.written, vec!["june", "july"]);
    assert_eq!(report.failed, vec!["august", "september", "overall_monsoon"]);

    let june = std::fs::read_to_string(out.join("june.html")).expect("june page written");
    assert!(june.contains("June Rainfall"));
    assert!(june.contains("<svg"));
    assert!(june.contains("Page 1 of 2 (2 records)"));
    assert!(june.contains("href=\"june-2.html\""), "first page should link to the second");

    let june_2 = std::fs::read_to_string(out.join("june-2.html")).expect("second june page written");
    assert!(june_2.contains("<td>Nagpur</td>"), "second row belongs on page 2");
    assert!(june_2.contains("<td>&lt;b&gt;90&lt;/b&gt;</td>"), "cells must be escaped");
    assert!(june_2.contains("Page 2 of 2 (2 records)"));

    let export = std::fs::read_to_string(out.join("june.csv")).expect("june export written");
    assert_eq!(export.lines().count(), 3, "export carries every row, not one page");

    let july = std::fs::read_to_string(out.join("july.html")).expect("july page written");
    assert!(july.contains("No records found"));
    assert!(!july.contains("class=\"summary\""), "empty dataset has no summary cards");

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn test_every_table_page_is_written_with_default_page_size() {
    let root = scratch_dir("paged");
    let data = root.join("data");
    let out = root.join("public");
    std::fs::create_dir_all(&data).unwrap();

    let mut csv = String::from("District,Actual (mm)\n");
    for i in 1..=25 {
        csv.push_str(&format!("District{:02},{}\n", i, i * 10));
    }
    std::fs::write(data.join("june.csv"), csv).unwrap();

    let config_text = format!(
        "[source]\nkind = \"local\"\ndir = {:?}\n\n[site]\noutput_dir = {:?}\n",
        data.display().to_string(),
        out.display().to_string()
    );
    let config = Config::parse(&config_text, "inline").expect("config should parse");
    let client = reqwest::blocking::Client::new();
    build_site(&client, &config).expect("build should not abort");

    let pages: Vec<String> = ["june.html", "june-2.html", "june-3.html"]
        .iter()
        .map(|f| std::fs::read_to_string(out.join(f)).unwrap_or_else(|_| panic!("{} written", f)))
        .collect();
    assert!(!out.join("june-4.html").exists());

    let shown: usize = pages.iter().map(|p| p.matches("<td>District").count()).sum();
    assert_eq!(shown, 25, "every row should appear on exactly one page");
    assert!(pages[2].contains("<td>District25</td>"));
    assert!(pages[2].contains("Page 3 of 3 (25 records)"));
    assert!(pages[1].contains("rel=\"prev\" href=\"june.html\""));
    assert!(pages[1].contains("rel=\"next\" href=\"june-3.html\""));

    std::fs::remove_dir_all(&root).ok();
}
