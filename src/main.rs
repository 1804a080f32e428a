use std::process::ExitCode;

use rainfall_tables::config::Config;
use rainfall_tables::logging::{self, LogSource};
use rainfall_tables::periods::{all_period_names, find_period};
use rainfall_tables::{site, verify};

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Usage: `rainfall_tables [verify | <period>]`. No argument builds every period.
///
/// Returns `Ok(false)` when the run finished but nothing could be built.
fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    logging::init_logger(
        config.logging.level,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    );

    let client = reqwest::blocking::Client::builder().build()?;
    let out_dir = &config.site.output_dir;

    match std::env::args().nth(1).as_deref() {
        Some("verify") => {
            let report = verify::verify_all(&client, &config.source);
            verify::print_summary(&report);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(report.summary.working > 0)
        }
        Some(name) => {
            let period = find_period(name).ok_or_else(|| {
                format!("unknown period '{}' (expected one of: {})", name, all_period_names().join(", "))
            })?;
            std::fs::create_dir_all(out_dir)?;
            let output = site::build_period_page(
                &client,
                &config.source,
                period,
                config.site.page_size,
                out_dir,
            )?;
            logging::info(
                LogSource::Site,
                Some(period.name),
                &format!("wrote {} pages ({} rows)", output.html.len(), output.rows),
            );
            Ok(true)
        }
        None => {
            logging::info(
                LogSource::Site,
                None,
                &format!("building site into {}", out_dir.display()),
            );
            let report = site::build_site(&client, &config)?;
            Ok(!report.written.is_empty())
        }
    }
}
