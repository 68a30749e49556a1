//! Fetch command - run a single feed fetch and print the vehicles.

use clap::Args;
use transitmap::feed::{FeedFetcher, HttpFeedClient, VehicleRecord};

use super::common::FeedArgs;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the fetch command.
#[derive(Debug, Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub feed: FeedArgs,

    /// Print records as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable debug-level logging
    #[arg(long)]
    pub debug: bool,
}

/// Fetch once and print the extracted records.
pub fn run(args: FetchArgs) -> Result<(), CliError> {
    // stdout carries the result, so logs go to the file only
    let runner = CliRunner::with_stdout_logging(args.debug, false)?;
    runner.log_startup("fetch");

    let mut config = runner.config().clone();
    args.feed.apply(&mut config)?;

    let client = HttpFeedClient::new(config.feed_config())?;
    let fetcher = FeedFetcher::new(client).with_region(config.map.region);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let records = runtime.block_on(fetcher.fetch())?;

    if args.json {
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| CliError::Config(format!("Failed to encode records: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", format_table(&records));
        println!();
        println!("{} vehicles from {}", records.len(), config.feed.url);
    }

    Ok(())
}

/// Render records as a fixed-width text table.
fn format_table(records: &[VehicleRecord]) -> String {
    let line_width = column_width("LINE", records.iter().map(|r| r.line_label.as_str()));
    let dest_width = column_width(
        "DESTINATION",
        records.iter().map(|r| r.destination_label.as_str()),
    );

    let mut out = format!(
        "{:<line_width$}  {:<dest_width$}  {:>10}  {:>11}  VEHICLE\n",
        "LINE", "DESTINATION", "LAT", "LON"
    );
    for record in records {
        out.push_str(&format!(
            "{:<line_width$}  {:<dest_width$}  {:>10.5}  {:>11.5}  {}\n",
            record.line_label,
            record.destination_label,
            record.latitude,
            record.longitude,
            record.vehicle_ref.as_deref().unwrap_or("-"),
        ));
    }
    out
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(header.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_header_only_when_empty() {
        let table = format_table(&[]);
        assert_eq!(table.lines().count(), 1);
        assert!(table.starts_with("LINE"));
        assert!(table.contains("DESTINATION"));
    }

    #[test]
    fn test_table_rows() {
        let records = vec![
            VehicleRecord::new(43.26271, -2.92528)
                .with_line("A3247")
                .with_destination("Bilbao"),
            VehicleRecord::new(43.3, -2.98),
        ];

        let table = format_table(&records);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A3247"));
        assert!(lines[1].contains("43.26271"));
        assert!(lines[1].contains("-2.92528"));
        assert!(lines[1].ends_with('-'));
        assert!(lines[2].contains("Unknown route"));
        assert!(lines[2].contains("Unknown destination"));
    }

    #[test]
    fn test_column_width_uses_longest_value() {
        assert_eq!(column_width("LINE", ["A1", "Bilbao-Mungia"].into_iter()), 13);
        assert_eq!(column_width("LINE", std::iter::empty()), 4);
    }
}
