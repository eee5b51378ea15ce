//! Command handlers. Each one drives a single [`Pipeline`] entry point and
//! prints its outcome to stdout; logs go to stderr.

use std::path::Path;

use autoscan_core::VehicleRecord;
use autoscan_pipeline::{Pipeline, ScrapeOutcome, SearchOutcome, SourceStatus};
use serde::{Deserialize, Serialize};

use crate::Commands;

/// Accepted shapes for `import`: the bare array an assistant produces, or
/// the API request body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportFile {
    Records(Vec<VehicleRecord>),
    Wrapped { vehicles: Vec<VehicleRecord> },
}

impl ImportFile {
    fn into_records(self) -> Vec<VehicleRecord> {
        match self {
            Self::Records(records) | Self::Wrapped { vehicles: records } => records,
        }
    }
}

pub(crate) async fn run(
    pipeline: &Pipeline,
    command: Commands,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        Commands::Search { platforms, filter } => {
            let filter = filter.into_filter()?;
            let outcome = pipeline.run_search(&filter, &platforms).await?;
            emit(json, &outcome, print_search)
        }
        Commands::Scrape { platform, filter } => {
            let filter = filter.into_filter()?;
            let outcome = pipeline.run_single_scrape(&platform, &filter).await?;
            emit(json, &outcome, print_scrape)
        }
        Commands::Urls { filter } => {
            let locators = pipeline.build_locators(&filter.into_filter()?)?;
            emit(json, &locators, |locators| {
                for (id, locator) in locators {
                    println!("{id:<14} {locator}");
                }
            })
        }
        Commands::Import { file } => {
            let records = read_import_file(&file)?;
            let outcome = pipeline.import_records(records).await;
            emit(json, &outcome, print_search)
        }
        Commands::Analyze { file, filter } => {
            let content = read_file(&file)?;
            let records = pipeline
                .analyze_manual_content(&content, &filter.into_filter()?)
                .await?;
            emit(json, &records, |records| print_records(records.iter()))
        }
        Commands::Prompt { filter } => {
            let prompt = pipeline.manual_prompt(&filter.into_filter()?);
            if json {
                println!("{}", serde_json::json!({ "prompt": prompt }));
            } else {
                println!("{prompt}");
            }
            Ok(())
        }
        Commands::TelegramTest => {
            pipeline.send_test_message().await?;
            println!("Telegram test message sent");
            Ok(())
        }
        Commands::TelegramDetail { file } => {
            let raw = read_file(&file)?;
            let record: VehicleRecord = serde_json::from_str(&raw).map_err(|e| {
                anyhow::anyhow!("{} must hold a single vehicle object: {e}", file.display())
            })?;
            if !pipeline.send_vehicle_detail(&record).await? {
                anyhow::bail!("Telegram rejected the vehicle detail message");
            }
            println!("Telegram vehicle detail sent");
            Ok(())
        }
    }
}

fn emit<T>(json: bool, value: &T, human: impl FnOnce(&T)) -> anyhow::Result<()>
where
    T: Serialize + ?Sized,
{
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))
}

fn read_import_file(path: &Path) -> anyhow::Result<Vec<VehicleRecord>> {
    let raw = read_file(path)?;
    let parsed: ImportFile = serde_json::from_str(&raw).map_err(|e| {
        anyhow::anyhow!(
            "{} must hold a JSON array of vehicles or an object with a `vehicles` array: {e}",
            path.display()
        )
    })?;
    let records = parsed.into_records();
    tracing::debug!(file = %path.display(), records = records.len(), "import file loaded");
    Ok(records)
}

fn print_search(outcome: &SearchOutcome) {
    println!("{}", outcome.alert.message);
    print_sources(&outcome.sources);
    for classified in &outcome.all_records {
        let marker = if classified.is_new { "NEU" } else { "   " };
        println!("{marker} {}", record_line(&classified.record));
    }
    println!(
        "{} Fahrzeuge, {} neu, Benachrichtigung {}",
        outcome.total_count,
        outcome.new_count,
        if outcome.notified { "gesendet" } else { "nicht gesendet" }
    );
}

fn print_scrape(outcome: &ScrapeOutcome) {
    print_sources(std::slice::from_ref(&outcome.source));
    print_records(outcome.all_records.iter());
}

fn print_sources(sources: &[SourceStatus]) {
    for source in sources {
        match source.error.as_deref() {
            Some(error) => println!("  {:<14} FEHLER: {error}", source.platform_id),
            None => println!("  {:<14} {} Zeichen", source.platform_id, source.chars),
        }
    }
}

fn print_records<'a>(records: impl Iterator<Item = &'a VehicleRecord>) {
    for record in records {
        println!("    {}", record_line(record));
    }
}

fn record_line(record: &VehicleRecord) -> String {
    let mut parts = vec![record.display_title().to_string()];
    parts.extend(
        [
            record.price.as_deref(),
            record.mileage.as_deref(),
            record.first_registration.as_deref(),
            record.location.as_deref(),
            record.platform.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::to_string),
    );
    let mut line = parts.join(" | ");
    if let Some(link) = record.link.as_deref() {
        line.push_str("\n        ");
        line.push_str(link);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_file_accepts_bare_array_and_wrapped_object() {
        let bare: ImportFile =
            serde_json::from_str(r#"[{"id": "X", "titel": "A", "plattform": "Manual"}]"#)
                .expect("bare array");
        assert_eq!(bare.into_records().len(), 1);

        let wrapped: ImportFile =
            serde_json::from_str(r#"{"vehicles": [{"id": "X"}, {"id": "Y"}]}"#)
                .expect("wrapped object");
        assert_eq!(wrapped.into_records().len(), 2);
    }

    #[test]
    fn record_line_skips_missing_fields() {
        let record = VehicleRecord {
            title: Some("VW Golf 1.6 TDI".to_string()),
            price: Some("5.900 €".to_string()),
            platform: Some("Mobile.de".to_string()),
            link: Some("https://x.test/1".to_string()),
            ..VehicleRecord::default()
        };
        assert_eq!(
            record_line(&record),
            "VW Golf 1.6 TDI | 5.900 € | Mobile.de\n        https://x.test/1"
        );
    }
}
