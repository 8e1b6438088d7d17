mod args;
mod roster;
mod web;

use std::sync::Arc;

use clap::Parser;
use log::{info, warn};
use serde_json::json;
use serde_json::Value as JSValue;
use snafu::{prelude::*, ErrorCompat};

use rotation_match::{find_matches, MatchOutcome, RecordStore};

use crate::args::Args;
use crate::roster::config_reader::{read_config, AppConfig, SourceConfig};
use crate::roster::RosterResult;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = run(args).await {
        eprintln!("An error occured {}", e);
        if let Some(bt) = ErrorCompat::backtrace(&e) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

async fn run(args: Args) -> RosterResult<()> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(input) = &args.input {
        config.roster_sources = vec![local_source(input, &args)?];
    }

    // One-shot lookup: load, query, print, done.
    if let (Some(name), Some(block)) = (&args.name, &args.block) {
        let records = roster::load_records(&config).await?;
        let outcome = find_matches(&records, name, block);
        let js = outcome_to_json(&outcome);
        match serde_json::to_string_pretty(&js) {
            Ok(pretty) => println!("{}", pretty),
            Err(e) => whatever!("Cannot render the outcome: {:?}", e),
        }
        return Ok(());
    }

    // Service mode: load once, then serve. A failed initial load is fatal
    // to that load only; the service starts with whatever it has.
    let store = Arc::new(RecordStore::new());
    match roster::load_records(&config).await {
        Ok(records) => {
            info!("startup: {:?} assignment records", records.len());
            store.replace(records);
        }
        Err(e) => warn!("Initial roster load failed, serving an empty roster: {}", e),
    }
    web::serve(web::AppState {
        store,
        config: Arc::new(config),
    })
    .await
}

fn local_source(input: &str, args: &Args) -> RosterResult<SourceConfig> {
    let provider = match &args.input_type {
        Some(t) => t.clone(),
        None if input.ends_with(".csv") => "csv".to_string(),
        None if input.ends_with(".xlsx") => "xlsx".to_string(),
        None => whatever!("cannot infer the input type of {:?}", input),
    };
    Ok(SourceConfig {
        provider,
        sheet_id: None,
        range_name: None,
        credential_file: None,
        file_path: Some(input.to_string()),
        worksheet_name: args.worksheet_name.clone(),
    })
}

fn outcome_to_json(outcome: &MatchOutcome) -> JSValue {
    let matches: Vec<JSValue> = outcome
        .matches
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "contact": r.contact,
                "email": r.email,
                "specialty": r.specialty,
                "block": r.block,
                "location": r.location,
                "tradeStatus": r.trade_status.to_string(),
            })
        })
        .collect();
    json!({ "matches": matches, "message": outcome.message })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> Args {
        Args {
            config: None,
            input: None,
            input_type: None,
            worksheet_name: None,
            name: None,
            block: None,
            verbose: false,
        }
    }

    #[test]
    fn local_source_infers_provider_from_extension() {
        let args = bare_args();
        assert_eq!(local_source("roster.csv", &args).unwrap().provider, "csv");
        assert_eq!(local_source("roster.xlsx", &args).unwrap().provider, "xlsx");
        assert!(local_source("roster.ods", &args).is_err());
    }

    #[test]
    fn explicit_input_type_wins() {
        let mut args = bare_args();
        args.input_type = Some("csv".to_string());
        let source = local_source("export.txt", &args).unwrap();
        assert_eq!(source.provider, "csv");
        assert_eq!(source.file_path.as_deref(), Some("export.txt"));
    }

    #[test]
    fn outcome_json_carries_the_message() {
        let outcome = MatchOutcome {
            matches: Vec::new(),
            message: Some("No rotation found for Nobody in Round 1.".to_string()),
        };
        let js = outcome_to_json(&outcome);
        assert_eq!(js["message"], "No rotation found for Nobody in Round 1.");
        assert!(js["matches"].as_array().unwrap().is_empty());
    }
}
