use log::info;

use rotation_match::*;
use snafu::{prelude::*, Snafu};

use crate::roster::config_reader::*;

pub mod io_csv;
pub mod io_sheets;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum RosterError {
    #[snafu(display("Error opening file {path}"))]
    OpeningWorkbook {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV row"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("No rows found in the roster range"))]
    EmptyRoster {},
    #[snafu(display("Error opening config"))]
    OpeningConfig { source: std::io::Error },
    #[snafu(display("Error parsing config"))]
    ParsingConfig { source: serde_json::Error },
    #[snafu(display("Error calling the spreadsheet service"))]
    Fetch { source: reqwest::Error },
    #[snafu(display("Spreadsheet service returned status {status}"))]
    FetchStatus { status: u16 },
    #[snafu(display("No spreadsheet credential configured"))]
    MissingCredential {},
    #[snafu(display("Error reading credential file {path}"))]
    ReadingCredential {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type RosterResult<T> = Result<T, RosterError>;

pub mod config_reader {
    use crate::roster::*;
    use log::info;
    use rotation_match::RosterRules;
    use serde::{Deserialize, Serialize};
    use snafu::prelude::*;
    use std::fs;

    /// One place to read the roster from. `google_sheets` sources name a
    /// sheet and range; `xlsx` and `csv` sources name a local file.
    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct SourceConfig {
        pub provider: String,
        #[serde(rename = "sheetId")]
        pub sheet_id: Option<String>,
        #[serde(rename = "rangeName")]
        pub range_name: Option<String>,
        #[serde(rename = "credentialFile")]
        pub credential_file: Option<String>,
        #[serde(rename = "filePath")]
        pub file_path: Option<String>,
        #[serde(rename = "worksheetName")]
        pub worksheet_name: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct RulesConfig {
        pub rounds: Option<u32>,
        #[serde(rename = "nameColumn")]
        pub name_column: Option<String>,
        #[serde(rename = "phoneColumn")]
        pub phone_column: Option<String>,
        #[serde(rename = "emailColumn")]
        pub email_column: Option<String>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
    pub struct ServerConfig {
        pub host: Option<String>,
        pub port: Option<u16>,
    }

    #[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
    pub struct AppConfig {
        #[serde(rename = "rosterSources", default)]
        pub roster_sources: Vec<SourceConfig>,
        pub rules: Option<RulesConfig>,
        pub server: Option<ServerConfig>,
    }

    pub fn read_config(path: &str) -> RosterResult<AppConfig> {
        let contents = fs::read_to_string(path).context(OpeningConfigSnafu {})?;
        let config: AppConfig =
            serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu {})?;
        info!("read_config: {:?}", config);
        Ok(config)
    }

    /// Materializes the normalization rules, falling back to the upstream
    /// form-export defaults for anything the config leaves out.
    pub fn resolve_rules(rules: &Option<RulesConfig>) -> RosterRules {
        let defaults = RosterRules::default();
        match rules {
            None => defaults,
            Some(r) => RosterRules {
                rounds: r.rounds.unwrap_or(defaults.rounds),
                name_column: r.name_column.clone().unwrap_or(defaults.name_column),
                phone_column: r.phone_column.clone().unwrap_or(defaults.phone_column),
                email_column: r.email_column.clone().unwrap_or(defaults.email_column),
            },
        }
    }
}

/// Reads one roster source into a headered table.
pub async fn load_table(source: &SourceConfig) -> RosterResult<RosterTable> {
    match source.provider.as_str() {
        "google_sheets" => io_sheets::fetch_range(source).await,
        "xlsx" => io_xlsx::read_workbook(source),
        "csv" => io_csv::read_file(source),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

/// Loads every configured source and flattens the result into assignment
/// records, in source order. Any source failure aborts the whole load.
pub async fn load_records(config: &AppConfig) -> RosterResult<Vec<AssignmentRecord>> {
    if config.roster_sources.is_empty() {
        whatever!("no roster sources configured");
    }
    let rules = resolve_rules(&config.rules);
    let mut records: Vec<AssignmentRecord> = Vec::new();
    for source in config.roster_sources.iter() {
        info!("Attempting to read roster source {:?}", source.provider);
        let table = load_table(source).await?;
        let mut source_records = normalize_table(&table, &rules);
        records.append(&mut source_records);
    }
    info!("load_records: {:?} assignment records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::config_reader::*;
    use super::*;

    #[test]
    fn config_parses_with_defaults() {
        let raw = r#"{
            "rosterSources": [
                {"provider": "google_sheets",
                 "sheetId": "1VwjJy0_9NdFHPIPLd9GA6mr0OUiMq_IxaRFyEQD7C1Q",
                 "rangeName": "Unformatted"}
            ],
            "rules": {"rounds": 6}
        }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(config.roster_sources.len(), 1);
        assert_eq!(
            config.roster_sources[0].range_name.as_deref(),
            Some("Unformatted")
        );
        let rules = resolve_rules(&config.rules);
        assert_eq!(rules.rounds, 6);
        assert_eq!(rules.name_column, "Name");
    }

    #[test]
    fn empty_config_resolves_to_default_rules() {
        let config = AppConfig::default();
        let rules = resolve_rules(&config.rules);
        assert_eq!(rules, rotation_match::RosterRules::default());
    }

    #[tokio::test]
    async fn unknown_provider_is_rejected() {
        let source = SourceConfig {
            provider: "dominion".to_string(),
            sheet_id: None,
            range_name: None,
            credential_file: None,
            file_path: None,
            worksheet_name: None,
        };
        let res = load_table(&source).await;
        assert!(matches!(res, Err(RosterError::Whatever { .. })));
    }

    #[tokio::test]
    async fn load_without_sources_is_rejected() {
        let res = load_records(&AppConfig::default()).await;
        assert!(matches!(res, Err(RosterError::Whatever { .. })));
    }
}
