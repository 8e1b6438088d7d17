//! Roster fetch from the Google Sheets `values.get` endpoint.

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use rotation_match::RosterTable;

use crate::roster::{config_reader::SourceConfig, *};

const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Environment variable holding the bearer credential when the source does
/// not name a credential file.
pub const TOKEN_ENV_VAR: &str = "SHEETS_API_TOKEN";

/// The wire shape of a `values.get` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueRange {
    pub range: Option<String>,
    #[serde(rename = "majorDimension")]
    pub major_dimension: Option<String>,
    pub values: Option<Vec<Vec<JSValue>>>,
}

pub async fn fetch_range(source: &SourceConfig) -> RosterResult<RosterTable> {
    let sheet_id = match &source.sheet_id {
        Some(id) => id.clone(),
        None => whatever!("google_sheets source requires sheetId"),
    };
    let range_name = match &source.range_name {
        Some(r) => r.clone(),
        None => whatever!("google_sheets source requires rangeName"),
    };
    let token = read_credential(source)?;

    let url = format!("{}/{}/values/{}", SHEETS_ENDPOINT, sheet_id, range_name);
    info!("fetch_range: GET {:?}", url);
    let client = reqwest::Client::new();
    let resp = client
        .get(&url)
        .bearer_auth(token)
        .send()
        .await
        .context(FetchSnafu {})?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        debug!("fetch_range: error body: {:?}", body);
        return FetchStatusSnafu {
            status: status.as_u16(),
        }
        .fail();
    }
    let value_range: ValueRange = resp.json().await.context(FetchSnafu {})?;
    debug!(
        "fetch_range: range: {:?} dimension: {:?}",
        value_range.range, value_range.major_dimension
    );
    table_from_values(value_range)
}

/// Splits the returned cell grid into a header row plus data rows. An
/// absent or empty `values` array is the empty-range failure.
pub fn table_from_values(value_range: ValueRange) -> RosterResult<RosterTable> {
    let mut values = match value_range.values {
        Some(v) if !v.is_empty() => v,
        _ => return EmptyRosterSnafu {}.fail(),
    };
    let headers: Vec<String> = values.remove(0).iter().map(cell_to_string).collect();
    debug!("table_from_values: header: {:?}", headers);
    let rows: Vec<Vec<String>> = values
        .iter()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(RosterTable { headers, rows })
}

fn read_credential(source: &SourceConfig) -> RosterResult<String> {
    if let Some(path) = &source.credential_file {
        let token =
            std::fs::read_to_string(path).context(ReadingCredentialSnafu { path: path.clone() })?;
        return Ok(token.trim().to_string());
    }
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => MissingCredentialSnafu {}.fail(),
    }
}

// Formatted ranges serve every cell as a JSON string; unformatted ranges
// leave numbers and bools unquoted.
fn cell_to_string(cell: &JSValue) -> String {
    match cell {
        JSValue::String(s) => s.clone(),
        JSValue::Number(n) => n.to_string(),
        JSValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_values_payload() {
        let raw = r#"{
            "range": "Unformatted!A1:E3",
            "majorDimension": "ROWS",
            "values": [
                ["Name", "Email Address", "Round 1 Specialty", "Round 1 Location", "Cohort"],
                ["Alice Lee", "alice@example.edu", "Surgery", "City Hospital", 2027],
                ["Bob Tan", "bob@example.edu", "Surgery", "County Hospital", true]
            ]
        }"#;
        let value_range: ValueRange = serde_json::from_str(raw).unwrap();
        let table = table_from_values(value_range).unwrap();
        assert_eq!(table.headers.len(), 5);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "Alice Lee");
        assert_eq!(table.rows[0][4], "2027");
        assert_eq!(table.rows[1][4], "true");
    }

    #[test]
    fn empty_range_is_an_error() {
        let value_range: ValueRange =
            serde_json::from_str(r#"{"range": "Unformatted!A1:Z1000"}"#).unwrap();
        assert!(matches!(
            table_from_values(value_range),
            Err(RosterError::EmptyRoster {})
        ));

        let value_range: ValueRange = serde_json::from_str(r#"{"values": []}"#).unwrap();
        assert!(matches!(
            table_from_values(value_range),
            Err(RosterError::EmptyRoster {})
        ));
    }

    #[test]
    fn header_only_range_has_no_rows() {
        let value_range: ValueRange =
            serde_json::from_str(r#"{"values": [["Name", "Email Address"]]}"#).unwrap();
        let table = table_from_values(value_range).unwrap();
        assert_eq!(table.headers, vec!["Name", "Email Address"]);
        assert!(table.rows.is_empty());
    }
}
