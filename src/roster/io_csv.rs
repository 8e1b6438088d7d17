//! Roster reading from a local CSV export.

use log::debug;
use snafu::prelude::*;

use csv::Reader;

use rotation_match::RosterTable;

use crate::roster::{config_reader::SourceConfig, *};

pub fn read_file(source: &SourceConfig) -> RosterResult<RosterTable> {
    let path = match &source.file_path {
        Some(p) => p.clone(),
        None => whatever!("csv source requires filePath"),
    };
    let mut reader = Reader::from_path(&path).context(OpeningCsvSnafu { path: path.clone() })?;

    let headers: Vec<String> = reader
        .headers()
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| s.to_string())
        .collect();
    if headers.is_empty() {
        return EmptyRosterSnafu {}.fail();
    }
    debug!("read_file: header: {:?}", headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for (idx, line_r) in reader.records().enumerate() {
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_file: line {:?}: {:?}", idx, line);
        rows.push(line.iter().map(|s| s.to_string()).collect());
    }
    Ok(RosterTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn csv_source(path: &std::path::Path) -> SourceConfig {
        SourceConfig {
            provider: "csv".to_string(),
            sheet_id: None,
            range_name: None,
            credential_file: None,
            file_path: Some(path.display().to_string()),
            worksheet_name: None,
        }
    }

    #[test]
    fn reads_headers_and_rows() {
        let path = std::env::temp_dir().join("rotamatch_io_csv_test.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Name,Email Address,Round 1 Specialty,Round 1 Location").unwrap();
        writeln!(f, "Alice Lee,alice@example.edu,Surgery,City Hospital").unwrap();
        writeln!(f, "Bob Tan,bob@example.edu,Surgery,County Hospital").unwrap();
        drop(f);

        let table = read_file(&csv_source(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.headers[0], "Name");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][3], "County Hospital");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let source = csv_source(std::path::Path::new("/nonexistent/roster.csv"));
        assert!(matches!(
            read_file(&source),
            Err(RosterError::OpeningCsv { .. })
        ));
    }
}
