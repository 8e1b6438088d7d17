//! Roster reading from a local Excel workbook (the downloaded form export).

use log::debug;
use snafu::prelude::*;

use calamine::{open_workbook, DataType, Reader, Xlsx};

use rotation_match::RosterTable;

use crate::roster::{config_reader::SourceConfig, *};

pub fn read_workbook(source: &SourceConfig) -> RosterResult<RosterTable> {
    let path = match &source.file_path {
        Some(p) => p.clone(),
        None => whatever!("xlsx source requires filePath"),
    };
    let mut workbook: Xlsx<_> =
        open_workbook(&path).context(OpeningWorkbookSnafu { path: path.clone() })?;

    // A worksheet name was provided, use it. Otherwise take the first sheet.
    let wrange = match &source.worksheet_name {
        Some(worksheet_name) => workbook
            .worksheet_range(worksheet_name)
            .context(EmptyRosterSnafu {})?
            .context(OpeningWorkbookSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyRosterSnafu {})?
            .context(OpeningWorkbookSnafu { path })?,
    };

    let mut iter = wrange.rows();
    let header = iter.next().context(EmptyRosterSnafu {})?;
    let headers = row_to_strings(header)?;
    debug!("read_workbook: header: {:?}", headers);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for row in iter {
        rows.push(row_to_strings(row)?);
    }
    Ok(RosterTable { headers, rows })
}

fn row_to_strings(row: &[DataType]) -> RosterResult<Vec<String>> {
    let mut res: Vec<String> = Vec::new();
    for cell in row {
        res.push(cell_to_string(cell)?);
    }
    Ok(res)
}

fn cell_to_string(cell: &DataType) -> RosterResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        // Phone numbers typed without punctuation come back as floats.
        DataType::Float(f) if f.fract() == 0.0 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        _ => whatever!("read_workbook: could not understand cell {:?}", cell),
    }
}
