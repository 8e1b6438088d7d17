pub mod builder;
mod config;
pub mod quick_start;
mod store;

use log::{debug, info};

use std::collections::{BTreeSet, HashMap};

pub use crate::config::*;
pub use crate::store::RecordStore;

/// One spreadsheet row, keyed by column name. Columns absent from the row
/// read as empty strings.
pub type RosterRow = HashMap<String, String>;

/// Flattens a headered roster table into assignment records.
///
/// Cell values are matched to columns by position against the table's
/// header row. Ragged rows are padded with empty strings; cells beyond the
/// last header are dropped.
pub fn normalize_table(table: &RosterTable, rules: &RosterRules) -> Vec<AssignmentRecord> {
    let rows: Vec<RosterRow> = table
        .rows
        .iter()
        .map(|cells| {
            table
                .headers
                .iter()
                .enumerate()
                .map(|(idx, h)| (h.clone(), cells.get(idx).cloned().unwrap_or_default()))
                .collect()
        })
        .collect();
    normalize_rows(&rows, rules)
}

/// Flattens roster rows into assignment records, one record per round the
/// student participates in.
///
/// Arguments:
/// * `rows` the roster rows, one per student, in spreadsheet order
/// * `rules` the schedule shape and identity column names
///
/// A round or the selective emits a record only when both its specialty and
/// its location are non-empty after trimming. Missing columns read as empty
/// strings, so sparse or malformed rows degrade to fewer records rather
/// than failing the load. Output order is input row order, with rounds
/// `1..=n` before the selective within each row.
pub fn normalize_rows(rows: &[RosterRow], rules: &RosterRules) -> Vec<AssignmentRecord> {
    info!(
        "normalize_rows: processing {:?} rows with {:?} rounds",
        rows.len(),
        rules.rounds
    );
    let mut res: Vec<AssignmentRecord> = Vec::new();
    for (idx, row) in rows.iter().enumerate() {
        let name = field(row, &rules.name_column);
        let phone = field(row, &rules.phone_column);
        let email = field(row, &rules.email_column);
        let contact = if phone.is_empty() { email.clone() } else { phone };

        let mut emitted = 0usize;
        for i in 1..=rules.rounds {
            let specialty = field(row, &format!("Round {} Specialty", i));
            let location = field(row, &format!("Round {} Location", i));
            if specialty.is_empty() || location.is_empty() {
                continue;
            }
            res.push(AssignmentRecord {
                name: name.clone(),
                contact: contact.clone(),
                email: email.clone(),
                specialty,
                block: format!("Round {}", i),
                location,
                trade_status: TradeStatus::Open,
            });
            emitted += 1;
        }

        let specialty = field(row, "Selective Specialty");
        let location = field(row, "Selective Location");
        if !specialty.is_empty() && !location.is_empty() {
            res.push(AssignmentRecord {
                name: name.clone(),
                contact,
                email,
                specialty,
                block: SELECTIVE_BLOCK.to_string(),
                location,
                trade_status: TradeStatus::Open,
            });
            emitted += 1;
        }
        debug!(
            "normalize_rows: row {:?} ({:?}): {:?} records",
            idx, name, emitted
        );
    }
    info!("normalize_rows: {:?} assignment records", res.len());
    res
}

fn field(row: &RosterRow, column: &str) -> String {
    row.get(column)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Finds the peers of a student for one block.
///
/// Arguments:
/// * `records` the full record list, in load order
/// * `name` the querying student's name, matched by case-insensitive
///   equality after trimming
/// * `block` the queried block label, matched exactly
///
/// The student's own records for the block determine the specialty to match
/// against; when several of them disagree, the first in list order wins.
/// The result contains every record sharing that block and specialty except
/// the querying student's own, in list order. Finding no rotation for the
/// student is a normal outcome reported through the message field.
pub fn find_matches(records: &[AssignmentRecord], name: &str, block: &str) -> MatchOutcome {
    let wanted = name.trim().to_lowercase();
    let specialty = match records
        .iter()
        .find(|r| r.block == block && r.name.to_lowercase() == wanted)
    {
        Some(own) => own.specialty.clone(),
        None => {
            debug!(
                "find_matches: no self record for {:?} in {:?}",
                wanted, block
            );
            return MatchOutcome {
                matches: Vec::new(),
                message: Some(format!(
                    "No rotation found for {} in {}.",
                    name.trim(),
                    block
                )),
            };
        }
    };

    let matches: Vec<AssignmentRecord> = records
        .iter()
        .filter(|r| {
            r.block == block && r.specialty == specialty && r.name.to_lowercase() != wanted
        })
        .cloned()
        .collect();
    info!(
        "find_matches: {:?} peers share {:?} in {:?}",
        matches.len(),
        specialty,
        block
    );
    MatchOutcome {
        matches,
        message: None,
    }
}

/// The distinct block labels present in the record list, sorted.
///
/// Lexicographic order yields `Round 1`..`Round 9` then `Selective`; this
/// holds only while round numbers stay single-digit.
pub fn distinct_blocks(records: &[AssignmentRecord]) -> Vec<String> {
    let blocks: BTreeSet<String> = records.iter().map(|r| r.block.clone()).collect();
    blocks.into_iter().collect()
}
