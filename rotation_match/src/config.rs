// ********* Input data structures ***********

use std::fmt::Display;

/// The block label used for the selective slot.
pub const SELECTIVE_BLOCK: &str = "Selective";

/// Whether an assignment is eligible for a rotation swap.
///
/// Only one state exists today. The field is carried on every record so
/// that a trading workflow can be added without reshaping the data.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum TradeStatus {
    /// Eligible for a swap.
    Open,
    // TODO: Pending and Closed, once requests between students are recorded.
}

impl Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeStatus::Open => write!(f, "open"),
        }
    }
}

/// A headered table of cells, as produced by any of the roster providers.
///
/// Rows may be ragged: a missing cell reads as the empty string. The header
/// row is not repeated in `rows`.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RosterTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

// ******** Output data structures *********

/// One student's specialty/location pairing for one round or the selective
/// slot. The unit of matching: a student with entries in six rounds
/// contributes six records.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct AssignmentRecord {
    pub name: String,
    /// Phone number if one was given, else the email address.
    pub contact: String,
    pub email: String,
    pub specialty: String,
    /// `"Round 1"`..`"Round {n}"` or `"Selective"`.
    pub block: String,
    pub location: String,
    pub trade_status: TradeStatus,
}

/// The outcome of a match lookup.
///
/// A lookup that finds no rotation for the queried student is a normal
/// outcome, reported through `message`, not an error.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MatchOutcome {
    pub matches: Vec<AssignmentRecord>,
    pub message: Option<String>,
}

/// Errors from assembling a roster by hand through the builder.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RosterBuildError {
    /// An assignment was added before any student.
    NoCurrentStudent,
    /// A block label outside `Round 1..Round {n}` and `Selective`.
    UnknownBlock(String),
}

impl std::error::Error for RosterBuildError {}

impl Display for RosterBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterBuildError::NoCurrentStudent => {
                write!(f, "an assignment requires a student first")
            }
            RosterBuildError::UnknownBlock(b) => write!(f, "unknown block label {:?}", b),
        }
    }
}

// ********* Configuration **********

/// Controls how a roster table is flattened into assignment records.
///
/// The round/selective column names follow the fixed form-export schema
/// (`Round {i} Specialty`, `Round {i} Location`, `Selective Specialty`,
/// `Selective Location`); only the identity columns and the number of
/// rounds vary between deployments.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RosterRules {
    /// The number of numbered rounds in the schedule.
    pub rounds: u32,
    pub name_column: String,
    pub phone_column: String,
    pub email_column: String,
}

impl Default for RosterRules {
    fn default() -> RosterRules {
        RosterRules {
            rounds: 9,
            name_column: "Name".to_string(),
            phone_column: "(optional) Phone Number".to_string(),
            email_column: "Email Address".to_string(),
        }
    }
}
