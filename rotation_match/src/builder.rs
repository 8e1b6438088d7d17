pub use crate::config::*;
use crate::{normalize_rows, RosterRow};

/// A builder for assembling a roster without a spreadsheet.
///
/// Useful for tests and for embedding the matcher in another program.
///
/// ```
/// pub use rotation_match::builder::Builder;
/// pub use rotation_match::RosterRules;
/// # use rotation_match::RosterBuildError;
///
/// let builder = Builder::new(&RosterRules::default())
///     .student("Anna", "", "anna@example.edu")
///     .assign("Round 1", "Surgery", "City Hospital")?
///     .assign("Selective", "Radiology", "Imaging Center")?;
///
/// let records = builder.records();
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].contact, "anna@example.edu");
///
/// # Ok::<(), RosterBuildError>(())
/// ```
pub struct Builder {
    pub(crate) _rules: RosterRules,
    pub(crate) _rows: Vec<RosterRow>,
}

impl Builder {
    pub fn new(rules: &RosterRules) -> Builder {
        Builder {
            _rules: rules.clone(),
            _rows: Vec::new(),
        }
    }

    /// Starts a new roster row for a student. Later `assign` calls fill
    /// this row until the next `student` call.
    pub fn student(mut self, name: &str, phone: &str, email: &str) -> Builder {
        let mut row = RosterRow::new();
        row.insert(self._rules.name_column.clone(), name.to_string());
        row.insert(self._rules.phone_column.clone(), phone.to_string());
        row.insert(self._rules.email_column.clone(), email.to_string());
        self._rows.push(row);
        self
    }

    /// Records one specialty/location pairing for the current student.
    ///
    /// `block` is either `"Round {i}"` with `i` within the configured
    /// round count, or `"Selective"`.
    pub fn assign(
        mut self,
        block: &str,
        specialty: &str,
        location: &str,
    ) -> Result<Builder, RosterBuildError> {
        let (specialty_column, location_column) = if block == SELECTIVE_BLOCK {
            (
                "Selective Specialty".to_string(),
                "Selective Location".to_string(),
            )
        } else {
            match block
                .strip_prefix("Round ")
                .and_then(|n| n.parse::<u32>().ok())
            {
                Some(i) if i >= 1 && i <= self._rules.rounds => (
                    format!("Round {} Specialty", i),
                    format!("Round {} Location", i),
                ),
                _ => return Err(RosterBuildError::UnknownBlock(block.to_string())),
            }
        };
        let row = self
            ._rows
            .last_mut()
            .ok_or(RosterBuildError::NoCurrentStudent)?;
        row.insert(specialty_column, specialty.to_string());
        row.insert(location_column, location.to_string());
        Ok(self)
    }

    /// Flattens the assembled rows into assignment records.
    pub fn records(&self) -> Vec<AssignmentRecord> {
        normalize_rows(&self._rows, &self._rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_without_student_is_rejected() {
        let res = Builder::new(&RosterRules::default()).assign("Round 1", "Surgery", "Site");
        assert!(matches!(res, Err(RosterBuildError::NoCurrentStudent)));
    }

    #[test]
    fn out_of_schedule_block_is_rejected() {
        let res = Builder::new(&RosterRules::default())
            .student("Anna", "", "anna@example.edu")
            .assign("Round 10", "Surgery", "Site");
        assert!(matches!(res, Err(RosterBuildError::UnknownBlock(_))));
    }
}
