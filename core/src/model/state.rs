use serde::{Deserialize, Serialize};
use crate::model::record::SalesRecord;
use crate::model::roster::StaffRoster;
use crate::service::record_store;

pub const STATE_VERSION: u32 = 1;

/// Everything the ledger persists, stored as one versioned document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppState {
    pub version: u32,
    pub roster: StaffRoster,
    pub records: Vec<SalesRecord>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            roster: StaffRoster::default(),
            records: Vec::new(),
        }
    }
}

impl AppState {
    pub fn new(roster: StaffRoster, records: Vec<SalesRecord>) -> Self {
        Self {
            version: STATE_VERSION,
            roster,
            records,
        }
    }

    /// Drops a staff member and every record booked under their name.
    /// Returns how many records were removed.
    pub fn remove_staff_cascade(&mut self, name: &str) -> usize {
        self.roster.remove(name);
        let before = self.records.len();
        self.records = record_store::remove_by_staff(&self.records, name);
        before - self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_staff_cascade() {
        let mut state = AppState::new(
            StaffRoster::from_names(["A", "B"]),
            vec![
                SalesRecord::new("2024-01-01", "A", "whole", "small", 2),
                SalesRecord::new("2024-01-01", "B", "inside", "any", 1),
                SalesRecord::new("2024-01-02", "A", "spray", "any", 3),
            ],
        );

        assert_eq!(state.remove_staff_cascade("A"), 2);
        assert_eq!(state.roster.names(), &["B".to_string()]);
        assert_eq!(state.records.len(), 1);
        assert_eq!(state.records[0].staff_name, "B");
    }

    #[test]
    fn test_remove_staff_cascade_orphaned_records() {
        // Records may exist for a name that is no longer on the roster.
        let mut state = AppState::new(
            StaffRoster::from_names(["B"]),
            vec![SalesRecord::new("2024-01-01", "Ghost", "whole", "small", 1)],
        );
        assert_eq!(state.remove_staff_cascade("Ghost"), 1);
        assert!(state.records.is_empty());
        assert_eq!(state.roster.len(), 1);
    }
}
