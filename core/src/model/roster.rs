use serde::{Deserialize, Serialize};
use crate::error::RosterError;

pub const DEFAULT_STAFF: [&str; 6] = ["Suliaman", "Haluna", "Jamil", "Abdula", "Yusuf", "Mudesero"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddStaff {
    Added,
    /// The trimmed name was empty; nothing changed.
    Ignored,
}

/// Ordered, duplicate-free list of staff names.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct StaffRoster {
    names: Vec<String>,
}

impl Default for StaffRoster {
    fn default() -> Self {
        Self {
            names: DEFAULT_STAFF.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StaffRoster {
    pub fn empty() -> Self {
        Self { names: Vec::new() }
    }

    /// Builds a roster from stored names as-is; existing entries are not
    /// re-normalized, only exact repeats are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::empty();
        for name in names {
            let name = name.into();
            if !roster.contains(&name) {
                roster.names.push(name);
            }
        }
        roster
    }

    pub fn add(&mut self, name: &str) -> Result<AddStaff, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(AddStaff::Ignored);
        }
        if self.contains(name) {
            return Err(RosterError::Duplicate(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(AddStaff::Added)
    }

    /// Removes the exact-match entry. Records are not touched here; use
    /// `AppState::remove_staff_cascade` to keep both collections in step.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
