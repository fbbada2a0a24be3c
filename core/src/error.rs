use thiserror::Error;

/// Rejections at the sale entry boundary; shown to the user as validation
/// messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("Enter a valid quantity (got {0})")]
    InvalidQuantity(i64),
    #[error("Select a staff member")]
    MissingStaff,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Staff already exists: {0}")]
    Duplicate(String),
}

/// Reasons a persisted state document could not be used as-is.
#[derive(Error, Debug)]
pub enum StateError {
    #[error("Unsupported state version {found} (expected at most {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("Could not decode state document: {0}")]
    Decode(#[from] serde_json::Error),
}
