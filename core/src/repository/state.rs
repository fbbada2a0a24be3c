use anyhow::Result;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::StateError;
use crate::model::roster::StaffRoster;
use crate::model::state::{AppState, STATE_VERSION};
use crate::repository::traits::KeyValueStore;
use crate::service::record_store::decode_records;

pub const STATE_KEY: &str = "car-wash-state";
/// Keys used before roster and records shared one versioned document.
pub const LEGACY_STAFF_KEY: &str = "car-wash-staff";
pub const LEGACY_RECORDS_KEY: &str = "car-wash-records";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    /// Built from the legacy two-key layout and rewritten as one document.
    Migrated,
    /// Nothing stored yet.
    Defaulted,
    /// The stored document was unusable; it was backed up and defaults used.
    Recovered,
    /// The store could not be read at all. Defaults are shown, and nothing
    /// may be written back over the existing data.
    Unreadable,
}

impl LoadSource {
    pub fn allows_writes(self) -> bool {
        self != LoadSource::Unreadable
    }
}

#[derive(Debug, Clone)]
pub struct Loaded {
    pub state: AppState,
    pub source: LoadSource,
}

/// A v1 document after per-field decoding. `lossy` is set when some stored
/// value had to be dropped or replaced.
struct Decoded {
    state: AppState,
    lossy: bool,
}

/// Load/migrate/save lifecycle for [`AppState`] on top of a key-value store.
pub struct StateRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails. A document that parses but has bad fields keeps what is
    /// usable; a document that cannot be used at all is copied to a backup
    /// key first. If the store itself cannot be read the session is marked
    /// [`LoadSource::Unreadable`].
    pub fn load(&self) -> Loaded {
        let raw = match self.store.get(STATE_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "could not read stored state; changes will not be saved");
                return Self::unreadable();
            }
        };

        if let Some(text) = raw {
            return match decode_document(&text) {
                Ok(Decoded { state, lossy }) => {
                    if lossy {
                        warn!("stored state had unusable entries; kept the rest");
                        self.backup(&text);
                    }
                    debug!(
                        staff = state.roster.len(),
                        records = state.records.len(),
                        "loaded stored state"
                    );
                    Loaded { state, source: LoadSource::Stored }
                }
                Err(e) => {
                    warn!(error = %e, "stored state is unusable; starting from defaults");
                    self.backup(&text);
                    Loaded { state: AppState::default(), source: LoadSource::Recovered }
                }
            };
        }

        let (staff, records) = match (self.read_key(LEGACY_STAFF_KEY), self.read_key(LEGACY_RECORDS_KEY)) {
            (Ok(staff), Ok(records)) => (staff, records),
            _ => return Self::unreadable(),
        };
        if staff.is_none() && records.is_none() {
            return Loaded { state: AppState::default(), source: LoadSource::Defaulted };
        }

        let state = legacy_state(staff.as_deref(), records.as_deref());
        info!(
            staff = state.roster.len(),
            records = state.records.len(),
            "migrating legacy storage"
        );
        self.finish_migration(&state);
        Loaded { state, source: LoadSource::Migrated }
    }

    pub fn save(&self, state: &AppState) -> Result<()> {
        let text = serde_json::to_string_pretty(state)?;
        self.store.set(STATE_KEY, &text)
    }

    fn unreadable() -> Loaded {
        Loaded { state: AppState::default(), source: LoadSource::Unreadable }
    }

    fn backup(&self, text: &str) {
        let key = format!("{}.corrupt-{}", STATE_KEY, Utc::now().format("%Y%m%dT%H%M%S"));
        match self.store.set(&key, text) {
            Ok(()) => warn!(key = %key, "kept unreadable state under backup key"),
            Err(e) => warn!(error = %e, "could not back up unreadable state"),
        }
    }

    fn finish_migration(&self, state: &AppState) {
        if let Err(e) = self.save(state) {
            // Leave the legacy keys alone so the next start can try again.
            warn!(error = %e, "could not save migrated state");
            return;
        }
        for key in [LEGACY_STAFF_KEY, LEGACY_RECORDS_KEY] {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "could not remove legacy key");
            }
        }
    }

    fn read_key(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key).inspect_err(|e| {
            warn!(key, error = %e, "could not read stored value; changes will not be saved");
        })
    }
}

/// Decodes a versioned state document. Only text that is not JSON, or a
/// version other than the current one, is an error; bad fields fall back
/// one by one (roster to the built-in list, records to those that decode).
pub fn decode_state(text: &str) -> Result<AppState, StateError> {
    decode_document(text).map(|decoded| decoded.state)
}

fn decode_document(text: &str) -> Result<Decoded, StateError> {
    let value: Value = serde_json::from_str(text)?;
    let version = value
        .get("version")
        .and_then(Value::as_u64)
        .unwrap_or(0);
    if version != u64::from(STATE_VERSION) {
        return Err(StateError::UnsupportedVersion {
            found: u32::try_from(version).unwrap_or(u32::MAX),
            supported: STATE_VERSION,
        });
    }

    let roster_value = value.get("roster").unwrap_or(&Value::Null);
    let records_value = value.get("records").unwrap_or(&Value::Null);
    let roster = decode_roster(roster_value);
    let records = decode_records(records_value);

    let roster_lossy = match roster_value {
        Value::Null => false,
        Value::Array(items) => !items.iter().all(Value::is_string),
        _ => true,
    };
    let records_lossy = match records_value {
        Value::Null => false,
        Value::Array(items) => items.len() != records.len(),
        _ => true,
    };

    Ok(Decoded {
        state: AppState::new(roster, records),
        lossy: roster_lossy || records_lossy,
    })
}

fn legacy_state(staff: Option<&str>, records: Option<&str>) -> AppState {
    let roster = staff
        .map(|text| decode_roster(&parse_or_null(text)))
        .unwrap_or_default();
    let records = records
        .map(|text| decode_records(&parse_or_null(text)))
        .unwrap_or_default();
    AppState::new(roster, records)
}

/// A roster is an array of names; anything else, or an empty array, means
/// the built-in roster. Non-string entries are skipped.
fn decode_roster(value: &Value) -> StaffRoster {
    let names: Vec<String> = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if names.is_empty() {
        StaffRoster::default()
    } else {
        StaffRoster::from_names(names)
    }
}

fn parse_or_null(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        warn!(error = %e, "stored value is not valid JSON");
        Value::Null
    })
}
