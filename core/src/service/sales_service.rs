use tracing::{debug, warn};

use crate::error::{EntryError, RosterError};
use crate::model::record::{NewSale, SalesRecord};
use crate::model::roster::{AddStaff, StaffRoster};
use crate::model::state::AppState;
use crate::model::summary::{DayTotals, ServiceSummary, StaffSummary};
use crate::repository::state::{LoadSource, StateRepository};
use crate::repository::KeyValueStore;
use crate::service::{aggregator, export, record_store};

/// Owns the in-memory ledger and writes it back after every change.
///
/// Persistence is best-effort: a failed write is logged and the in-memory
/// state stays authoritative for the session. When the store could not be
/// read at open, nothing is written for the rest of the session.
pub struct SalesService<S: KeyValueStore> {
    repo: StateRepository<S>,
    state: AppState,
    load_source: LoadSource,
}

impl<S: KeyValueStore> SalesService<S> {
    pub fn open(store: S) -> Self {
        let repo = StateRepository::new(store);
        let loaded = repo.load();
        Self {
            repo,
            state: loaded.state,
            load_source: loaded.source,
        }
    }

    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn roster(&self) -> &StaffRoster {
        &self.state.roster
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.state.records
    }

    pub fn records_for<'a>(&'a self, date: &'a str) -> Vec<&'a SalesRecord> {
        record_store::for_date(&self.state.records, date).collect()
    }

    /// Validates and books a sale, merging it into an existing record for the
    /// same slot. Returns the stored record after the merge.
    pub fn record_sale(&mut self, sale: &NewSale) -> Result<SalesRecord, EntryError> {
        let staff_name = sale.staff_name.trim();
        if staff_name.is_empty() {
            return Err(EntryError::MissingStaff);
        }
        if sale.quantity <= 0 {
            return Err(EntryError::InvalidQuantity(sale.quantity));
        }

        let entry = SalesRecord::new(
            &sale.date,
            staff_name,
            sale.service_type.as_str(),
            sale.effective_size().as_str(),
            sale.quantity.unsigned_abs(),
        );
        self.state.records = record_store::upsert(&self.state.records, &entry);
        self.persist();

        let stored = self
            .state
            .records
            .iter()
            .find(|r| r.same_slot(&entry))
            .cloned()
            .unwrap_or(entry);
        Ok(stored)
    }

    pub fn add_staff(&mut self, name: &str) -> Result<AddStaff, RosterError> {
        let outcome = self.state.roster.add(name)?;
        if outcome == AddStaff::Added {
            self.persist();
        }
        Ok(outcome)
    }

    /// Removes a staff member together with all of their records. Returns the
    /// number of records dropped.
    pub fn remove_staff(&mut self, name: &str) -> usize {
        let was_listed = self.state.roster.contains(name);
        let removed = self.state.remove_staff_cascade(name);
        if was_listed || removed > 0 {
            debug!(staff = name, records = removed, "removed staff member");
            self.persist();
        }
        removed
    }

    pub fn clear_records(&mut self) -> usize {
        let removed = self.state.records.len();
        self.state.records = record_store::clear();
        self.persist();
        removed
    }

    pub fn staff_summary(&self, date: &str) -> Vec<StaffSummary> {
        aggregator::staff_summary(&self.state.records, &self.state.roster, date)
    }

    pub fn service_summary(&self, date: &str) -> Vec<ServiceSummary> {
        aggregator::service_summary(&self.state.records, &self.state.roster, date)
    }

    pub fn day_totals(&self, date: &str) -> DayTotals {
        aggregator::day_totals(&self.staff_summary(date))
    }

    pub fn export_csv(&self) -> String {
        export::to_csv(&self.state.records)
    }

    fn persist(&self) {
        if !self.load_source.allows_writes() {
            warn!("stored data could not be read at startup; not saving over it");
            return;
        }
        if let Err(e) = self.repo.save(&self.state) {
            warn!(error = %e, "could not save state; keeping changes in memory");
        }
    }
}
