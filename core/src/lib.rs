pub mod error;
pub mod i18n;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::{EntryError, RosterError, StateError};
pub use i18n::{Lang, Labels};
pub use input::{expand_key, parse_args, parse_sale, ParsedInput};
pub use model::pricing::{PriceEntry, ServiceType, Size};
pub use model::record::{NewSale, SalesRecord};
pub use model::roster::{AddStaff, StaffRoster};
pub use model::state::AppState;
pub use model::summary::{DayTotals, ServiceKey, ServiceSummary, StaffSummary};
pub use repository::{FileStore, KeyValueStore, LoadSource, MemoryStore, StateRepository};
pub use service::sales_service::SalesService;
pub use time::{format_day, parse_day, today};
