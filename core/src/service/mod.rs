pub mod aggregator;
pub mod export;
pub mod record_store;
pub mod sales_service;
