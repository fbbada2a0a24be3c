pub mod pricing;
pub mod record;
pub mod roster;
pub mod state;
pub mod summary;
