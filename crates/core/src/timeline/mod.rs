pub mod domain;
pub mod infrastructure;
pub mod segment_ledger;
pub mod snapshot;
