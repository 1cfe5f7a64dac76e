pub mod dictation_adapter;
pub mod domain;
pub mod infrastructure;
