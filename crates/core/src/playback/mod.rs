pub mod domain;
pub mod infrastructure;
pub mod playback_adapter;
pub mod playback_state;
