pub mod domain;
pub mod marker_drag;
pub mod range_selector;
