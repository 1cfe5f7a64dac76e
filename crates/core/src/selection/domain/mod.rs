pub mod pointer_capture;
pub mod selection;
pub mod timeline_geometry;
