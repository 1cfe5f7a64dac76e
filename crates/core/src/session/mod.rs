pub mod session_error;
pub mod session_event;
pub mod timeline_session;
