pub mod dictation;
pub mod playback;
pub mod selection;
pub mod session;
pub mod shared;
pub mod timeline;
pub mod video;
