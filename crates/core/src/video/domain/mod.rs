pub mod video_identifier;
