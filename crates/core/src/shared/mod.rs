pub mod constants;
pub mod time_format;
