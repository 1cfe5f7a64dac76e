pub mod unsupported_speech;
