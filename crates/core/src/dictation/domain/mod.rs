pub mod speech_capture;
