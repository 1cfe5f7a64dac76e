/// Formats seconds as `m:ss`, flooring both parts.
///
/// Minutes are not padded and keep counting past the hour
/// (`3725.0` formats as `62:05`). Negative or non-finite input
/// formats as `0:00` so an unloaded video never renders garbage.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let remaining = (seconds % 60.0).floor() as u64;
    format!("{minutes}:{remaining:02}")
}
