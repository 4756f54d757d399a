use crate::error::{BisubError, Result};

/// Format a time in seconds as an SRT timecode (HH:MM:SS,mmm).
///
/// The printed value equals `round(seconds * 1000)` milliseconds; rounding
/// carries into seconds, minutes and hours.
pub fn format_seconds(seconds: f64) -> Result<String> {
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(BisubError::InvalidTimecode(format!(
            "expected non-negative seconds, got {seconds}"
        )));
    }
    Ok(format_millis((seconds * 1000.0).round() as u64))
}

/// Format a millisecond total as an SRT timecode.
pub fn format_millis(total_millis: u64) -> String {
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis % 3_600_000) / 60_000;
    let secs = (total_millis % 60_000) / 1_000;
    let millis = total_millis % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// Parse an SRT timecode back into total milliseconds.
pub fn parse_timecode(timecode: &str) -> Result<u64> {
    let invalid = || BisubError::InvalidTimecode(format!("cannot parse '{timecode}'"));

    let (clock, millis_str) = timecode.split_once(',').ok_or_else(invalid)?;
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 {
        return Err(invalid());
    }

    let hours = parse_field(parts[0], 2).ok_or_else(invalid)?;
    let minutes = parse_field(parts[1], 2).filter(|&m| m < 60).ok_or_else(invalid)?;
    let secs = parse_field(parts[2], 2).filter(|&s| s < 60).ok_or_else(invalid)?;
    if millis_str.len() != 3 {
        return Err(invalid());
    }
    let millis = parse_field(millis_str, 3).ok_or_else(invalid)?;

    Ok(hours * 3_600_000 + minutes * 60_000 + secs * 1_000 + millis)
}

/// A zero-padded decimal field of at least `min_width` digits.
fn parse_field(field: &str, min_width: usize) -> Option<u64> {
    if field.len() < min_width || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
