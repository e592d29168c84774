use crate::config::{MAX_DURATION_SECS, MAX_PAUSE_SECS, MAX_REPEAT_TIMES, MIN_DURATION_SECS};
use once_cell::sync::Lazy;
use regex::Regex;

// Compiled regexes for duration parsing
static DUR_MIN_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)m\s*(\d+)s$").unwrap());
static DUR_COLON_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+):(\d{1,2})$").unwrap());
static DUR_SEC_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?)s$").unwrap());

/// Format seconds the way the big display shows them, one decimal place.
pub fn format_seconds(secs: f64) -> String {
    format!("{:.1}", secs)
}

/// Parse a duration string in various formats to seconds.
///
/// Supported formats:
/// - Pure number: "90" or "7.5" (seconds)
/// - Colon format: "1:30" (minutes:seconds)
/// - Minutes and seconds: "1m 30s" or "1m30s"
/// - Seconds suffix: "45s"
pub fn parse_duration_secs(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Duration cannot be empty".to_string());
    }

    // Plain number, interpreted as seconds
    if let Ok(secs) = trimmed.parse::<f64>() {
        if secs.is_finite() {
            return Ok(secs);
        }
    }

    // "M:SS" format
    if let Some(captures) = DUR_COLON_REGEX.captures(trimmed) {
        let minutes: f64 = captures[1].parse().map_err(|_| "Invalid minutes")?;
        let seconds: f64 = captures[2].parse().map_err(|_| "Invalid seconds")?;
        if seconds > 59.0 {
            return Err("Invalid duration: seconds must be 0-59".to_string());
        }
        return Ok(minutes * 60.0 + seconds);
    }

    // "XmYs" format
    if let Some(captures) = DUR_MIN_SEC_REGEX.captures(trimmed) {
        let minutes: f64 = captures[1].parse().map_err(|_| "Invalid minutes")?;
        let seconds: f64 = captures[2].parse().map_err(|_| "Invalid seconds")?;
        if seconds > 59.0 {
            return Err("Invalid duration: seconds must be 0-59".to_string());
        }
        return Ok(minutes * 60.0 + seconds);
    }

    // "Xs" format
    if let Some(captures) = DUR_SEC_REGEX.captures(trimmed) {
        let seconds: f64 = captures[1].parse().map_err(|_| "Invalid seconds")?;
        return Ok(seconds);
    }

    Err("Invalid duration. Use: 90, 1:30, 1m30s, or 45s".to_string())
}

/// Generic numeric input validation
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    max: Option<T>,
    field_name: &str,
) -> Result<T, String>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(format!("{} cannot be empty", field_name));
    }

    match trimmed.parse::<T>() {
        Ok(val) => {
            if let Some(min_val) = min {
                if val < min_val {
                    return Err(format!("{} must be at least {}", field_name, min_val));
                }
            }
            if let Some(max_val) = max {
                if val > max_val {
                    return Err(format!("{} cannot exceed {}", field_name, max_val));
                }
            }
            Ok(val)
        }
        Err(_) => Err(format!("{} must be a valid number", field_name)),
    }
}

/// Validate repeat count input
pub fn validate_repeat_times(input: &str) -> Result<u32, String> {
    validate_numeric_input(input, Some(1), Some(MAX_REPEAT_TIMES), "Repeat times")
}

/// Validate exercise duration input
pub fn validate_duration(input: &str) -> Result<f64, String> {
    let secs = parse_duration_secs(input)?;
    if secs < MIN_DURATION_SECS {
        return Err(format!(
            "Exercise duration must be at least {} seconds",
            MIN_DURATION_SECS
        ));
    }
    if secs > MAX_DURATION_SECS {
        return Err(format!(
            "Exercise duration cannot exceed {} seconds",
            MAX_DURATION_SECS
        ));
    }
    Ok(secs)
}

/// Validate pause duration input. Unlike the exercise segment, zero is a
/// legitimate pause.
pub fn validate_pause(input: &str) -> Result<f64, String> {
    let secs = parse_duration_secs(input)?;
    if secs < 0.0 {
        return Err("Exercise pause cannot be negative".to_string());
    }
    if secs > MAX_PAUSE_SECS {
        return Err(format!(
            "Exercise pause cannot exceed {} seconds",
            MAX_PAUSE_SECS
        ));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_duration_formats() {
        assert_eq!(parse_duration_secs("90"), Ok(90.0));
        assert_eq!(parse_duration_secs("7.5"), Ok(7.5));
        assert_eq!(parse_duration_secs("1:30"), Ok(90.0));
        assert_eq!(parse_duration_secs("1m30s"), Ok(90.0));
        assert_eq!(parse_duration_secs("1m 30s"), Ok(90.0));
        assert_eq!(parse_duration_secs("45s"), Ok(45.0));
        assert_eq!(parse_duration_secs(" 10 "), Ok(10.0));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert!(parse_duration_secs("").is_err());
        assert!(parse_duration_secs("abc").is_err());
        assert!(parse_duration_secs("1:75").is_err());
        assert!(parse_duration_secs("2h").is_err());
    }

    #[test]
    fn repeat_times_bounds() {
        assert_eq!(validate_repeat_times("30"), Ok(30));
        assert!(validate_repeat_times("0").is_err());
        assert!(validate_repeat_times("-3").is_err());
        assert!(validate_repeat_times("1000").is_err());
        assert!(validate_repeat_times("ten").is_err());
    }

    #[test]
    fn duration_must_be_positive_pause_may_be_zero() {
        assert!(validate_duration("0").is_err());
        assert!(validate_duration("-5").is_err());
        assert_eq!(validate_duration("10"), Ok(10.0));
        assert_eq!(validate_pause("0"), Ok(0.0));
        assert!(validate_pause("-1").is_err());
    }

    #[test]
    fn formats_one_decimal() {
        assert_eq!(format_seconds(0.0), "0.0");
        assert_eq!(format_seconds(12.34), "12.3");
        assert_eq!(format_seconds(2.95), "3.0");
    }
}
