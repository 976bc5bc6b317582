//! Timestamp parsing and validation for segment boundaries.
//!
//! Accepted inputs are `HH:MM:SS`, `MM:SS` and `SS`, each optionally with a
//! fractional `.mmm` part. Normalized output is always `HH:MM:SS` (plus
//! `.mmm` when the value is not a whole second).

use thiserror::Error;

/// Largest timestamp accepted anywhere (24 hours).
pub const MAX_TIMESTAMP_SECS: f64 = 86_400.0;

/// Slack allowed past a known video duration before a segment is rejected.
const DURATION_BUFFER_SECS: f64 = 1.0;

/// Timestamp parsing/validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimestampError {
    #[error("Timestamp cannot be empty")]
    Empty,

    #[error("Timestamp cannot be negative")]
    Negative,

    #[error("Invalid {0} value: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid {0} value: {1} (must be below 60)")]
    OutOfRange(&'static str, String),

    #[error("Invalid timestamp format '{0}'. Use HH:MM:SS, MM:SS or SS")]
    InvalidFormat(String),

    #[error("Start time must be before end time")]
    StartNotBeforeEnd,

    #[error("Timestamps exceed the {max_hours} hour limit")]
    ExceedsMaxDuration { max_hours: u32 },

    #[error("End time ({end_secs:.1}s) exceeds video duration ({video_duration:.1}s)")]
    ExceedsVideoDuration { end_secs: f64, video_duration: f64 },
}

/// Parse a timestamp string to total seconds.
///
/// # Examples
/// ```
/// use vseg_models::timestamp::parse_timestamp;
/// assert_eq!(parse_timestamp("00:02:15").unwrap(), 135.0);
/// assert_eq!(parse_timestamp("02:15").unwrap(), 135.0);
/// assert_eq!(parse_timestamp("135").unwrap(), 135.0);
/// ```
pub fn parse_timestamp(ts: &str) -> Result<f64, TimestampError> {
    let ts = ts.trim();
    if ts.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts: Vec<&str> = ts.split(':').collect();
    let labels: &[&'static str] = match parts.len() {
        1 => &["seconds"],
        2 => &["minutes", "seconds"],
        3 => &["hours", "minutes", "seconds"],
        _ => return Err(TimestampError::InvalidFormat(ts.to_string())),
    };

    let last = parts.len() - 1;
    parts.iter().zip(labels).enumerate().try_fold(
        0.0,
        |total: f64, (position, (raw, label))| -> Result<f64, TimestampError> {
            let value = parse_component(*label, raw, position == last)?;
            // Only the leading component may reach 60
            if position > 0 && value >= 60.0 {
                return Err(TimestampError::OutOfRange(*label, raw.to_string()));
            }
            Ok(total * 60.0 + value)
        },
    )
}

/// Digits, plus a `.fraction` on the final component only.
fn parse_component(
    label: &'static str,
    raw: &str,
    allow_fraction: bool,
) -> Result<f64, TimestampError> {
    if raw.starts_with('-') {
        return Err(TimestampError::Negative);
    }

    let invalid = || TimestampError::InvalidValue(label, raw.to_string());
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) if allow_fraction => (whole, Some(fraction)),
        Some(_) => return Err(invalid()),
        None => (raw, None),
    };
    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err(invalid());
    }

    raw.parse().map_err(|_| invalid())
}

/// Format seconds as `HH:MM:SS`, or `HH:MM:SS.mmm` for fractional values.
pub fn format_seconds(total_secs: f64) -> String {
    let total_millis = (total_secs.max(0.0) * 1000.0).round() as u64;
    let whole = total_millis / 1000;
    let millis = total_millis % 1000;

    let (hours, mins, secs) = (whole / 3600, (whole % 3600) / 60, whole % 60);
    if millis == 0 {
        format!("{:02}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
    }
}

/// Normalize any accepted timestamp to `HH:MM:SS`, keeping `.mmm` when
/// the input had fractional seconds.
///
/// # Examples
/// ```
/// use vseg_models::timestamp::normalize_timestamp;
/// assert_eq!(normalize_timestamp("2:15").unwrap(), "00:02:15");
/// assert_eq!(normalize_timestamp("2:15.5").unwrap(), "00:02:15.500");
/// ```
pub fn normalize_timestamp(ts: &str) -> Result<String, TimestampError> {
    parse_timestamp(ts).map(format_seconds)
}

/// A start/end pair that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTimestamps {
    /// Normalized start timestamp
    pub start: String,
    /// Normalized end timestamp
    pub end: String,
    pub start_secs: f64,
    pub end_secs: f64,
    /// Whole seconds between start and end
    pub duration_secs: u32,
}

/// Validate a start/end timestamp pair.
///
/// Both must parse, start must be strictly before end, neither may pass
/// [`MAX_TIMESTAMP_SECS`], and when the video duration is known the end may
/// overshoot it by at most one second.
pub fn validate_timestamps(
    start: &str,
    end: &str,
    video_duration: Option<f64>,
) -> Result<ValidatedTimestamps, TimestampError> {
    let start_secs = parse_timestamp(start)?;
    let end_secs = parse_timestamp(end)?;

    if start_secs >= end_secs {
        return Err(TimestampError::StartNotBeforeEnd);
    }

    if end_secs > MAX_TIMESTAMP_SECS {
        return Err(TimestampError::ExceedsMaxDuration {
            max_hours: (MAX_TIMESTAMP_SECS / 3600.0) as u32,
        });
    }

    if let Some(video_duration) = video_duration {
        if end_secs > video_duration + DURATION_BUFFER_SECS {
            return Err(TimestampError::ExceedsVideoDuration {
                end_secs,
                video_duration,
            });
        }
    }

    Ok(ValidatedTimestamps {
        start: format_seconds(start_secs),
        end: format_seconds(end_secs),
        start_secs,
        end_secs,
        duration_secs: (end_secs - start_secs) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_shapes() {
        assert_eq!(parse_timestamp("00:00:00").unwrap(), 0.0);
        assert_eq!(parse_timestamp("01:30:45").unwrap(), 5445.0);
        assert_eq!(parse_timestamp("53:53").unwrap(), 3233.0);
        assert_eq!(parse_timestamp("90").unwrap(), 90.0);
        assert_eq!(parse_timestamp("  00:02:15 ").unwrap(), 135.0);
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let secs = parse_timestamp("00:00:30.500").unwrap();
        assert!((secs - 30.5).abs() < 0.001);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_timestamp(""), Err(TimestampError::Empty));
        assert_eq!(parse_timestamp("   "), Err(TimestampError::Empty));
        assert!(matches!(
            parse_timestamp("ab:cd"),
            Err(TimestampError::InvalidValue("minutes", _))
        ));
        assert!(matches!(
            parse_timestamp("1:2:3:4"),
            Err(TimestampError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_timestamp("00:00:inf"),
            Err(TimestampError::InvalidValue("seconds", _))
        ));
        assert_eq!(parse_timestamp("00:-1:00"), Err(TimestampError::Negative));
    }

    #[test]
    fn test_parse_rejects_loose_numbers() {
        assert!(matches!(
            parse_timestamp("0:0:1e3"),
            Err(TimestampError::InvalidValue("seconds", _))
        ));
        assert!(matches!(
            parse_timestamp("+5"),
            Err(TimestampError::InvalidValue("seconds", _))
        ));
        assert!(matches!(
            parse_timestamp("00:1.5:00"),
            Err(TimestampError::InvalidValue("minutes", _))
        ));
        assert!(matches!(
            parse_timestamp("00:00:."),
            Err(TimestampError::InvalidValue("seconds", _))
        ));
    }

    #[test]
    fn test_parse_rejects_overflowing_components() {
        assert_eq!(
            parse_timestamp("00:01:75"),
            Err(TimestampError::OutOfRange("seconds", "75".to_string()))
        );
        assert_eq!(
            parse_timestamp("00:60:00"),
            Err(TimestampError::OutOfRange("minutes", "60".to_string()))
        );
        assert_eq!(
            parse_timestamp("61:00"),
            Ok(3660.0),
            "leading component is unbounded"
        );
        assert!(parse_timestamp("00:00:59.999").is_ok());
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.0), "00:00:00");
        assert_eq!(format_seconds(135.0), "00:02:15");
        assert_eq!(format_seconds(3661.0), "01:01:01");
        assert_eq!(format_seconds(30.25), "00:00:30.250");
        assert_eq!(format_seconds(59.9999), "00:01:00");
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(normalize_timestamp("5:30").unwrap(), "00:05:30");
        assert_eq!(normalize_timestamp("90").unwrap(), "00:01:30");
        assert_eq!(normalize_timestamp("00:02:45").unwrap(), "00:02:45");
        assert_eq!(normalize_timestamp("00:02:15.5").unwrap(), "00:02:15.500");
    }

    #[test]
    fn test_validate_valid_pair() {
        let v = validate_timestamps("2:15", "00:02:45", None).unwrap();
        assert_eq!(v.start, "00:02:15");
        assert_eq!(v.end, "00:02:45");
        assert_eq!(v.duration_secs, 30);
    }

    #[test]
    fn test_validate_ordering() {
        assert_eq!(
            validate_timestamps("00:02:00", "00:01:00", None),
            Err(TimestampError::StartNotBeforeEnd)
        );
        assert_eq!(
            validate_timestamps("00:01:00", "00:01:00", None),
            Err(TimestampError::StartNotBeforeEnd)
        );
    }

    #[test]
    fn test_validate_limits() {
        assert!(matches!(
            validate_timestamps("00:00:00", "25:00:00", None),
            Err(TimestampError::ExceedsMaxDuration { max_hours: 24 })
        ));
        assert!(matches!(
            validate_timestamps("00:00:00", "00:05:00", Some(240.0)),
            Err(TimestampError::ExceedsVideoDuration { .. })
        ));
        assert!(validate_timestamps("00:00:00", "00:04:01", Some(240.0)).is_ok());
    }
}
