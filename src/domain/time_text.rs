use crate::error::{Result, TaskError};

const SECONDS_PER_DAY: u64 = 24 * 3600;

/// Parse user-entered time text into seconds.
///
/// Accepted forms:
/// - empty or whitespace: 0
/// - digits only: raw seconds ("300")
/// - `mm:ss`: read as `00:mm:ss` ("12:34")
/// - `hh:mm:ss` with hh <= 23, mm <= 59, ss <= 59
pub fn parse_time(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let invalid = || TaskError::InvalidFormat(text.to_string());

    if trimmed.is_empty() {
        return Ok(0);
    }

    if is_digits(trimmed) {
        return trimmed.parse::<u64>().map_err(|_| invalid());
    }

    let clock = match trimmed.len() {
        5 => format!("00:{}", trimmed),
        8 => trimmed.to_string(),
        _ => return Err(invalid()),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.len() != 2 || !is_digits(p)) {
        return Err(invalid());
    }

    let field = |p: &str| p.parse::<u64>().map_err(|_| invalid());
    let (hours, minutes, seconds) = (field(parts[0])?, field(parts[1])?, field(parts[2])?);

    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(invalid());
    }

    Ok(hours * 3600 + minutes * 60 + seconds)
}

/// Format seconds as zero-padded `hh:mm:ss`. Hours do not wrap at 24.
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Text for the time editor that `parse_time` reads back to the same value.
///
/// `hh:mm:ss` below one day, raw seconds from 24h up.
pub fn editable_time(total_seconds: u64) -> String {
    if total_seconds < SECONDS_PER_DAY {
        format_time(total_seconds)
    } else {
        total_seconds.to_string()
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(text: &str) -> bool {
        matches!(parse_time(text), Err(TaskError::InvalidFormat(_)))
    }

    #[test]
    fn test_parse_empty_is_zero() {
        assert_eq!(parse_time("").unwrap(), 0);
        assert_eq!(parse_time("   ").unwrap(), 0);
    }

    #[test]
    fn test_parse_raw_seconds() {
        assert_eq!(parse_time("300").unwrap(), 300);
        assert_eq!(parse_time(" 90000 ").unwrap(), 90000);
    }

    #[test]
    fn test_parse_minutes_seconds() {
        assert_eq!(parse_time("12:34").unwrap(), 754);
        assert_eq!(parse_time("00:00").unwrap(), 0);
    }

    #[test]
    fn test_parse_hours_minutes_seconds() {
        assert_eq!(parse_time("23:59:59").unwrap(), 86399);
        assert_eq!(parse_time("01:02:03").unwrap(), 3723);
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(invalid("24:00:00"));
        assert!(invalid("12:60"));
        assert!(invalid("00:60:00"));
        assert!(invalid("00:00:60"));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(invalid("abc"));
        assert!(invalid("+5"));
        assert!(invalid("-5"));
        assert!(invalid("1:2:3"));
        assert!(invalid("12:3"));
        assert!(invalid("1a:00"));
        assert!(invalid("12-34"));
        assert!(invalid("99999999999999999999999"));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00:00");
        assert_eq!(format_time(754), "00:12:34");
        assert_eq!(format_time(86399), "23:59:59");
        assert_eq!(format_time(90061), "25:01:01");
        assert_eq!(format_time(360000), "100:00:00");
    }

    #[test]
    fn test_canonical_form_round_trips() {
        for s in [0, 1, 59, 60, 754, 3599, 3600, 45296, 86399] {
            let shown = format_time(s);
            assert_eq!(format_time(parse_time(&shown).unwrap()), shown);
        }
    }

    #[test]
    fn test_editable_time_always_parses_back() {
        assert_eq!(editable_time(754), "00:12:34");
        assert_eq!(editable_time(86399), "23:59:59");
        assert_eq!(editable_time(86400), "86400");
        assert_eq!(editable_time(90061), "90061");
        for s in [0, 754, 86399, 86400, 90061, 360000] {
            assert_eq!(parse_time(&editable_time(s)).unwrap(), s);
        }
    }
}
