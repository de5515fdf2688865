use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmartDateFormat {
    Year,       // 2024
    MonthYear,  // Jan 2024
    DayMonth,   // 12 Jan
    HourMin,    // 10:30
    HourMinSec, // 10:30:15
    Full,       // 12 Jan 2024 10:30
}

/// Parses an IANA zone name; unknown names fall back to UTC.
pub fn resolve_timezone(name: Option<&str>) -> Tz {
    name.and_then(|n| n.parse::<Tz>().ok()).unwrap_or(Tz::UTC)
}

fn pattern(format: SmartDateFormat) -> &'static str {
    match format {
        SmartDateFormat::Year => "%Y",
        SmartDateFormat::MonthYear => "%b %Y",
        SmartDateFormat::DayMonth => "%d %b",
        SmartDateFormat::HourMin => "%H:%M",
        SmartDateFormat::HourMinSec => "%H:%M:%S",
        SmartDateFormat::Full => "%d %b %Y %H:%M",
    }
}

/// Formats a Unix-seconds timestamp in the given zone.
pub fn format_timestamp(seconds: i64, format: SmartDateFormat, tz: Tz) -> String {
    let utc: DateTime<Utc> = match Utc.timestamp_opt(seconds, 0) {
        chrono::LocalResult::Single(d) => d,
        chrono::LocalResult::Ambiguous(d, _) => d,
        chrono::LocalResult::None => return seconds.to_string(),
    };
    utc.with_timezone(&tz).format(pattern(format)).to_string()
}

/// Compact duration such as `3d 4h`, `2h 15m` or `45s`.
pub fn format_duration(seconds: i64) -> String {
    const MINUTE: i64 = 60;
    const HOUR: i64 = 60 * MINUTE;
    const DAY: i64 = 24 * HOUR;

    let sign = if seconds < 0 { "-" } else { "" };
    let s = seconds.abs();
    let body = if s >= DAY {
        let (d, h) = (s / DAY, (s % DAY) / HOUR);
        if h > 0 {
            format!("{d}d {h}h")
        } else {
            format!("{d}d")
        }
    } else if s >= HOUR {
        let (h, m) = (s / HOUR, (s % HOUR) / MINUTE);
        if m > 0 {
            format!("{h}h {m}m")
        } else {
            format!("{h}h")
        }
    } else if s >= MINUTE {
        format!("{}m", s / MINUTE)
    } else {
        format!("{s}s")
    };
    format!("{sign}{body}")
}
