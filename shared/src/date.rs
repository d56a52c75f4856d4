//! 时间展示工具
//!
//! 服务端的时间列并不统一：datetime 列输出 RFC 3339，date 列输出纯日期。
//! 这里提供宽容解析与展示格式化；解析失败时原样返回输入，绝不让一条
//! 坏时间戳影响整页数据。

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// 宽容解析服务端时间戳
///
/// 依次尝试 RFC 3339、无时区 datetime、纯日期三种格式。
pub fn parse_stamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// 展示用短日期（如 "May 21, 2025"）
pub fn format_date(value: &str) -> String {
    match parse_stamp(value) {
        Some(stamp) => stamp.format("%b %-d, %Y").to_string(),
        None => value.to_string(),
    }
}

/// 相对时间（"3 days ago"），以传入时刻为基准
pub fn format_relative(value: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_stamp(value) else {
        return value.to_string();
    };
    let secs = (now - then).num_seconds().max(0);
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;
    let months = days / 30;
    let years = days / 365;

    if secs < 60 {
        "just now".to_string()
    } else if minutes < 60 {
        count_unit(minutes, "minute")
    } else if hours < 24 {
        count_unit(hours, "hour")
    } else if days < 30 {
        count_unit(days, "day")
    } else if years < 1 {
        count_unit(months, "month")
    } else {
        count_unit(years, "year")
    }
}

/// 以当前时刻为基准的相对时间
pub fn relative_from_now(value: &str) -> String {
    format_relative(value, Utc::now())
}

fn count_unit(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", count, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_microseconds() {
        let stamp = parse_stamp("2025-05-21T10:30:00.123456Z").unwrap();
        assert_eq!(stamp, at(2025, 5, 21, 10, 30, 0) + chrono::Duration::microseconds(123456));
    }

    #[test]
    fn parses_space_separated_datetime() {
        assert_eq!(
            parse_stamp("2025-05-21 10:30:00"),
            Some(at(2025, 5, 21, 10, 30, 0))
        );
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        assert_eq!(parse_stamp("2026-12-31"), Some(at(2026, 12, 31, 0, 0, 0)));
    }

    #[test]
    fn garbage_returns_none_and_passes_through() {
        assert_eq!(parse_stamp("not a date"), None);
        assert_eq!(format_date("not a date"), "not a date");
    }

    #[test]
    fn formats_short_date() {
        assert_eq!(format_date("2025-05-03T08:00:00Z"), "May 3, 2025");
    }

    #[test]
    fn relative_labels() {
        let now = at(2025, 5, 21, 12, 0, 0);
        assert_eq!(format_relative("2025-05-21T11:59:30Z", now), "just now");
        assert_eq!(format_relative("2025-05-21T11:59:00Z", now), "1 minute ago");
        assert_eq!(format_relative("2025-05-21T09:00:00Z", now), "3 hours ago");
        assert_eq!(format_relative("2025-05-18T12:00:00Z", now), "3 days ago");
        assert_eq!(format_relative("2025-03-10T12:00:00Z", now), "2 months ago");
        assert_eq!(format_relative("2023-01-01T00:00:00Z", now), "2 years ago");
    }

    #[test]
    fn future_stamps_clamp_to_just_now() {
        let now = at(2025, 5, 21, 12, 0, 0);
        assert_eq!(format_relative("2025-06-01T00:00:00Z", now), "just now");
    }
}
