//! 日期与时间戳转换
//!
//! 日期统一存储为当天 00:00 UTC 的 unix 秒。

use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub fn date_to_ts(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

pub fn ts_to_date(ts: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .date_naive()
}

pub fn ts_to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// 某年的天数（365 或 366）
pub fn days_in_year(year: i32) -> i64 {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let next = NaiveDate::from_ymd_opt(year + 1, 1, 1);
    match (start, next) {
        (Some(start), Some(next)) => (next - start).num_days(),
        _ => 365,
    }
}

pub fn days_in_year_of(date: NaiveDate) -> i64 {
    days_in_year(date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_ts_roundtrip_is_midnight_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let ts = date_to_ts(date);
        assert_eq!(ts % 86_400, 0);
        assert_eq!(ts_to_date(ts), date);
    }

    #[test]
    fn test_days_in_year() {
        assert_eq!(days_in_year(2024), 366);
        assert_eq!(days_in_year(2023), 365);
        assert_eq!(days_in_year(1900), 365);
        assert_eq!(days_in_year(2000), 366);
    }
}
