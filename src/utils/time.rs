//! Parsing helpers for the string-typed dates (`YYYY-MM-DD`) and times
//! (`HH:MM[:SS]`) used by the tabular stores. Malformed values are surfaced
//! as validation errors; the core logic assumes pre-validated input.

use chrono::{NaiveDate, NaiveTime};

use crate::error::{AppError, AppResult};

pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| AppError::validation(format!("无效的日期格式 \"{raw}\": {err}")))
}

/// Accepts both `HH:MM:SS` (clock log) and `HH:MM` (schedule) forms.
pub fn parse_time(raw: &str) -> AppResult<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|err| AppError::validation(format!("无效的时间格式 \"{raw}\": {err}")))
}

pub fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

pub fn format_hms(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_time_forms() {
        assert_eq!(
            parse_time("09:00").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("09:04:59").unwrap(),
            NaiveTime::from_hms_opt(9, 4, 59).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_time() {
        assert!(parse_time("9 o'clock").is_err());
        assert!(parse_time("25:00").is_err());
    }

    #[test]
    fn parses_and_formats_dates() {
        let date = parse_date("2025-06-01").unwrap();
        assert_eq!(format_date(date), "2025-06-01");
        assert!(parse_date("01/06/2025").is_err());
    }
}
