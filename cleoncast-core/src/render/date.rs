use chrono::{Datelike, NaiveDate};

/// English ordinal suffix for a day of the month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        11..=13 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    }
}

/// Render a service date (`YYYY-MM-DD`) as e.g. `Saturday 21st January 2023`.
///
/// The string is read as a plain calendar date with no timezone attached, so
/// the weekday never shifts. Anything unparseable is returned unchanged.
pub fn format_forecast_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => format!(
            "{} {}{} {}",
            date.format("%A"),
            date.day(),
            ordinal_suffix(date.day()),
            date.format("%B %Y"),
        ),
        Err(_) => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_follow_english_rules() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (25, "th"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn formats_late_january_dates() {
        assert_eq!(format_forecast_date("2023-01-21"), "Saturday 21st January 2023");
        assert_eq!(format_forecast_date("2023-01-22"), "Sunday 22nd January 2023");
        assert_eq!(format_forecast_date("2023-01-23"), "Monday 23rd January 2023");
        assert_eq!(format_forecast_date("2023-01-25"), "Wednesday 25th January 2023");
    }

    #[test]
    fn unparseable_date_is_kept_verbatim() {
        assert_eq!(format_forecast_date("tomorrow"), "tomorrow");
        assert_eq!(format_forecast_date("2023-02-30"), "2023-02-30");
        assert_eq!(format_forecast_date(" 2023-01-21"), " 2023-01-21");
    }
}
