use chrono::{Days, Local, NaiveDate};

use crate::models::DateOption;

/// Days offered by the date selector, starting today
pub const DATE_OPTION_COUNT: u64 = 7;

/// Date layout the schedule feed's `dt` parameter takes
pub const FEED_DATE_FORMAT: &str = "%d.%m.%Y";

pub fn feed_date(date: NaiveDate) -> String {
    date.format(FEED_DATE_FORMAT).to_string()
}

pub fn parse_feed_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), FEED_DATE_FORMAT).ok()
}

/// Selector entries for `reference` and the six days after it.
///
/// The first two carry relative labels, the rest read like "Fri, Jan 3".
pub fn date_options(reference: NaiveDate) -> Vec<DateOption> {
    (0..DATE_OPTION_COUNT)
        .filter_map(|offset| {
            let date = reference.checked_add_days(Days::new(offset))?;
            let label = match offset {
                0 => "Today".to_string(),
                1 => "Tomorrow".to_string(),
                _ => date.format("%a, %b %-d").to_string(),
            };
            Some(DateOption {
                value: feed_date(date),
                label,
            })
        })
        .collect()
}

/// Options for the current wall-clock date; recomputed on every call
pub fn current_date_options() -> Vec<DateOption> {
    date_options(Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_consecutive_days_with_relative_labels() {
        let reference = NaiveDate::from_ymd_opt(2024, 12, 29).expect("valid date");
        let options = date_options(reference);

        assert_eq!(options.len(), 7);
        assert_eq!(options[0].label, "Today");
        assert_eq!(options[0].value, "29.12.2024");
        assert_eq!(options[1].label, "Tomorrow");
        assert_eq!(options[2].label, "Tue, Dec 31");
        assert_eq!(options[3].value, "01.01.2025");
        assert_eq!(options[3].label, "Wed, Jan 1");

        let dates: Vec<NaiveDate> = options
            .iter()
            .map(|option| parse_feed_date(&option.value).expect("feed date"))
            .collect();
        for pair in dates.windows(2) {
            assert_eq!(pair[0].succ_opt(), Some(pair[1]));
        }
    }

    #[test]
    fn feed_dates_round_trip_and_reject_other_layouts() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        assert_eq!(feed_date(date), "07.03.2025");
        assert_eq!(parse_feed_date(" 07.03.2025 "), Some(date));
        assert_eq!(parse_feed_date("2025-03-07"), None);
    }

    #[test]
    fn current_options_start_today() {
        let options = current_date_options();
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].label, "Today");
    }
}
