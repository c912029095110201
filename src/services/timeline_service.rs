use chrono::{Duration, NaiveDate};

use crate::utils::ChartError;

/// Short month name followed by a zero padded day, e.g. "Jan 05"
pub const LABEL_FORMAT: &str = "%b %d";

/// Calendar days from `today - count` up to `today`, oldest first
pub fn timeline_dates(count: i64, today: NaiveDate) -> Result<Vec<NaiveDate>, ChartError> {
    if count < 0 {
        return Err(ChartError::InvalidArgument(format!(
            "timeline length must not be negative, got {}",
            count
        )));
    }

    (0..=count)
        .rev()
        .map(|days_back| {
            Duration::try_days(days_back)
                .and_then(|d| today.checked_sub_signed(d))
                .ok_or_else(|| {
                    ChartError::InvalidArgument(format!("{} days before {} is out of range", days_back, today))
                })
        })
        .collect()
}

/// Date labels for `count` days back from `today`, `count + 1` entries
pub fn build_timeline(count: i64, today: NaiveDate) -> Result<Vec<String>, ChartError> {
    Ok(timeline_dates(count, today)?
        .into_iter()
        .map(|d| d.format(LABEL_FORMAT).to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn zero_is_just_today() {
        assert_eq!(build_timeline(0, day(2024, 1, 5)).unwrap(), vec!["Jan 05"]);
    }

    #[test]
    fn thirty_days_are_consecutive() {
        let today = day(2024, 3, 10);
        let dates = timeline_dates(30, today).unwrap();
        assert_eq!(dates.len(), 31);
        assert_eq!(dates.last(), Some(&today));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }

        let labels = build_timeline(30, today).unwrap();
        assert_eq!(labels.len(), 31);
        assert_eq!(labels[0], "Feb 09");
        assert_eq!(labels[30], "Mar 10");
        let mut unique = labels.clone();
        unique.dedup();
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn crosses_year_boundary() {
        let labels = build_timeline(2, day(2025, 1, 1)).unwrap();
        assert_eq!(labels, vec!["Dec 30", "Dec 31", "Jan 01"]);
    }

    #[test]
    fn negative_count_fails() {
        assert!(matches!(
            build_timeline(-1, day(2024, 1, 1)),
            Err(ChartError::InvalidArgument(_))
        ));
    }
}
