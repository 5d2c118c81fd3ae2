use chrono::{Datelike, Days, Local, NaiveDate, Weekday};

/// Dates fixed once at process start and shared by every classification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Calendar {
    pub today: NaiveDate,
    pub week_boundary: NaiveDate,
}

impl Calendar {
    #[must_use]
    pub fn now() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    #[must_use]
    pub fn for_date(today: NaiveDate) -> Self {
        Self {
            today,
            week_boundary: week_boundary(today),
        }
    }
}

/// The coming Friday. On Friday and Saturday this is next week's Friday, so
/// the boundary is always strictly after `today`.
#[must_use]
pub fn week_boundary(today: NaiveDate) -> NaiveDate {
    let friday = Weekday::Fri.num_days_from_monday();
    let current = today.weekday().num_days_from_monday();
    let ahead = match (friday + 7 - current) % 7 {
        0 => 7,
        n => n,
    };
    today
        .checked_add_days(Days::new(u64::from(ahead)))
        .unwrap_or(NaiveDate::MAX)
}
