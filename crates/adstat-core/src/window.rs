//! Reporting window calculation
//!
//! A run reports on the period from seven days before "now" up to the
//! Sunday closing the previous calendar week. Two computations are made:
//!
//! - a trailing start: `today - 7 days`
//! - a calendar week: `last_monday = start - weekday(today)` and
//!   `next_sunday = last_monday + 6 days`
//!
//! Only `(start_date, end_date = next_sunday)` is sent to the statistics
//! API. `last_monday` is computed and logged but never queried, so on any
//! day other than Monday the queried range is shorter than a full week.
//! This mirrors the behavior existing spreadsheets were built with; do not
//! rely on `last_monday` for anything else until the intended window is
//! confirmed.

use crate::types::RunId;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// Format of dates sent to the statistics API and embedded in run ids
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the generation instant embedded in run ids
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Date range and run identifier for one report run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportingWindow {
    /// Wall-clock instant the run was generated at
    pub generated_at: NaiveDateTime,
    /// First queried day (today - 7 days)
    pub start_date: NaiveDate,
    /// Last queried day (the Sunday after `last_monday`)
    pub end_date: NaiveDate,
    /// Monday of the calendar-week computation; not used for queries
    pub last_monday: NaiveDate,
    /// Sunday of the calendar-week computation
    pub next_sunday: NaiveDate,
    /// Identifier shared by every row and the worksheet of this run
    pub run_id: RunId,
}

impl ReportingWindow {
    /// Compute the window for the given wall-clock instant
    ///
    /// # Examples
    /// ```
    /// use adstat_core::ReportingWindow;
    /// use chrono::{TimeZone, Utc};
    ///
    /// // Wednesday 2024-01-10
    /// let now = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
    /// let window = ReportingWindow::compute(&now);
    ///
    /// assert_eq!(window.start_date_str(), "2024-01-03");
    /// assert_eq!(window.end_date_str(), "2024-01-07");
    /// assert_eq!(
    ///     window.run_id.as_str(),
    ///     "RUN_20240110093000_From_2024-01-03_To_2024-01-07"
    /// );
    /// ```
    pub fn compute<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let generated_at = now.naive_local();
        let today = generated_at.date();
        let weekday = i64::from(today.weekday().num_days_from_monday());

        let start_date = today - Duration::days(7);
        let last_monday = start_date - Duration::days(weekday);
        let next_sunday = last_monday + Duration::days(6);
        let end_date = next_sunday;

        let run_id = RunId::new(format!(
            "RUN_{}_From_{}_To_{}",
            generated_at.format(RUN_TIMESTAMP_FORMAT),
            start_date.format(DATE_FORMAT),
            end_date.format(DATE_FORMAT),
        ));

        Self {
            generated_at,
            start_date,
            end_date,
            last_monday,
            next_sunday,
            run_id,
        }
    }

    /// Queried start date as `YYYY-MM-DD`
    pub fn start_date_str(&self) -> String {
        self.start_date.format(DATE_FORMAT).to_string()
    }

    /// Queried end date as `YYYY-MM-DD`
    pub fn end_date_str(&self) -> String {
        self.end_date.format(DATE_FORMAT).to_string()
    }

    /// Number of days covered by the queried range, both ends inclusive
    pub fn queried_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}
