use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Inclusive calendar date range for a revenue report.
///
/// The end of the range is normalized to end-of-day (23:59:59.999) so a bill
/// paid any time on the final day still falls inside the window. An inverted
/// range (`start > end`) is not rejected; reports over it are simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parse a range from ISO-8601 date strings.
    ///
    /// Accepts plain dates (`2024-03-04`) or full RFC 3339 timestamps; the
    /// time-of-day portion is discarded either way.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::InvalidRange`] when either string is empty
    /// or unparseable.
    pub fn parse(start: &str, end: &str) -> AnalyticsResult<Self> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Start of the window as a UTC instant (midnight on the start date).
    pub fn start_at(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.start.and_time(NaiveTime::MIN))
    }

    /// End of the window as a UTC instant (23:59:59.999 on the end date).
    pub fn end_at(&self) -> DateTime<Utc> {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        Utc.from_utc_datetime(&self.end.and_time(end_of_day))
    }

    /// Whether an instant falls inside the window (both ends inclusive).
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start_at() && at <= self.end_at()
    }
}

fn parse_date(value: &str) -> AnalyticsResult<NaiveDate> {
    if value.trim().is_empty() {
        return Err(AnalyticsError::InvalidRange("date is required".to_string()));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc).date_naive()))
        .map_err(|_| AnalyticsError::InvalidRange(format!("unparseable date: {value}")))
}
