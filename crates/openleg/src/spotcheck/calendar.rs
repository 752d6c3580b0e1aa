use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CalendarId {
    pub year: i32,
    pub number: u32,
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.number)
    }
}

/// Floor calendar as published by a reference source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,
    pub cal_date: NaiveDate,
    pub published: NaiveDateTime,
}

#[derive(Debug, thiserror::Error)]
pub enum CalendarDataError {
    #[error("calendar data source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid calendar range: {start} is after {end}")]
    InvalidRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Read access to calendars held by some data store.
pub trait CalendarDataService: Send + Sync {
    fn calendars_by_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Calendar>, CalendarDataError>;
}

/// Reference side of a calendar spotcheck report.
pub trait CalendarReportSource {
    /// Free-form notes attached to every report built from this source.
    fn report_notes(&self) -> &str;

    fn mark_as_checked(&self, id: CalendarId);

    fn references(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Calendar>, CalendarDataError>;
}

const PROD_REPORT_NOTES: &str = "1.9.2";

/// Uses calendars from the 1.9.2 production deployment as references.
/// Production calendars are never flagged as checked.
#[derive(Debug, Clone)]
pub struct ProdCalendarReportService<S> {
    data_service: S,
}

impl<S: CalendarDataService> ProdCalendarReportService<S> {
    pub fn new(data_service: S) -> Self {
        Self { data_service }
    }
}

impl<S: CalendarDataService> CalendarReportSource for ProdCalendarReportService<S> {
    fn report_notes(&self) -> &str {
        PROD_REPORT_NOTES
    }

    fn mark_as_checked(&self, id: CalendarId) {
        debug!(calendar = %id, "prod calendars are not marked as checked");
    }

    fn references(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Calendar>, CalendarDataError> {
        if start > end {
            return Err(CalendarDataError::InvalidRange { start, end });
        }
        self.data_service.calendars_by_range(start, end)
    }
}
