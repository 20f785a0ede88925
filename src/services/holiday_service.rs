//! Durable holiday cache over the provider + classifier pipeline.
//!
//! Holiday resolution is a soft dependency of attendance tracking: a failed
//! computation degrades to "no holidays known for that year" and the
//! calendar keeps working on weekend rules alone.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::db::repositories::holiday_repository::{HolidayRepository, HolidayRow};
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::holiday::{HolidayRecord, HolidaySummary};
use crate::services::holiday_classifier;
use crate::services::holiday_provider::HolidayCalendarProvider;
use crate::utils::date;

pub struct HolidayService {
    db: DbPool,
    provider: HolidayCalendarProvider,
}

impl HolidayService {
    pub fn new(db: DbPool) -> Self {
        Self {
            db,
            provider: HolidayCalendarProvider,
        }
    }

    /// Fill the cache for a year unless any record for it already exists.
    /// Classification is deterministic, so two concurrent fills write
    /// identical rows and the `INSERT OR IGNORE` underneath makes the loser
    /// a no-op. Computation failures are logged and swallowed.
    pub fn ensure_year(&self, year: i32) -> AppResult<()> {
        let conn = self.db.get_connection()?;
        if HolidayRepository::count_by_year(&conn, year)? > 0 {
            return Ok(());
        }

        let events = match self.provider.list_events(year) {
            Ok(events) => events,
            Err(err) => {
                warn!(
                    target: "app::holidays",
                    year,
                    error = %err,
                    "holiday computation failed; continuing without holidays"
                );
                return Ok(());
            }
        };

        let mut inserted = 0usize;
        for event in &events {
            let classified = match holiday_classifier::classify(event) {
                Some(classified) => classified,
                None => continue,
            };

            let row = HolidayRow {
                date: date::format_iso(event.date),
                name: event.description.clone(),
                hebrew_name: classified.hebrew_name.to_string(),
                year: event.date.year(),
                is_school_holiday: classified.closes_school,
            };

            // First classification wins for a date; a concurrent writer's
            // row counts the same as ours.
            match HolidayRepository::insert_if_absent(&conn, &row) {
                Ok(true) => inserted += 1,
                Ok(false) => {}
                Err(err) if err.is_conflict() => {}
                Err(err) => {
                    warn!(
                        target: "app::holidays",
                        year,
                        date = %row.date,
                        error = %err,
                        "holiday upsert failed; keeping partial year"
                    );
                    return Ok(());
                }
            }
        }

        debug!(target: "app::holidays", year, inserted, "holiday cache filled");
        Ok(())
    }

    pub fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<HolidayRecord>> {
        let conn = self.db.get_connection()?;
        let rows = HolidayRepository::find_by_range(&conn, &start, &end)?;
        Ok(rows.into_iter().map(HolidayRow::into_record).collect())
    }

    pub fn holiday_on(&self, day: NaiveDate) -> AppResult<Option<HolidayRecord>> {
        let conn = self.db.get_connection()?;
        let row = HolidayRepository::find_by_date(&conn, &day)?;
        Ok(row.map(HolidayRow::into_record))
    }

    pub fn holidays_for_year(&self, year: i32) -> AppResult<Vec<HolidayRecord>> {
        self.ensure_year(year)?;
        let conn = self.db.get_connection()?;
        let rows = HolidayRepository::find_by_year(&conn, year)?;
        Ok(rows.into_iter().map(HolidayRow::into_record).collect())
    }

    /// Month listing trimmed to the display fields.
    pub fn holidays_for_month(&self, year: i32, month: u32) -> AppResult<Vec<HolidaySummary>> {
        let (first, last) = date::month_bounds(year, month)?;
        self.ensure_year(year)?;
        let records = self.holidays_in_range(first, last)?;
        Ok(records.iter().map(HolidayRecord::summary).collect())
    }

    /// Write-through used when a record is already at hand; read path for
    /// callers is `holidays_in_range`.
    pub fn upsert(&self, record: &HolidayRecord) -> AppResult<()> {
        let conn = self.db.get_connection()?;
        HolidayRepository::insert_if_absent(&conn, &HolidayRow::from_record(record))?;
        Ok(())
    }
}
