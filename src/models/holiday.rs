use serde::{Deserialize, Serialize};

/// One resolved holiday, keyed by its Gregorian date. Rows are global
/// (holidays are shared facts, not tenant data) and immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayRecord {
    /// ISO `YYYY-MM-DD`.
    pub date: String,
    /// Source-locale event name, e.g. "Yom Kippur".
    pub name: String,
    /// Localized display name.
    pub hebrew_name: String,
    /// Gregorian year the record was resolved for; redundant with `date`
    /// but kept for range queries.
    pub year: i32,
    /// True when the holiday closes school; false for observed-but-open
    /// days such as the Chanukah candle nights.
    pub is_school_holiday: bool,
}

/// Trimmed month-listing shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidaySummary {
    pub date: String,
    pub name: String,
    pub hebrew_name: String,
}

impl HolidayRecord {
    pub fn summary(&self) -> HolidaySummary {
        HolidaySummary {
            date: self.date.clone(),
            name: self.name.clone(),
            hebrew_name: self.hebrew_name.clone(),
        }
    }
}
