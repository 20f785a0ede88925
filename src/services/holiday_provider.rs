//! Raw holiday events for a Gregorian year.
//!
//! The provider enumerates the Israeli school-relevant events of the Hebrew
//! calendar under a fixed configuration (Jerusalem, Israel observance) and
//! emits them with their Gregorian dates. Minor fasts, candle-lighting
//! times, omer counts, and Torah-reading markers are never generated —
//! suppression happens here by construction, not by downstream filtering.
//!
//! Output is a pure function of the year: the same year always yields the
//! same event list.

use chrono::{Datelike, NaiveDate};

use crate::error::{AppError, AppResult};
use crate::hebrew::{
    self, fixed_from_hebrew, last_month, weekday_of_fixed, AV, IYYAR, KISLEV, NISAN, SHVAT, SIVAN,
    TISHREI,
};

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayCalendarProvider;

impl HolidayCalendarProvider {
    /// All events falling inside the Gregorian year, sorted by date.
    /// A Gregorian year overlaps two Hebrew years; both are enumerated and
    /// trimmed to the requested year.
    pub fn list_events(&self, year: i32) -> AppResult<Vec<RawEvent>> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(AppError::validation(format!(
                "unsupported calendar year: {year}"
            )));
        }

        let mut events = Vec::new();
        for hebrew_year in hebrew::years_overlapping_gregorian(year) {
            push_year_events(hebrew_year, &mut events)?;
        }

        events.retain(|event| event.date.year() == year);
        events.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(events)
    }
}

const SUKKOT_DAYS: [&str; 7] = [
    "Sukkot I",
    "Sukkot II",
    "Sukkot III (CH''M)",
    "Sukkot IV (CH''M)",
    "Sukkot V (CH''M)",
    "Sukkot VI (CH''M)",
    "Sukkot VII (Hoshana Raba)",
];

const PESACH_DAYS: [&str; 7] = [
    "Pesach I",
    "Pesach II (CH''M)",
    "Pesach III (CH''M)",
    "Pesach IV (CH''M)",
    "Pesach V (CH''M)",
    "Pesach VI (CH''M)",
    "Pesach VII",
];

const CHANUKAH_CANDLES: [&str; 8] = [
    "Chanukah: 1 Candle",
    "Chanukah: 2 Candles",
    "Chanukah: 3 Candles",
    "Chanukah: 4 Candles",
    "Chanukah: 5 Candles",
    "Chanukah: 6 Candles",
    "Chanukah: 7 Candles",
    "Chanukah: 8 Candles",
];

fn push_year_events(hebrew_year: i64, out: &mut Vec<RawEvent>) -> AppResult<()> {
    let mut push = |description: &str, fixed: i64| -> AppResult<()> {
        out.push(RawEvent {
            description: description.to_string(),
            date: hebrew::gregorian_from_fixed(fixed)?,
        });
        Ok(())
    };

    push("Rosh Hashana I", fixed_from_hebrew(hebrew_year, TISHREI, 1))?;
    push("Rosh Hashana II", fixed_from_hebrew(hebrew_year, TISHREI, 2))?;
    push("Erev Yom Kippur", fixed_from_hebrew(hebrew_year, TISHREI, 9))?;
    push("Yom Kippur", fixed_from_hebrew(hebrew_year, TISHREI, 10))?;

    for (offset, description) in SUKKOT_DAYS.iter().enumerate() {
        push(
            description,
            fixed_from_hebrew(hebrew_year, TISHREI, 15 + offset as i64),
        )?;
    }
    // Under Israel observance both fall on 22 Tishrei: two raw events on
    // one date, de-duplicated at the store's write path.
    push("Shmini Atzeret", fixed_from_hebrew(hebrew_year, TISHREI, 22))?;
    push("Simchat Torah", fixed_from_hebrew(hebrew_year, TISHREI, 22))?;

    // Candle n is lit the evening before day n, so the first candle event
    // lands on 24 Kislev.
    let chanukah_first_day = fixed_from_hebrew(hebrew_year, KISLEV, 25);
    for (offset, description) in CHANUKAH_CANDLES.iter().enumerate() {
        push(description, chanukah_first_day - 1 + offset as i64)?;
    }
    push("Chanukah: 8th Day", chanukah_first_day + 7)?;

    push("Tu BiShvat", fixed_from_hebrew(hebrew_year, SHVAT, 15))?;

    // Purim is in Adar II when the year is leap.
    let adar = last_month(hebrew_year);
    push("Purim", fixed_from_hebrew(hebrew_year, adar, 14))?;
    push("Shushan Purim", fixed_from_hebrew(hebrew_year, adar, 15))?;

    for (offset, description) in PESACH_DAYS.iter().enumerate() {
        push(
            description,
            fixed_from_hebrew(hebrew_year, NISAN, 15 + offset as i64),
        )?;
    }

    // 27 Nisan, observed Thursday when it falls on Friday and Monday when
    // it falls on Sunday.
    let mut shoah = fixed_from_hebrew(hebrew_year, NISAN, 27);
    match weekday_of_fixed(shoah) {
        5 => shoah -= 1,
        0 => shoah += 1,
        _ => {}
    }
    push("Yom HaShoah", shoah)?;

    // Statutory shifts around 5 Iyyar: pulled back from Friday/Shabbat,
    // pushed off a Sunday eve (5 Iyyar on Monday).
    let atzmaut_nominal = fixed_from_hebrew(hebrew_year, IYYAR, 5);
    let (zikaron, atzmaut) = match weekday_of_fixed(atzmaut_nominal) {
        5 => (atzmaut_nominal - 2, atzmaut_nominal - 1),
        6 => (atzmaut_nominal - 3, atzmaut_nominal - 2),
        1 => (atzmaut_nominal, atzmaut_nominal + 1),
        _ => (atzmaut_nominal - 1, atzmaut_nominal),
    };
    push("Yom HaZikaron", zikaron)?;
    push("Yom HaAtzma'ut", atzmaut)?;

    push("Lag BaOmer", fixed_from_hebrew(hebrew_year, IYYAR, 18))?;
    push("Yom Yerushalayim", fixed_from_hebrew(hebrew_year, IYYAR, 28))?;
    push("Shavuot", fixed_from_hebrew(hebrew_year, SIVAN, 6))?;

    // The fast is deferred to Sunday when 9 Av falls on Shabbat.
    let mut tisha_bav = fixed_from_hebrew(hebrew_year, AV, 9);
    if weekday_of_fixed(tisha_bav) == 6 {
        tisha_bav += 1;
    }
    push("Erev Tish'a B'Av", tisha_bav - 1)?;
    push("Tish'a B'Av", tisha_bav)?;

    Ok(())
}
