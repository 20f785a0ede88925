//! Arithmetic Hebrew calendar.
//!
//! Implements the classical fixed (arithmetic) Hebrew calendar: 19-year
//! Metonic leap cycle, molad reckoning in halakim, and the new-year
//! postponement rules, expressed through fixed day numbers (Rata Die,
//! day 1 = 0001-01-01 of the proleptic Gregorian calendar). Conversion to
//! `chrono::NaiveDate` goes through the same day numbering, so a Hebrew
//! date maps to exactly one Gregorian date with no timezone involved.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};

/// Fixed day number of 1 Tishrei, year 1.
const HEBREW_EPOCH: i64 = -1_373_427;

pub const NISAN: u8 = 1;
pub const IYYAR: u8 = 2;
pub const SIVAN: u8 = 3;
pub const TAMMUZ: u8 = 4;
pub const AV: u8 = 5;
pub const ELUL: u8 = 6;
pub const TISHREI: u8 = 7;
pub const MARCHESHVAN: u8 = 8;
pub const KISLEV: u8 = 9;
pub const TEVET: u8 = 10;
pub const SHVAT: u8 = 11;
pub const ADAR: u8 = 12;
pub const ADAR_II: u8 = 13;

pub fn is_leap_year(year: i64) -> bool {
    (7 * year + 1).rem_euclid(19) < 7
}

/// Last month ordinal of the year: 12 in a common year, 13 (Adar II) in a leap year.
pub fn last_month(year: i64) -> u8 {
    if is_leap_year(year) {
        ADAR_II
    } else {
        ADAR
    }
}

/// Days from the epoch to the molad-derived new year of `year`, before the
/// year-length correction. Folds the molad-zaken and lo-ADU postponements
/// into a single closed form.
fn elapsed_days(year: i64) -> i64 {
    let months_elapsed = (235 * year - 234).div_euclid(19);
    let parts_elapsed = 12_084 + 13_753 * months_elapsed;
    let days = 29 * months_elapsed + parts_elapsed.div_euclid(25_920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

/// The remaining two postponements, expressed as a delay on the year start
/// to keep every year at one of the six legal lengths.
fn year_start_delay(year: i64) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

/// Fixed day number of 1 Tishrei of the given Hebrew year.
pub fn new_year(year: i64) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + year_start_delay(year)
}

pub fn days_in_year(year: i64) -> i64 {
    new_year(year + 1) - new_year(year)
}

fn long_marcheshvan(year: i64) -> bool {
    matches!(days_in_year(year), 355 | 385)
}

fn short_kislev(year: i64) -> bool {
    matches!(days_in_year(year), 353 | 383)
}

pub fn days_in_month(year: i64, month: u8) -> i64 {
    match month {
        IYYAR | TAMMUZ | ELUL | TEVET | ADAR_II => 29,
        ADAR if !is_leap_year(year) => 29,
        MARCHESHVAN if !long_marcheshvan(year) => 29,
        KISLEV if short_kislev(year) => 29,
        _ => 30,
    }
}

/// Fixed day number of a Hebrew calendar date. The year runs Tishrei..Elul,
/// so months before Tishrei belong to the back half of the year.
pub fn fixed_from_hebrew(year: i64, month: u8, day: i64) -> i64 {
    let mut fixed = new_year(year);
    if month < TISHREI {
        for m in TISHREI..=last_month(year) {
            fixed += days_in_month(year, m);
        }
        for m in NISAN..month {
            fixed += days_in_month(year, m);
        }
    } else {
        for m in TISHREI..month {
            fixed += days_in_month(year, m);
        }
    }
    fixed + day - 1
}

/// Day of week for a fixed day number, 0=Sunday .. 6=Saturday.
pub fn weekday_of_fixed(fixed: i64) -> u8 {
    fixed.rem_euclid(7) as u8
}

pub fn gregorian_from_fixed(fixed: i64) -> AppResult<NaiveDate> {
    let days = i32::try_from(fixed)
        .map_err(|_| AppError::validation(format!("day number out of range: {fixed}")))?;
    NaiveDate::from_num_days_from_ce_opt(days)
        .ok_or_else(|| AppError::validation(format!("day number out of range: {fixed}")))
}

/// The two Hebrew years whose days overlap a Gregorian year: 1 Tishrei of
/// year `g + 3761` falls in the autumn of Gregorian year `g`.
pub fn years_overlapping_gregorian(gregorian_year: i32) -> [i64; 2] {
    let g = gregorian_year as i64;
    [g + 3760, g + 3761]
}
