//! Maps raw calendar events onto the school holiday vocabulary.
//!
//! Matching is total over [`HolidayKind`]: every description resolves to a
//! known kind or to `Unrecognized`, which callers drop. The curated table
//! carries each day of the multi-day festivals separately because their
//! display names and school impact differ day to day.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::services::holiday_provider::RawEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HolidayKind {
    RoshHashana,
    ErevYomKippur,
    YomKippur,
    Sukkot,
    HoshanaRaba,
    ShminiAtzeret,
    SimchatTorah,
    Chanukah,
    TuBiShvat,
    Purim,
    ShushanPurim,
    Pesach,
    YomHaShoah,
    YomHaZikaron,
    YomHaAtzmaut,
    LagBaOmer,
    YomYerushalayim,
    Shavuot,
    TishaBAv,
    ErevTishaBAv,
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedHoliday {
    pub kind: HolidayKind,
    pub hebrew_name: &'static str,
    /// True when school closes; false for observed-but-open days.
    pub closes_school: bool,
}

/// Known description variants, each pre-tagged with its display name and
/// whether it closes school. Strings match the upstream calendar's English
/// transliterations.
const HOLIDAY_TABLE: &[(&str, HolidayKind, &str, bool)] = &[
    ("Rosh Hashana", HolidayKind::RoshHashana, "ראש השנה", true),
    ("Rosh Hashana I", HolidayKind::RoshHashana, "ראש השנה א׳", true),
    ("Rosh Hashana II", HolidayKind::RoshHashana, "ראש השנה ב׳", true),
    ("Yom Kippur", HolidayKind::YomKippur, "יום כיפור", true),
    ("Erev Yom Kippur", HolidayKind::ErevYomKippur, "ערב יום כיפור", true),
    ("Sukkot I", HolidayKind::Sukkot, "סוכות א׳", true),
    ("Sukkot II", HolidayKind::Sukkot, "סוכות ב׳", true),
    ("Sukkot III (CH''M)", HolidayKind::Sukkot, "חול המועד סוכות", true),
    ("Sukkot IV (CH''M)", HolidayKind::Sukkot, "חול המועד סוכות", true),
    ("Sukkot V (CH''M)", HolidayKind::Sukkot, "חול המועד סוכות", true),
    ("Sukkot VI (CH''M)", HolidayKind::Sukkot, "חול המועד סוכות", true),
    (
        "Sukkot VII (Hoshana Raba)",
        HolidayKind::HoshanaRaba,
        "הושענא רבה",
        true,
    ),
    ("Shmini Atzeret", HolidayKind::ShminiAtzeret, "שמיני עצרת", true),
    ("Simchat Torah", HolidayKind::SimchatTorah, "שמחת תורה", true),
    (
        "Chanukah: 1 Candle",
        HolidayKind::Chanukah,
        "חנוכה - נר ראשון",
        false,
    ),
    ("Chanukah: 2 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 3 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 4 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 5 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 6 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 7 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 8 Candles", HolidayKind::Chanukah, "חנוכה", false),
    ("Chanukah: 8th Day", HolidayKind::Chanukah, "זאת חנוכה", false),
    ("Tu BiShvat", HolidayKind::TuBiShvat, "ט״ו בשבט", false),
    ("Purim", HolidayKind::Purim, "פורים", true),
    ("Shushan Purim", HolidayKind::ShushanPurim, "שושן פורים", false),
    ("Pesach I", HolidayKind::Pesach, "פסח א׳", true),
    ("Pesach II (CH''M)", HolidayKind::Pesach, "חול המועד פסח", true),
    ("Pesach III (CH''M)", HolidayKind::Pesach, "חול המועד פסח", true),
    ("Pesach IV (CH''M)", HolidayKind::Pesach, "חול המועד פסח", true),
    ("Pesach V (CH''M)", HolidayKind::Pesach, "חול המועד פסח", true),
    ("Pesach VI (CH''M)", HolidayKind::Pesach, "חול המועד פסח", true),
    ("Pesach VII", HolidayKind::Pesach, "שביעי של פסח", true),
    ("Yom HaShoah", HolidayKind::YomHaShoah, "יום השואה", true),
    ("Yom HaZikaron", HolidayKind::YomHaZikaron, "יום הזיכרון", true),
    ("Yom HaAtzma'ut", HolidayKind::YomHaAtzmaut, "יום העצמאות", true),
    ("Lag BaOmer", HolidayKind::LagBaOmer, "ל״ג בעומר", false),
    (
        "Yom Yerushalayim",
        HolidayKind::YomYerushalayim,
        "יום ירושלים",
        false,
    ),
    ("Shavuot", HolidayKind::Shavuot, "שבועות", true),
    ("Shavuot I", HolidayKind::Shavuot, "שבועות", true),
    ("Tish'a B'Av", HolidayKind::TishaBAv, "תשעה באב", true),
    ("Erev Tish'a B'Av", HolidayKind::ErevTishaBAv, "ערב תשעה באב", false),
];

/// Families not individually enumerated, matched by substring when the
/// exact lookup misses. Order matters.
const FALLBACK_RULES: &[(&str, HolidayKind, &str, bool)] = &[
    ("Chanukah", HolidayKind::Chanukah, "חנוכה", false),
    ("Pesach", HolidayKind::Pesach, "פסח", true),
    ("Sukkot", HolidayKind::Sukkot, "סוכות", true),
    ("Rosh Hashana", HolidayKind::RoshHashana, "ראש השנה", true),
];

static EXACT_LOOKUP: Lazy<HashMap<&'static str, ClassifiedHoliday>> = Lazy::new(|| {
    HOLIDAY_TABLE
        .iter()
        .map(|&(description, kind, hebrew_name, closes_school)| {
            (
                description,
                ClassifiedHoliday {
                    kind,
                    hebrew_name,
                    closes_school,
                },
            )
        })
        .collect()
});

/// Classify a raw event; `None` means the event is irrelevant to school
/// attendance and is discarded.
pub fn classify(event: &RawEvent) -> Option<ClassifiedHoliday> {
    let classified = classify_description(&event.description);
    if classified.kind == HolidayKind::Unrecognized {
        None
    } else {
        Some(classified)
    }
}

fn classify_description(description: &str) -> ClassifiedHoliday {
    if let Some(classified) = EXACT_LOOKUP.get(description) {
        return classified.clone();
    }

    for &(needle, kind, hebrew_name, closes_school) in FALLBACK_RULES {
        if description.contains(needle) {
            return ClassifiedHoliday {
                kind,
                hebrew_name,
                closes_school,
            };
        }
    }

    ClassifiedHoliday {
        kind: HolidayKind::Unrecognized,
        hebrew_name: "",
        closes_school: false,
    }
}
