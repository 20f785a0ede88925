use classtrack::db::DbPool;
use classtrack::AppState;
use tempfile::tempdir;

fn setup_state() -> (AppState, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test_school_days.sqlite");
    let pool = DbPool::new(&db_path).expect("Failed to create DB pool");
    let state = AppState::new(pool).expect("Failed to create app state");
    (state, dir)
}

#[test]
fn shabbat_is_never_a_school_day() {
    let (state, _dir) = setup_state();

    let classification = state.check_school_day("2026-01-03").unwrap();
    assert_eq!(classification.date, "2026-01-03");
    assert_eq!(classification.day_of_week, 6);
    assert!(!classification.is_school_day);
    assert!(!classification.is_half_day);
    assert_eq!(classification.reason.as_deref(), Some("weekly rest day"));
}

#[test]
fn friday_is_a_half_school_day() {
    let (state, _dir) = setup_state();

    let classification = state.check_school_day("2026-01-02").unwrap();
    assert_eq!(classification.day_of_week, 5);
    assert!(classification.is_school_day);
    assert!(classification.is_half_day);
    assert!(classification.reason.is_none());
}

#[test]
fn closing_holiday_closes_school_with_its_display_name() {
    let (state, _dir) = setup_state();

    // Yom Kippur 5787, a Monday in September.
    let classification = state.check_school_day("2026-09-21").unwrap();
    assert!(!classification.is_school_day);
    assert_eq!(classification.reason.as_deref(), Some("יום כיפור"));
    let holiday = classification.holiday.expect("holiday not attached");
    assert!(holiday.is_school_holiday);
    assert_eq!(holiday.name, "Yom Kippur");
}

#[test]
fn rosh_hashana_ii_closes_school_on_a_sunday() {
    let (state, _dir) = setup_state();

    let classification = state.check_school_day("2026-09-13").unwrap();
    assert_eq!(classification.day_of_week, 0);
    assert!(!classification.is_school_day);
    let holiday = classification.holiday.expect("holiday not attached");
    assert!(holiday.is_school_holiday);
}

#[test]
fn chanukah_candle_night_keeps_school_open() {
    let (state, _dir) = setup_state();

    // Third candle, a Tuesday in December.
    let classification = state.check_school_day("2025-12-16").unwrap();
    assert!(classification.is_school_day);
    assert!(!classification.is_half_day);
    assert!(classification.reason.is_none());
    let holiday = classification.holiday.expect("holiday not attached");
    assert!(!holiday.is_school_holiday);
    assert_eq!(holiday.hebrew_name, "חנוכה");
}

#[test]
fn ordinary_midweek_day() {
    let (state, _dir) = setup_state();

    let classification = state.check_school_day("2026-01-06").unwrap();
    assert!(classification.is_school_day);
    assert!(!classification.is_half_day);
    assert!(classification.holiday.is_none());
}

#[test]
fn malformed_dates_are_rejected() {
    let (state, _dir) = setup_state();

    assert!(state.check_school_day("06/01/2026").is_err());
    assert!(state.check_school_day("2026-02-30").is_err());
    assert!(state.check_school_day("today").is_err());
}

#[test]
fn non_school_days_cover_weekends_and_holidays() {
    let (state, _dir) = setup_state();

    let closed = state
        .non_school_days("2026-09-10", "2026-09-25")
        .unwrap();
    let dates: Vec<&str> = closed.iter().map(|day| day.date.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "2026-09-12", // Shabbat (and Rosh Hashana I)
            "2026-09-13", // Rosh Hashana II
            "2026-09-19", // Shabbat
            "2026-09-20", // Erev Yom Kippur
            "2026-09-21", // Yom Kippur
        ]
    );

    // Shabbat rows carry the rest-day reason, holiday rows their name.
    assert_eq!(closed[0].reason, "weekly rest day");
    assert_eq!(closed[1].reason, "ראש השנה ב׳");
    assert!(closed[1].holiday.is_some());

    assert!(state.non_school_days("2026-09-25", "2026-09-10").is_err());
}
