use chrono::NaiveDate;
use classtrack::db::DbPool;
use classtrack::models::holiday::HolidayRecord;
use classtrack::services::holiday_service::HolidayService;
use tempfile::tempdir;

fn setup_service() -> (HolidayService, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test_holidays.sqlite");
    let pool = DbPool::new(&db_path).expect("Failed to create DB pool");
    (HolidayService::new(pool), dir)
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

#[test]
fn ensure_year_fills_the_cache_once() {
    let (service, _dir) = setup_service();

    service.ensure_year(2026).unwrap();
    let first = service
        .holidays_in_range(date("2026-01-01"), date("2026-12-31"))
        .unwrap();
    assert!(!first.is_empty());

    // Second fill is a no-op: same rows, same count.
    service.ensure_year(2026).unwrap();
    let second = service
        .holidays_in_range(date("2026-01-01"), date("2026-12-31"))
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn resolved_holidays_carry_school_classification() {
    let (service, _dir) = setup_service();
    let holidays = service.holidays_for_year(2026).unwrap();

    let yom_kippur = holidays
        .iter()
        .find(|h| h.date == "2026-09-21")
        .expect("Yom Kippur missing");
    assert_eq!(yom_kippur.name, "Yom Kippur");
    assert_eq!(yom_kippur.hebrew_name, "יום כיפור");
    assert_eq!(yom_kippur.year, 2026);
    assert!(yom_kippur.is_school_holiday);

    // A Chanukah candle night is observed but does not close school.
    let holidays_2025 = service.holidays_for_year(2025).unwrap();
    let candle = holidays_2025
        .iter()
        .find(|h| h.date == "2025-12-16")
        .expect("Chanukah candle night missing");
    assert!(!candle.is_school_holiday);
}

#[test]
fn one_record_per_date_first_classification_wins() {
    let (service, _dir) = setup_service();
    service.ensure_year(2026).unwrap();

    // 22 Tishrei emits two raw events; only the first survives.
    let records = service
        .holidays_in_range(date("2026-10-03"), date("2026-10-03"))
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Shmini Atzeret");

    let year = service.holidays_for_year(2026).unwrap();
    let mut dates: Vec<&str> = year.iter().map(|h| h.date.as_str()).collect();
    dates.dedup();
    assert_eq!(dates.len(), year.len(), "duplicate dates in holiday cache");
}

#[test]
fn upsert_round_trips_and_does_not_overwrite() {
    let (service, _dir) = setup_service();

    let record = HolidayRecord {
        date: "2026-03-03".to_string(),
        name: "Purim".to_string(),
        hebrew_name: "פורים".to_string(),
        year: 2026,
        is_school_holiday: true,
    };
    service.upsert(&record).unwrap();

    let read = service
        .holidays_in_range(date("2026-03-01"), date("2026-03-31"))
        .unwrap();
    assert_eq!(read.len(), 1);
    assert_eq!(read[0], record);

    // A second writer for the same date is a benign no-op.
    let rival = HolidayRecord {
        name: "Some Other Event".to_string(),
        is_school_holiday: false,
        ..record.clone()
    };
    service.upsert(&rival).unwrap();

    let after = service
        .holidays_in_range(date("2026-03-03"), date("2026-03-03"))
        .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0], record);
}

#[test]
fn provider_failure_degrades_to_no_holidays() {
    let (service, _dir) = setup_service();

    // Year 0 is outside the supported calendar range; the failure is
    // swallowed and the cache simply stays empty.
    service.ensure_year(0).unwrap();
    let holidays = service.holidays_for_year(0).unwrap();
    assert!(holidays.is_empty());
}

#[test]
fn month_listing_is_trimmed_and_scoped_to_the_month() {
    let (service, _dir) = setup_service();

    let september = service.holidays_for_month(2026, 9).unwrap();
    assert!(!september.is_empty());
    assert!(september.iter().all(|h| h.date.starts_with("2026-09")));
    assert!(september.iter().any(|h| h.name == "Yom Kippur"));

    assert!(service.holidays_for_month(2026, 13).is_err());
}
