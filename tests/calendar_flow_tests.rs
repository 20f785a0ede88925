use classtrack::db::DbPool;
use classtrack::models::attendance::{AttendanceEntry, AttendanceStatus, Scope};
use classtrack::models::student::NewStudent;
use classtrack::AppState;
use tempfile::tempdir;

fn setup_state() -> (AppState, tempfile::TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("test_calendar.sqlite");
    let pool = DbPool::new(&db_path).expect("Failed to create DB pool");
    let state = AppState::new(pool).expect("Failed to create app state");
    (state, dir)
}

fn enroll_class(state: &AppState, teacher_id: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|index| {
            state
                .enroll_student(NewStudent {
                    name: format!("student {index:02}"),
                    teacher_id: teacher_id.to_string(),
                    class_id: None,
                })
                .expect("Failed to enroll student")
                .id
        })
        .collect()
}

fn entry(student_id: &str, status: AttendanceStatus) -> AttendanceEntry {
    AttendanceEntry {
        student_id: student_id.to_string(),
        status,
        note: None,
    }
}

#[test]
fn empty_month_still_lists_every_day_with_the_full_denominator() {
    let (state, _dir) = setup_state();
    enroll_class(&state, "teacher-1", 17);

    let month = state
        .calendar_month(2026, 2, &Scope::teacher("teacher-1"))
        .unwrap();

    assert_eq!(month.year, 2026);
    assert_eq!(month.month, 2);
    assert_eq!(month.total_students, 17);
    assert_eq!(month.days.len(), 28);

    for day in &month.days {
        assert_eq!(day.attendance.total, 17, "{}", day.date);
        assert_eq!(day.attendance.recorded, 0, "{}", day.date);
        assert_eq!(day.attendance.present, 0);
        assert_eq!(day.attendance.absent, 0);
        assert_eq!(day.attendance.late, 0);
        assert_eq!(day.attendance.excused, 0);
    }

    // February Shabbatot are closed; Tu BiShvat is displayed but open.
    for shabbat in [7, 14, 21, 28] {
        let day = &month.days[shabbat - 1];
        assert!(!day.is_school_day, "{}", day.date);
        assert_eq!(day.reason.as_deref(), Some("weekly rest day"));
    }
    let tu_bishvat = &month.days[1];
    assert_eq!(tu_bishvat.date, "2026-02-02");
    assert!(tu_bishvat.is_school_day);
    let holiday = tu_bishvat.holiday.as_ref().expect("Tu BiShvat missing");
    assert!(!holiday.is_school_holiday);
}

#[test]
fn recorded_days_merge_counts_with_the_classification() {
    let (state, _dir) = setup_state();
    let students = enroll_class(&state, "teacher-1", 17);
    let scope = Scope::teacher("teacher-1");

    let mut entries: Vec<AttendanceEntry> = students
        .iter()
        .take(15)
        .map(|id| entry(id, AttendanceStatus::Present))
        .collect();
    entries.push(entry(&students[15], AttendanceStatus::Absent));
    entries.push(entry(&students[16], AttendanceStatus::Late));

    let marked = state
        .record_attendance("teacher-1", None, "2026-02-03", &entries)
        .unwrap();
    assert_eq!(marked, 17);

    let month = state.calendar_month(2026, 2, &scope).unwrap();
    let day = &month.days[2];
    assert_eq!(day.date, "2026-02-03");
    assert!(day.is_school_day);
    assert_eq!(day.attendance.present, 15);
    assert_eq!(day.attendance.absent, 1);
    assert_eq!(day.attendance.late, 1);
    assert_eq!(day.attendance.excused, 0);
    assert_eq!(day.attendance.recorded, 17);
    assert_eq!(day.attendance.total, 17);

    for day in &month.days {
        assert!(day.attendance.recorded <= day.attendance.total, "{}", day.date);
    }
}

#[test]
fn remarking_a_day_replaces_the_previous_status() {
    let (state, _dir) = setup_state();
    let students = enroll_class(&state, "teacher-1", 1);
    let scope = Scope::teacher("teacher-1");

    state
        .record_attendance(
            "teacher-1",
            None,
            "2026-02-04",
            &[entry(&students[0], AttendanceStatus::Absent)],
        )
        .unwrap();
    state
        .record_attendance(
            "teacher-1",
            None,
            "2026-02-04",
            &[entry(&students[0], AttendanceStatus::Present)],
        )
        .unwrap();

    let month = state.calendar_month(2026, 2, &scope).unwrap();
    let day = &month.days[3];
    assert_eq!(day.attendance.present, 1);
    assert_eq!(day.attendance.absent, 0);
    assert_eq!(day.attendance.recorded, 1);

    let records = state.attendance_for_day(&scope, "2026-02-04").unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AttendanceStatus::Present);
}

#[test]
fn scopes_do_not_leak_between_teachers() {
    let (state, _dir) = setup_state();
    let own = enroll_class(&state, "teacher-1", 3);
    let other = enroll_class(&state, "teacher-2", 5);

    state
        .record_attendance(
            "teacher-2",
            None,
            "2026-02-03",
            &other
                .iter()
                .map(|id| entry(id, AttendanceStatus::Present))
                .collect::<Vec<_>>(),
        )
        .unwrap();

    let month = state
        .calendar_month(2026, 2, &Scope::teacher("teacher-1"))
        .unwrap();
    assert_eq!(month.total_students, 3);
    assert!(month.days.iter().all(|day| day.attendance.recorded == 0));

    // Holidays, by contrast, are shared facts and show up for everyone.
    let listed = state.students(&Scope::teacher("teacher-1")).unwrap();
    assert_eq!(listed.len(), own.len());
}

#[test]
fn unknown_scope_yields_an_empty_month_not_an_error() {
    let (state, _dir) = setup_state();

    let month = state
        .calendar_month(2026, 2, &Scope::teacher("nobody"))
        .unwrap();
    assert_eq!(month.total_students, 0);
    assert_eq!(month.days.len(), 28);
    assert!(month.days.iter().all(|day| day.attendance.total == 0));
}

#[test]
fn invalid_months_fail_fast() {
    let (state, _dir) = setup_state();
    let scope = Scope::teacher("teacher-1");

    assert!(state.calendar_month(2026, 0, &scope).is_err());
    assert!(state.calendar_month(2026, 13, &scope).is_err());
}

#[test]
fn september_month_view_marks_the_holiday_block() {
    let (state, _dir) = setup_state();
    enroll_class(&state, "teacher-1", 5);

    let month = state
        .calendar_month(2026, 9, &Scope::teacher("teacher-1"))
        .unwrap();
    assert_eq!(month.days.len(), 30);

    let yom_kippur = &month.days[20];
    assert_eq!(yom_kippur.date, "2026-09-21");
    assert!(!yom_kippur.is_school_day);
    assert_eq!(yom_kippur.reason.as_deref(), Some("יום כיפור"));

    // Rosh Hashana I coincides with Shabbat; the rest-day rule wins.
    let rosh_hashana = &month.days[11];
    assert!(!rosh_hashana.is_school_day);
    assert_eq!(rosh_hashana.reason.as_deref(), Some("weekly rest day"));
}
