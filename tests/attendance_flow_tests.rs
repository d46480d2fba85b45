use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use punchclock::models::clock::ClockStatus;
use punchclock::models::schedule::ScheduleEntry;
use punchclock::services::attendance_service::AttendanceService;
use punchclock::store::repositories::clock_repository::ClockRepository;
use punchclock::store::repositories::schedule_repository::ScheduleRepository;
use punchclock::store::DataDir;
use tempfile::tempdir;

fn setup() -> (DataDir, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let data = DataDir::new(dir.path()).expect("data dir");
    (data, dir)
}

fn schedule(data: &DataDir, username: &str, date: NaiveDate, start: &str) {
    ScheduleRepository::upsert(
        data,
        &ScheduleEntry {
            username: username.into(),
            date,
            start_time: NaiveTime::parse_from_str(start, "%H:%M").expect("start time"),
        },
    )
    .expect("schedule upsert");
}

fn at(date: NaiveDate, h: u32, m: u32, s: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, s).expect("timestamp")
}

#[test]
fn late_clock_in_is_flagged_and_logged() {
    let (data, _dir) = setup();
    let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    schedule(&data, "amy", day, "09:00");

    let service = AttendanceService::new(data.clone());
    let check = service.clock_in("amy", at(day, 9, 10, 0)).expect("clock in");

    assert!(check.is_late);
    assert!(check.message.contains("09:00"));
    assert!(check.message.contains("09:10"));

    let events = ClockRepository::list_for(&data, "amy", day).expect("events");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].status, ClockStatus::In);
}

#[test]
fn clock_in_within_grace_is_on_time() {
    let (data, _dir) = setup();
    let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    schedule(&data, "amy", day, "09:00");

    let service = AttendanceService::new(data.clone());
    let check = service
        .clock_in("amy", at(day, 9, 4, 59))
        .expect("clock in");

    assert!(!check.is_late);
    assert!(check.message.contains("09:04"));
}

#[test]
fn unscheduled_day_clock_in_is_logged_but_never_late() {
    let (data, _dir) = setup();
    let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

    let service = AttendanceService::new(data.clone());
    let check = service.clock_in("amy", at(day, 14, 0, 0)).expect("clock in");

    assert!(!check.is_late);
    assert_eq!(check.message, "今天没有排班");

    let events = ClockRepository::list_for(&data, "amy", day).expect("events");
    assert_eq!(events.len(), 1);
}

#[test]
fn schedule_for_another_user_does_not_apply() {
    let (data, _dir) = setup();
    let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    schedule(&data, "bob", day, "09:00");

    let service = AttendanceService::new(data.clone());
    let check = service.clock_in("amy", at(day, 12, 0, 0)).expect("clock in");
    assert!(!check.is_late);
}

#[test]
fn clock_out_appends_out_event() {
    let (data, _dir) = setup();
    let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();

    let service = AttendanceService::new(data.clone());
    service.clock_in("amy", at(day, 9, 0, 0)).expect("clock in");
    service.clock_out("amy", at(day, 18, 0, 0)).expect("clock out");

    let events = ClockRepository::list_for(&data, "amy", day).expect("events");
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].status, ClockStatus::Out);
}

#[test]
fn recent_log_returns_the_tail_in_file_order() {
    let (data, _dir) = setup();
    let day = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let service = AttendanceService::new(data.clone());

    for minute in 0..25 {
        service
            .clock_in("amy", at(day, 9, minute, 0))
            .expect("clock in");
    }

    let recent = service.recent_log(20).expect("recent log");
    assert_eq!(recent.len(), 20);
    assert_eq!(
        recent.last().map(|event| event.time),
        Some(NaiveTime::from_hms_opt(9, 24, 0).unwrap())
    );
}
