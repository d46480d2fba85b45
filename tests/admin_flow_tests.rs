use punchclock::commands::{self, AppState};
use punchclock::models::user::{Role, UserRecord};
use punchclock::store::repositories::user_repository::UserRepository;
use punchclock::store::DataDir;
use tempfile::tempdir;

fn setup() -> (AppState, DataDir, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let data = DataDir::new(dir.path().join("data")).expect("data dir");
    let state =
        AppState::with_notifier(data.clone(), &dir.path().join("uploads"), None).expect("state");
    (state, data, dir)
}

#[test]
fn login_checks_credentials_and_reports_role() {
    let (state, data, _dir) = setup();
    UserRepository::save_all(
        &data,
        &[
            UserRecord {
                username: "amy".into(),
                password: "secret".into(),
                role: Role::Employee,
            },
            UserRecord {
                username: "boss".into(),
                password: "admin1".into(),
                role: Role::Admin,
            },
        ],
    )
    .expect("seed users");

    let login = commands::auth::login(&state, "boss", "admin1").expect("login");
    assert_eq!(login.role, "admin");

    let wrong = commands::auth::login(&state, "amy", "nope");
    assert_eq!(wrong.err().map(|e| e.code), Some("VALIDATION_ERROR".into()));
}

#[test]
fn schedule_upsert_replaces_the_same_day_entry() {
    let (state, _data, _dir) = setup();
    commands::admin::schedule_upsert(&state, "amy", "2025-06-02", "09:00").expect("first");
    commands::admin::schedule_upsert(&state, "amy", "2025-06-02", "10:30").expect("second");
    commands::admin::schedule_upsert(&state, "bob", "2025-06-02", "09:00").expect("other user");

    let entries = commands::admin::schedule_list(&state).expect("list");
    assert_eq!(entries.len(), 2);
    let amy = entries
        .iter()
        .find(|entry| entry.username == "amy")
        .expect("amy entry");
    assert_eq!(amy.start_time.format("%H:%M").to_string(), "10:30");
}

#[test]
fn schedule_import_swaps_in_the_uploaded_table() {
    let (state, _data, dir) = setup();
    commands::admin::schedule_upsert(&state, "old", "2025-06-01", "08:00").expect("pre-existing");

    let upload = dir.path().join("new_schedule.csv");
    std::fs::write(
        &upload,
        "username,date,start_time\namy,2025-06-02,09:00\nbob,2025-06-02,13:30\n",
    )
    .expect("upload file");

    let response = commands::admin::schedule_import(&state, &upload).expect("import");
    assert_eq!(response.imported, 2);

    let entries = commands::admin::schedule_list(&state).expect("list");
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.username != "old"));
}

#[test]
fn schedule_import_rejects_malformed_rows() {
    let (state, _data, dir) = setup();
    let upload = dir.path().join("bad_schedule.csv");
    std::fs::write(
        &upload,
        "username,date,start_time\namy,yesterday,09:00\n",
    )
    .expect("upload file");

    let error = commands::admin::schedule_import(&state, &upload).expect_err("must fail");
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[test]
fn invalid_issue_status_is_a_validation_error() {
    let (state, _data, _dir) = setup();
    let error = commands::admin::issue_set_status(&state, "some-id", "搁置").expect_err("must fail");
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[test]
fn adjustment_add_parses_and_persists() {
    let (state, _data, _dir) = setup();
    let adjustment =
        commands::admin::adjustment_add(&state, "amy", "2025-06-02", -2.5).expect("adjust");
    assert_eq!(adjustment.score, -2.5);

    let bad = commands::admin::adjustment_add(&state, "amy", "02/06/2025", 1.0);
    assert_eq!(bad.err().map(|e| e.code), Some("VALIDATION_ERROR".into()));
}

#[test]
fn clock_log_defaults_to_the_last_twenty_entries() {
    let (state, _data, _dir) = setup();
    for _ in 0..25 {
        commands::attendance::clock_in(&state, "amy").expect("clock in");
    }

    let recent = commands::admin::clock_log_recent(&state, None).expect("log");
    assert_eq!(recent.len(), commands::admin::DEFAULT_CLOCK_LOG_LIMIT);
}
