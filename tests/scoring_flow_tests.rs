use chrono::NaiveDate;
use punchclock::models::score::{DailyScore, ScoreAdjustment};
use punchclock::models::task::TaskDefinition;
use punchclock::services::scoring_service::ScoringService;
use punchclock::store::repositories::score_repository::ScoreRepository;
use punchclock::store::repositories::task_repository::TaskRepository;
use punchclock::store::DataDir;
use tempfile::tempdir;

fn setup() -> (ScoringService, DataDir, tempfile::TempDir) {
    let dir = tempdir().expect("temp dir");
    let data = DataDir::new(dir.path()).expect("data dir");

    TaskRepository::save_definitions(
        &data,
        &[
            definition("T1", "开店准备", 5.0, true),
            definition("T2", "清洁机台", 3.0, true),
            definition("T3", "盘点库存", 2.0, true),
            definition("X1", "月度盘点", 10.0, false),
        ],
    )
    .expect("seed tasks");

    (ScoringService::new(data.clone()), data, dir)
}

fn definition(id: &str, name: &str, score: f64, is_routine: bool) -> TaskDefinition {
    TaskDefinition {
        task_id: id.into(),
        task_name: name.into(),
        score,
        is_routine,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

#[test]
fn checklist_excludes_non_routine_tasks() {
    let (service, _data, _dir) = setup();
    let items = service.checklist_for("amy", day(10)).expect("checklist");
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item.task_id != "X1"));
    assert!(items.iter().all(|item| !item.completed));
}

#[test]
fn save_checklist_computes_and_persists_the_daily_score() {
    let (service, data, _dir) = setup();
    let summary = service
        .save_checklist("amy", day(10), &["T1".into(), "T3".into()])
        .expect("save checklist");

    assert_eq!(summary.score.base_score, 7.0);
    assert_eq!(summary.score.adjusted_score, 0.0);
    assert_eq!(summary.score.total_score, 7.0);
    // The freshly saved day is inside its own window.
    assert_eq!(summary.trailing_average, Some(7.0));

    let history = ScoreRepository::list_for_user(&data, "amy").expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total_score, 7.0);
}

#[test]
fn resaving_replaces_the_prior_daily_score_row() {
    let (service, data, _dir) = setup();
    service
        .save_checklist("amy", day(10), &["T1".into(), "T3".into()])
        .expect("first save");
    let summary = service
        .save_checklist("amy", day(10), &["T2".into()])
        .expect("second save");

    assert_eq!(summary.score.base_score, 3.0);

    let history = ScoreRepository::list_for_user(&data, "amy").expect("history");
    assert_eq!(history.len(), 1, "one authoritative row per (user, day)");
    assert_eq!(history[0].total_score, 3.0);
}

#[test]
fn saved_ticks_show_up_in_the_next_checklist_fetch() {
    let (service, _data, _dir) = setup();
    service
        .save_checklist("amy", day(10), &["T2".into()])
        .expect("save");

    let items = service.checklist_for("amy", day(10)).expect("checklist");
    let ticked: Vec<&str> = items
        .iter()
        .filter(|item| item.completed)
        .map(|item| item.task_id.as_str())
        .collect();
    assert_eq!(ticked, vec!["T2"]);
}

#[test]
fn adjustments_flow_into_the_saved_total() {
    let (service, _data, _dir) = setup();
    for delta in [2.0, -1.0, 3.0] {
        service
            .add_adjustment(&ScoreAdjustment {
                username: "amy".into(),
                date: day(10),
                score: delta,
            })
            .expect("adjustment");
    }

    let summary = service
        .save_checklist("amy", day(10), &["T1".into(), "T3".into()])
        .expect("save");

    assert_eq!(summary.score.base_score, 7.0);
    assert_eq!(summary.score.adjusted_score, 4.0);
    assert_eq!(summary.score.total_score, 11.0);
}

#[test]
fn unknown_task_id_is_rejected() {
    let (service, _data, _dir) = setup();
    let result = service.save_checklist("amy", day(10), &["T9".into()]);
    assert!(result.is_err());
}

#[test]
fn trailing_average_spans_the_seven_day_window() {
    let (service, data, _dir) = setup();

    // Older history straight into the score store.
    for (d, total) in [(7u32, 10.0), (9, 20.0), (1, 99.0)] {
        ScoreRepository::upsert(
            &data,
            &DailyScore {
                username: "amy".into(),
                date: day(d),
                base_score: total,
                adjusted_score: 0.0,
                total_score: total,
            },
        )
        .expect("seed score");
    }

    let summary = service
        .save_checklist("amy", day(14), &["T1".into(), "T2".into(), "T3".into()])
        .expect("save");

    // Window [06-07, 06-14]: 10 + 20 + today's 10, the 06-01 row is out.
    assert_eq!(summary.score.total_score, 10.0);
    assert_eq!(summary.trailing_average, Some(40.0 / 3.0));
}
