use chrono::{NaiveDateTime, NaiveTime, Timelike};
use tracing::info;

use crate::error::AppResult;
use crate::models::clock::{ClockEvent, ClockStatus, LatenessCheck};
use crate::store::repositories::clock_repository::ClockRepository;
use crate::store::repositories::schedule_repository::ScheduleRepository;
use crate::store::DataDir;
use crate::utils::time::format_hm;

/// Tolerance after the scheduled start before a clock-in counts as late.
pub const LATE_GRACE_SECONDS: i64 = 300;

#[derive(Clone)]
pub struct AttendanceService {
    data: DataDir,
}

impl AttendanceService {
    pub fn new(data: DataDir) -> Self {
        Self { data }
    }

    /// Appends the clock-in event and evaluates it against the schedule.
    /// The event's own timestamp drives both the log row and the lateness
    /// reference date, so a clock-in straddling midnight is judged against
    /// the day it actually happened.
    pub fn clock_in(&self, username: &str, at: NaiveDateTime) -> AppResult<LatenessCheck> {
        let event = ClockEvent {
            username: username.to_string(),
            date: at.date(),
            time: at.time(),
            status: ClockStatus::In,
        };
        ClockRepository::append(&self.data, &event)?;

        let scheduled = ScheduleRepository::find_start_time(&self.data, username, at.date())?;
        let check = evaluate_lateness(scheduled, at);
        info!(
            target: "app::attendance",
            %username,
            is_late = check.is_late,
            "clock-in recorded"
        );
        Ok(check)
    }

    pub fn clock_out(&self, username: &str, at: NaiveDateTime) -> AppResult<()> {
        let event = ClockEvent {
            username: username.to_string(),
            date: at.date(),
            time: at.time(),
            status: ClockStatus::Out,
        };
        ClockRepository::append(&self.data, &event)?;
        info!(target: "app::attendance", %username, "clock-out recorded");
        Ok(())
    }

    pub fn recent_log(&self, limit: usize) -> AppResult<Vec<ClockEvent>> {
        ClockRepository::list_recent(&self.data, limit)
    }
}

/// Compares an actual clock-in against the scheduled start for that day.
///
/// No schedule means the day is never late. Otherwise the reference point is
/// the clock-in's own date combined with the scheduled hour and minute
/// (seconds zeroed); anything more than [`LATE_GRACE_SECONDS`] past it is
/// late. Early arrivals produce a negative elapsed and are always on time.
pub fn evaluate_lateness(
    scheduled_start: Option<NaiveTime>,
    clocked_at: NaiveDateTime,
) -> LatenessCheck {
    let Some(start) = scheduled_start else {
        return LatenessCheck {
            is_late: false,
            message: "今天没有排班".to_string(),
        };
    };

    let trimmed = start
        .with_second(0)
        .and_then(|time| time.with_nanosecond(0))
        .unwrap_or(start);
    let reference = clocked_at.date().and_time(trimmed);
    let elapsed = (clocked_at - reference).num_seconds();

    if elapsed > LATE_GRACE_SECONDS {
        LatenessCheck {
            is_late: true,
            message: format!(
                "迟到！预定 {}，实际 {}",
                format_hm(trimmed),
                format_hm(clocked_at.time())
            ),
        }
    } else {
        LatenessCheck {
            is_late: false,
            message: format!("准时打卡（{}）", format_hm(clocked_at.time())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn start(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn unscheduled_day_is_never_late() {
        let check = evaluate_lateness(None, at(12, 0, 0));
        assert!(!check.is_late);
        assert_eq!(check.message, "今天没有排班");
    }

    #[test]
    fn within_grace_period_is_on_time() {
        let check = evaluate_lateness(Some(start(9, 0)), at(9, 4, 59));
        assert!(!check.is_late);
    }

    #[test]
    fn past_grace_period_is_late() {
        let check = evaluate_lateness(Some(start(9, 0)), at(9, 5, 1));
        assert!(check.is_late);
        assert!(check.message.contains("09:00"));
        assert!(check.message.contains("09:05"));
    }

    #[test]
    fn exactly_at_grace_boundary_is_on_time() {
        let check = evaluate_lateness(Some(start(9, 0)), at(9, 5, 0));
        assert!(!check.is_late);
    }

    #[test]
    fn early_arrival_is_on_time() {
        let check = evaluate_lateness(Some(start(9, 0)), at(8, 30, 0));
        assert!(!check.is_late);
        assert!(check.message.contains("08:30"));
    }

    #[test]
    fn schedule_seconds_are_ignored() {
        // A start time persisted as 09:00:30 still anchors the grace window
        // at 09:00:00.
        let odd_start = NaiveTime::from_hms_opt(9, 0, 30).unwrap();
        let check = evaluate_lateness(Some(odd_start), at(9, 5, 1));
        assert!(check.is_late);
    }
}
