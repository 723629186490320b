#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use chrono::{DateTime, Duration, Local, TimeZone};

    use crate::clock::ManualClock;
    use crate::error::{TrackerError, ValidationError};
    use crate::model::timer::TimerState;
    use crate::repository::{
        FileLedgerRepository, FileProjectRepository, FileSummaryRepository, SummaryKind,
    };
    use crate::service::project_service::ProjectRegistry;
    use crate::time::{epoch_seconds, YearMonth};
    use crate::usecase::tracker::Tracker;

    type TestTracker<'a> = Tracker<FileProjectRepository, FileLedgerRepository, &'a ManualClock>;

    fn at(day: u32, h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, day, h, m, s).single().unwrap()
    }

    fn open<'a>(dir: &Path, clock: &'a ManualClock) -> TestTracker<'a> {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let registry = ProjectRegistry::load(FileProjectRepository::new(dir).unwrap(), &names);
        let summaries =
            FileSummaryRepository::new(&dir.join("sessions"), &dir.join("reports")).unwrap();
        Tracker::new(registry, FileLedgerRepository::new(dir).unwrap(), summaries, clock)
    }

    #[test]
    fn test_start_stop_records_entry_log_and_daily_summary() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 9, 0, 0));
        let mut tracker = open(dir.path(), &clock);

        let a = tracker.start("A").unwrap();
        clock.advance(Duration::seconds(125));
        assert_eq!(tracker.elapsed(), 125);
        let entry = tracker.stop().unwrap();

        assert_eq!(entry.project_id, a);
        assert_eq!(entry.start_timestamp, epoch_seconds(at(18, 9, 0, 0)));
        assert_eq!(entry.duration_seconds, 125);

        let log = fs::read_to_string(tracker.session_log().path()).unwrap();
        assert_eq!(log, "2026-10-18 09:02:05 - A: 00:02:05\n");

        let daily = fs::read_to_string(
            dir.path().join("reports").join("daily_summary_20261018.txt"),
        )
        .unwrap();
        assert!(daily.lines().any(|l| l == "A: 00:02:05"));
    }

    #[test]
    fn test_hotkeys_start_and_switch_projects() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 10, 0, 0));
        let mut tracker = open(dir.path(), &clock);
        let c = tracker.registry().find_by_name("C").unwrap();
        let a = tracker.registry().find_by_name("A").unwrap();

        assert_eq!(tracker.hotkey_pressed('3').unwrap(), c);
        clock.advance(Duration::seconds(30));
        assert_eq!(tracker.hotkey_pressed('1').unwrap(), a);

        assert_eq!(tracker.today_totals().get("C"), Some(30));
        assert_eq!(tracker.state().project_id(), Some(a));
        assert_eq!(tracker.current_project().unwrap().name, "A");

        assert!(matches!(
            tracker.hotkey_pressed('1'),
            Err(TrackerError::InvalidTransition(_))
        ));
        assert!(matches!(
            tracker.hotkey_pressed('7'),
            Err(TrackerError::Validation(ValidationError::UnboundHotkey(_)))
        ));
        assert!(matches!(
            tracker.hotkey_pressed('x'),
            Err(TrackerError::Validation(ValidationError::InvalidHotkey(_)))
        ));
        assert_eq!(tracker.state().project_id(), Some(a));
    }

    #[test]
    fn test_unknown_name_and_double_stop_leave_state_alone() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 10, 0, 0));
        let mut tracker = open(dir.path(), &clock);

        assert!(matches!(
            tracker.start("Nope"),
            Err(TrackerError::Validation(ValidationError::UnknownProject(_)))
        ));
        assert_eq!(tracker.state(), TimerState::Idle);
        assert!(matches!(tracker.stop(), Err(TrackerError::InvalidTransition(_))));
        assert!(tracker.shutdown().is_none());
    }

    #[test]
    fn test_project_validation_through_facade() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 10, 0, 0));
        let mut tracker = open(dir.path(), &clock);

        tracker.add_project("Writing", Some("5")).unwrap();
        assert!(tracker.add_project("Reading", Some("5")).is_err());
        assert!(tracker.add_project("Writing", Some("6")).is_err());
        assert!(tracker.add_project("Reading", Some("1")).is_err());
        assert_eq!(tracker.projects().len(), 4);

        let reopened = open(dir.path(), &clock);
        assert!(reopened.registry().find_by_name("Writing").is_some());
        assert!(reopened.registry().find_by_name("Reading").is_none());
    }

    #[test]
    fn test_removing_running_project_records_it_first() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 11, 0, 0));
        let mut tracker = open(dir.path(), &clock);

        let b = tracker.start("B").unwrap();
        clock.advance(Duration::seconds(90));
        assert_eq!(tracker.remove_projects(&[b]).unwrap(), 1);
        assert_eq!(tracker.state(), TimerState::Idle);

        let log = fs::read_to_string(tracker.session_log().path()).unwrap();
        assert!(log.ends_with("B: 00:01:30\n"));
    }

    #[test]
    fn test_today_view_survives_restart_and_drops_orphans() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 8, 0, 0));
        let mut tracker = open(dir.path(), &clock);

        tracker.start("A").unwrap();
        clock.advance(Duration::minutes(10));
        tracker.stop().unwrap();
        let b = tracker.start("B").unwrap();
        clock.advance(Duration::minutes(5));
        tracker.stop().unwrap();
        tracker.remove_projects(&[b]).unwrap();

        clock.advance(Duration::hours(1));
        let reopened = open(dir.path(), &clock);
        let totals = reopened.today_totals();
        assert_eq!(totals.get("A"), Some(600));
        assert_eq!(totals.get("B"), None);

        // the orphaned row is still on disk
        let rows = fs::read_to_string(dir.path().join("time_records.txt")).unwrap();
        assert!(rows.contains(&b.to_string()));
    }

    #[test]
    fn test_next_day_starts_an_empty_projection() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(17, 15, 0, 0));
        let mut tracker = open(dir.path(), &clock);
        tracker.start("A").unwrap();
        clock.advance(Duration::minutes(1));
        tracker.stop().unwrap();

        clock.set(at(18, 9, 0, 0));
        let mut next = open(dir.path(), &clock);
        assert!(next.today_totals().is_empty());
        next.start("A").unwrap();
        clock.advance(Duration::minutes(1));
        next.stop().unwrap();

        // yesterday's row was carried forward by the save
        let rows = fs::read_to_string(dir.path().join("time_records.txt")).unwrap();
        assert_eq!(rows.lines().count(), 2);
    }

    #[test]
    fn test_run_left_open_overnight_reports_into_the_new_day() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(17, 23, 0, 0));
        let mut tracker = open(dir.path(), &clock);
        tracker.start("A").unwrap();
        clock.advance(Duration::minutes(1));
        tracker.stop().unwrap();
        assert_eq!(tracker.today_totals().get("A"), Some(60));

        clock.set(at(18, 9, 0, 0));
        assert!(tracker.today_totals().is_empty());
        tracker.start("A").unwrap();
        clock.advance(Duration::seconds(125));
        tracker.stop().unwrap();

        assert_eq!(
            tracker.session_log().path(),
            dir.path().join("sessions").join("session_20261018_090000.txt")
        );
        let reports = dir.path().join("reports");
        let today = fs::read_to_string(reports.join("daily_summary_20261018.txt")).unwrap();
        assert!(today.lines().any(|l| l == "A: 00:02:05"));
        let yesterday = fs::read_to_string(reports.join("daily_summary_20261017.txt")).unwrap();
        assert_eq!(yesterday, "A: 00:01:00\n");

        assert_eq!(tracker.today_totals().get("A"), Some(125));
        let rows = fs::read_to_string(dir.path().join("time_records.txt")).unwrap();
        assert_eq!(rows.lines().count(), 2);

        let monthly = tracker.request_monthly_report(None).unwrap();
        assert_eq!(monthly.get("A"), Some(185));
    }

    #[test]
    fn test_interval_across_midnight_is_logged_on_the_stop_day() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(17, 23, 59, 0));
        let mut tracker = open(dir.path(), &clock);
        tracker.start("B").unwrap();
        clock.set(at(18, 0, 1, 0));
        let entry = tracker.stop().unwrap();
        assert_eq!(entry.duration_seconds, 120);
        assert_eq!(entry.start_timestamp, epoch_seconds(at(17, 23, 59, 0)));

        let log = fs::read_to_string(tracker.session_log().path()).unwrap();
        assert_eq!(log, "2026-10-18 00:01:00 - B: 00:02:00\n");
        let today = tracker.read_summary(SummaryKind::Daily(at(18, 0, 0, 0).date_naive())).unwrap();
        assert_eq!(today.unwrap().get("B"), Some(120));

        // the time record keeps its start and belongs to the 17th
        let rows = fs::read_to_string(dir.path().join("time_records.txt")).unwrap();
        assert_eq!(rows.lines().count(), 1);
        assert!(tracker.today_totals().is_empty());
    }

    #[test]
    fn test_names_that_would_split_in_reports_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 9, 0, 0));
        let mut tracker = open(dir.path(), &clock);

        assert!(matches!(
            tracker.add_project("Ops - infra", Some("5")),
            Err(TrackerError::Validation(ValidationError::InvalidName(_)))
        ));
        assert!(matches!(
            tracker.add_project("(5) Ops", Some("5")),
            Err(TrackerError::Validation(ValidationError::InvalidName(_)))
        ));

        tracker.add_project("Ops-infra", Some("5")).unwrap();
        tracker.hotkey_pressed('5').unwrap();
        clock.advance(Duration::minutes(1));
        tracker.stop().unwrap();

        let daily = tracker.request_daily_report(None).unwrap();
        assert_eq!(daily.render(), "Ops-infra: 00:01:00\n");
        let monthly = tracker.request_monthly_report(None).unwrap();
        assert_eq!(monthly.get("Ops-infra"), Some(60));
    }

    #[test]
    fn test_monthly_report_adds_days() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(1, 9, 0, 0));
        let mut day_one = open(dir.path(), &clock);
        day_one.start("A").unwrap();
        clock.advance(Duration::minutes(1));
        day_one.stop().unwrap();

        clock.set(at(2, 9, 0, 0));
        let mut day_two = open(dir.path(), &clock);
        day_two.start("A").unwrap();
        clock.advance(Duration::minutes(1));
        day_two.stop().unwrap();

        let monthly = day_two.request_monthly_report(None).unwrap();
        assert_eq!(monthly.render(), "A: 00:02:00\n");
        let month = YearMonth::new(2026, 10).unwrap();
        assert_eq!(
            day_two.read_summary(SummaryKind::Monthly(month)).unwrap(),
            Some(monthly)
        );

        let daily = day_two.request_daily_report(Some(at(1, 0, 0, 0).date_naive())).unwrap();
        assert_eq!(daily.get("A"), Some(60));
    }

    #[test]
    fn test_shutdown_stops_running_session() {
        let dir = tempfile::tempdir().unwrap();
        let clock = ManualClock::new(at(18, 17, 0, 0));
        let mut tracker = open(dir.path(), &clock);
        tracker.start("C").unwrap();
        clock.advance(Duration::seconds(42));

        let entry = tracker.shutdown().unwrap();
        assert_eq!(entry.duration_seconds, 42);
        assert_eq!(tracker.state(), TimerState::Idle);
    }
}
