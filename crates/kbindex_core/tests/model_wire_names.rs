use chrono::{NaiveDate, TimeDelta};
use kbindex_core::index::PageType;
use kbindex_core::{NoteFile, NoteKind, Priority, RunStats, TaskRecord, TaskStatus, TimeLogEntry};
use serde_json::json;

#[test]
fn task_record_serializes_with_marker_names() {
    let start = NaiveDate::from_ymd_opt(2025, 4, 6)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let mut task = TaskRecord::new(TaskStatus::Doing, "Write docs", "pages/Docs.md", 3);
    task.priority = Priority::B;
    task.time_log.push(TimeLogEntry {
        start,
        end: start + TimeDelta::hours(2),
        duration: TimeDelta::hours(2),
    });

    let value = serde_json::to_value(&task).unwrap();
    assert_eq!(value["status"], "DOING");
    assert_eq!(value["priority"], "B");
    assert_eq!(value["line_number"], 3);
    assert_eq!(value["time_log"][0]["duration_secs"], 7200);
    assert_eq!(value["time_log"][0]["start"], "2025-04-06T10:00:00");
}

#[test]
fn enum_wire_names_are_stable() {
    assert_eq!(serde_json::to_value(Priority::None).unwrap(), json!("none"));
    assert_eq!(serde_json::to_value(NoteKind::Journal).unwrap(), json!("journal"));
    assert_eq!(serde_json::to_value(PageType::Person).unwrap(), json!("person"));
    assert_eq!(
        serde_json::to_value(NoteFile::new("pages/A.md", NoteKind::Page).kind).unwrap(),
        json!("page")
    );
}

#[test]
fn run_stats_serialize_every_counter() {
    let stats = RunStats {
        files_scanned: 3,
        files_read: 2,
        read_errors: 1,
        tasks: 5,
        links: 8,
    };
    assert_eq!(
        serde_json::to_value(stats).unwrap(),
        json!({
            "files_scanned": 3,
            "files_read": 2,
            "read_errors": 1,
            "tasks": 5,
            "links": 8,
        })
    );
}
