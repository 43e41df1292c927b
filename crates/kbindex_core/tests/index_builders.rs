use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use kbindex_core::index::{
    build_link_graph, build_missing_pages_index, build_task_index_at, build_time_tracking_index,
    build_timeline_index, week_start, PageType, NO_PROJECT,
};
use kbindex_core::parser::{parse_links, parse_tasks};
use kbindex_core::{LinkRecord, NoteFile, NoteKind, Priority, TaskRecord, TaskStatus, TimeLogEntry};

fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn logged(mut task: TaskRecord, start: NaiveDateTime, hours: i64) -> TaskRecord {
    task.time_log.push(TimeLogEntry {
        start,
        end: start + TimeDelta::hours(hours),
        duration: TimeDelta::hours(hours),
    });
    task
}

fn link(source: &str, target: &str) -> LinkRecord {
    LinkRecord {
        source_file: format!("pages/{source}.md"),
        source_page: source.to_string(),
        target_page: target.to_string(),
        line_number: 1,
        context: format!("[[{target}]]"),
    }
}

#[test]
fn task_index_groups_by_status() {
    let tasks = vec![
        TaskRecord::new(TaskStatus::Now, "Task 1", "pages/A.md", 1),
        TaskRecord::new(TaskStatus::Now, "Task 2", "pages/A.md", 2),
        TaskRecord::new(TaskStatus::Later, "Task 3", "pages/A.md", 3),
        TaskRecord::new(TaskStatus::Done, "Task 4", "pages/A.md", 4),
    ];
    let index = build_task_index_at(&tasks, at(2025, 11, 6, 12), 30);

    assert_eq!(index.total_tasks, 4);
    assert_eq!(index.tasks_with_status(TaskStatus::Now).len(), 2);
    assert_eq!(index.tasks_with_status(TaskStatus::Later).len(), 1);
    assert_eq!(index.tasks_with_status(TaskStatus::Todo).len(), 0);
    assert!((index.statistics.completion_rate - 25.0).abs() < 1e-9);
    assert_eq!(index.generated_at, at(2025, 11, 6, 12));
}

#[test]
fn task_index_tracks_projects_and_recent_activity() {
    let now = at(2025, 11, 6, 12);
    let mut phoenix = TaskRecord::new(TaskStatus::Todo, "Plan", "pages/A.md", 1);
    phoenix.page_refs = vec!["Phoenix".to_string()];
    let phoenix = logged(phoenix, at(2025, 11, 1, 9), 1);

    let mut old = TaskRecord::new(TaskStatus::Done, "Archive", "pages/A.md", 2);
    old.page_refs = vec!["Atlas".to_string()];
    let old = logged(old, at(2025, 8, 1, 9), 2);

    let mut also_phoenix = TaskRecord::new(TaskStatus::Done, "Ship", "pages/A.md", 3);
    also_phoenix.page_refs = vec!["Phoenix".to_string(), "Atlas".to_string()];
    let also_phoenix = logged(also_phoenix, at(2025, 11, 5, 9), 1);

    let index = build_task_index_at(&[phoenix, old, also_phoenix], now, 30);

    let recent: Vec<&str> = index.recent.iter().map(|task| task.description.as_str()).collect();
    assert_eq!(recent, vec!["Ship", "Plan"]);

    let summaries = index.project_summaries();
    assert_eq!(summaries[0].project, "Phoenix");
    assert_eq!(summaries[0].total_tasks, 2);
    assert_eq!(summaries[1].project, "Atlas");
    assert_eq!(summaries[0].by_status.get(&TaskStatus::Done), Some(&1));
    assert_eq!(index.statistics.with_time_tracking, 3);
    assert_eq!(index.statistics.total_time_logged, TimeDelta::hours(4));
}

#[test]
fn hub_ranking_dedups_repeated_links() {
    let files = vec![
        NoteFile::new("pages/A.md", NoteKind::Page),
        NoteFile::new("pages/B.md", NoteKind::Page),
        NoteFile::new("pages/C.md", NoteKind::Page),
    ];
    let links = vec![link("A", "B"), link("A", "C"), link("B", "C"), link("B", "C")];
    let graph = build_link_graph(&links, &files);

    assert_eq!(graph.nodes.len(), 3);
    let c = graph.node("C").unwrap();
    assert_eq!(c.reference_count, 2);
    assert_eq!(c.inbound, vec!["A", "B"]);
    assert_eq!(graph.node("B").unwrap().outbound, vec!["C"]);
    assert_eq!(graph.hub_pages, vec!["C", "B"]);
    assert_eq!(graph.total_references(), 3);
    assert_eq!(graph.unreferenced_pages(), vec!["A"]);
    assert!(graph.orphan_pages().is_empty());
    for node in graph.nodes.values() {
        assert_eq!(node.inbound.len(), node.reference_count);
    }
}

#[test]
fn phantom_nodes_appear_only_for_missing_targets() {
    let files = vec![NoteFile::new("pages/Home.md", NoteKind::Page)];
    let links = parse_links("- see [[Ghost]] and [[Home]]\n", "pages/Home.md");
    let graph = build_link_graph(&links, &files);

    assert!(graph.node("Ghost").unwrap().is_phantom());
    assert!(!graph.node("Home").unwrap().is_phantom());
    assert_eq!(graph.node("Home").unwrap().reference_count, 1);
}

#[test]
fn missing_pages_threshold_is_inclusive() {
    let mut links = Vec::new();
    for source in ["S1", "S2", "S3", "S4"] {
        links.push(link(source, "Alice Johnson"));
        links.push(link(source, "Sprint 23"));
    }
    links.push(link("S5", "Sprint 23"));
    links.push(link("S5", "Sprint 23"));

    let graph = build_link_graph(&links, &[]);
    let index = build_missing_pages_index(&graph, 5);
    assert_eq!(index.threshold, 5);
    assert_eq!(index.pages.len(), 1);
    assert_eq!(index.pages[0].name, "Sprint 23");
    assert_eq!(index.pages[0].reference_count, 5);
    assert_eq!(index.pages[0].page_type, PageType::Project);
    assert_eq!(index.pages[0].referenced_from, vec!["S1", "S2", "S3", "S4", "S5"]);

    let lower = build_missing_pages_index(&graph, 4);
    let names: Vec<&str> = lower.pages.iter().map(|page| page.name.as_str()).collect();
    assert_eq!(names, vec!["Sprint 23", "Alice Johnson"]);
    assert_eq!(lower.pages[1].page_type, PageType::Person);
}

#[test]
fn missing_page_sources_are_capped_at_ten() {
    let links: Vec<LinkRecord> = (0..12).map(|n| link(&format!("S{n:02}"), "Roadmap")).collect();
    let graph = build_link_graph(&links, &[]);
    let index = build_missing_pages_index(&graph, 5);
    assert_eq!(index.pages[0].reference_count, 12);
    assert_eq!(index.pages[0].referenced_from.len(), 10);
}

#[test]
fn timeline_buckets_journal_tasks_newest_first() {
    let files = vec![
        NoteFile::new("journals/2025_11_05.md", NoteKind::Journal),
        NoteFile::new("journals/2025-11-06.md", NoteKind::Journal),
        NoteFile::new("journals/notes.md", NoteKind::Journal),
        NoteFile::new("pages/2025_11_07.md", NoteKind::Page),
    ];
    let mut urgent = TaskRecord::new(TaskStatus::Now, "Fix outage", "journals/2025-11-06.md", 1);
    urgent.priority = Priority::A;
    let tasks = vec![
        logged(urgent, at(2025, 11, 6, 9), 2),
        TaskRecord::new(TaskStatus::Todo, "Write", "journals/2025-11-06.md", 2),
        TaskRecord::new(TaskStatus::Done, "Read", "journals/2025_11_05.md", 1),
        TaskRecord::new(TaskStatus::Todo, "Page task", "pages/Inbox.md", 1),
    ];

    let timeline = build_timeline_index(&tasks, &files);
    let dates: Vec<NaiveDate> = timeline.days.iter().map(|day| day.date).collect();
    assert_eq!(
        dates,
        vec![
            NaiveDate::from_ymd_opt(2025, 11, 6).unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 5).unwrap(),
        ]
    );

    let newest = &timeline.days[0];
    assert_eq!(newest.tasks.len(), 2);
    assert_eq!(newest.time_logged, TimeDelta::hours(2));
    assert_eq!(
        newest.key_activity,
        vec!["1 NOW task", "1 TODO task", "🔥 Fix outage"]
    );
}

#[test]
fn week_start_anchors_on_monday() {
    let monday = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
    assert_eq!(week_start(at(2025, 11, 9, 23)), monday);
    assert_eq!(week_start(at(2025, 11, 5, 8)), monday);
    assert_eq!(
        week_start(at(2025, 11, 10, 0)),
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    );
}

#[test]
fn time_tracking_reports_adoption_and_averages() {
    let mut phoenix = TaskRecord::new(TaskStatus::Doing, "Build", "pages/A.md", 1);
    phoenix.page_refs = vec!["Phoenix".to_string()];
    let phoenix = logged(logged(phoenix, at(2025, 11, 3, 9), 3), at(2025, 11, 10, 9), 2);
    let loose = logged(
        TaskRecord::new(TaskStatus::Done, "Tidy", "pages/A.md", 2),
        at(2025, 11, 4, 9),
        3,
    );
    let untracked = TaskRecord::new(TaskStatus::Todo, "Someday", "pages/A.md", 3);

    let index = build_time_tracking_index(&[phoenix, loose, untracked]);
    let stats = &index.statistics;

    assert_eq!(index.total_time_logged, TimeDelta::hours(8));
    assert_eq!(stats.tasks_with_tracking, 2);
    assert_eq!(stats.tasks_without_tracking, 1);
    assert!((stats.adoption_rate - 66.666).abs() < 0.01);
    assert_eq!(stats.avg_time_per_task, TimeDelta::hours(4));

    assert_eq!(index.top_projects[0].project, "Phoenix");
    assert_eq!(index.top_projects[0].time_logged, TimeDelta::hours(5));
    assert_eq!(index.top_projects[0].avg_time_per_task, TimeDelta::hours(5));
    assert_eq!(index.top_projects[1].project, NO_PROJECT);
    assert_eq!(index.top_projects[1].time_logged, TimeDelta::hours(3));

    let weeks: Vec<(NaiveDate, TimeDelta, usize)> = index
        .weekly_summary
        .iter()
        .map(|week| (week.week_start, week.time_logged, week.entry_count))
        .collect();
    assert_eq!(
        weeks,
        vec![
            (NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(), TimeDelta::hours(2), 1),
            (NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(), TimeDelta::hours(6), 2),
        ]
    );
    assert_eq!(
        stats.most_productive_week.as_ref().unwrap().week_start,
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    );
    assert_eq!(index.by_week.get("2025-11-03"), Some(&TimeDelta::hours(6)));
    assert_eq!(index.by_status.get(&TaskStatus::Doing), Some(&TimeDelta::hours(5)));
}

#[test]
fn most_productive_week_tie_keeps_first_seen_week() {
    let later_week = logged(
        TaskRecord::new(TaskStatus::Done, "Review", "pages/A.md", 1),
        at(2025, 11, 10, 9),
        3,
    );
    let earlier_week = logged(
        TaskRecord::new(TaskStatus::Done, "Draft", "pages/A.md", 2),
        at(2025, 11, 4, 9),
        3,
    );

    let index = build_time_tracking_index(&[later_week, earlier_week]);
    let best = index.statistics.most_productive_week.unwrap();
    assert_eq!(best.week_start, NaiveDate::from_ymd_opt(2025, 11, 10).unwrap());
    assert_eq!(best.time_logged, TimeDelta::hours(3));
}

#[test]
fn zero_duration_logs_count_as_tasks_but_not_time() {
    let mut ghost = TaskRecord::new(TaskStatus::Todo, "Started and stopped", "pages/A.md", 1);
    ghost.page_refs = vec!["Ghost".to_string()];
    let ghost = logged(ghost, at(2025, 11, 17, 9), 0);
    let tracked = logged(
        TaskRecord::new(TaskStatus::Done, "Tidy", "pages/A.md", 2),
        at(2025, 11, 4, 9),
        2,
    );

    let index = build_time_tracking_index(&[ghost, tracked]);
    let stats = &index.statistics;

    assert_eq!(stats.total_tasks, 2);
    assert_eq!(stats.tasks_with_tracking, 1);
    assert_eq!(stats.tasks_without_tracking, 1);
    assert!((stats.adoption_rate - 50.0).abs() < 1e-9);
    assert!(!index.by_project.contains_key("Ghost"));
    assert!(!index.by_week.contains_key("2025-11-17"));
    assert_eq!(index.by_week.len(), 1);
    assert!(index.top_projects.iter().all(|project| project.project != "Ghost"));
}

#[test]
fn weekly_counts_are_per_log_entry() {
    let busy = logged(
        logged(
            TaskRecord::new(TaskStatus::Doing, "Build", "pages/A.md", 1),
            at(2025, 11, 3, 9),
            1,
        ),
        at(2025, 11, 5, 9),
        2,
    );

    let index = build_time_tracking_index(&[busy]);
    assert_eq!(index.weekly_summary.len(), 1);
    assert_eq!(index.weekly_summary[0].entry_count, 2);
    assert_eq!(index.weekly_summary[0].time_logged, TimeDelta::hours(3));
}

#[test]
fn builders_tolerate_saturated_durations_and_huge_windows() {
    let content = "\
- DONE [[Phoenix]] runaway timer
  :LOGBOOK:
  CLOCK: [2025-04-06 Sun 10:00:00]--[2025-04-06 Sun 12:00:00] =>  2000000000000:00:00
  CLOCK: [2025-04-07 Mon 10:00:00]--[2025-04-07 Mon 12:00:00] =>  2000000000000:00:00
  :END:
- TODO follow up
";
    let tasks = parse_tasks(content, "journals/2025_04_06.md");
    let files = vec![NoteFile::new("journals/2025_04_06.md", NoteKind::Journal)];

    let task_index = build_task_index_at(&tasks, at(2025, 4, 8, 12), i64::MAX);
    assert_eq!(task_index.statistics.total_time_logged, TimeDelta::MAX);
    assert_eq!(task_index.recent.len(), 1);

    let tracking = build_time_tracking_index(&tasks);
    assert_eq!(tracking.total_time_logged, TimeDelta::MAX);
    assert_eq!(tracking.by_project.get("Phoenix"), Some(&TimeDelta::MAX));
    assert_eq!(tracking.by_week.get("2025-03-31"), Some(&TimeDelta::hours(2_000_000_000_000)));
    assert_eq!(tracking.by_week.get("2025-04-07"), Some(&TimeDelta::hours(2_000_000_000_000)));

    let timeline = build_timeline_index(&tasks, &files);
    assert_eq!(timeline.days[0].time_logged, TimeDelta::MAX);
}
