use chrono::{NaiveDate, NaiveDateTime};
use kbindex_core::report::{render_missing_pages, render_tasks_by_status, REPORT_FILES};
use kbindex_core::{
    build_indexes, extract_notes, scan_repository, write_reports, IndexerConfig, ReportContext,
    TaskStatus,
};
use std::fs;
use std::path::Path;

const TODAY: &str = "\
- NOW [#A] Prepare [[Sprint 23]] demo
  :LOGBOOK:
  CLOCK: [2025-11-06 Thu 09:00:00]--[2025-11-06 Thu 11:30:00] =>  02:30:00
  :END:
- TODO Email [[Alice Johnson]] about [[Sprint 23]]
";

const YESTERDAY: &str = "\
- DONE Retro with [[Alice Johnson]]
- notes on [[Sprint 23]]
";

const PROJECT_PAGE: &str = "\
- LATER Collect feedback for [[Sprint 23]]
- Owner: [[Alice Johnson]]
";

fn write_note(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 11, 6)
        .unwrap()
        .and_hms_opt(18, 0, 0)
        .unwrap()
}

fn sample_repository(root: &Path) {
    write_note(root, "journals/2025_11_06.md", TODAY);
    write_note(root, "journals/2025_11_05.md", YESTERDAY);
    write_note(root, "pages/Launch Plan.md", PROJECT_PAGE);
    write_note(root, "pages/Empty.md", "just text\n");
    write_note(root, "pages/.recycle/Old.md", "- TODO ignored\n");
}

#[test]
fn full_run_builds_consistent_indexes() {
    let dir = tempfile::tempdir().unwrap();
    sample_repository(dir.path());

    let files = scan_repository(dir.path()).unwrap();
    assert_eq!(files.len(), 4);

    let config = IndexerConfig {
        missing_page_threshold: 3,
        ..IndexerConfig::default()
    };
    let extraction = extract_notes(&files, &config);
    assert_eq!(extraction.stats.files_read, 4);
    assert_eq!(extraction.stats.read_errors, 0);
    assert_eq!(extraction.stats.tasks, 4);
    assert_eq!(extraction.stats.links, 7);

    let indexes = build_indexes(&extraction, &files, &config, now());
    assert_eq!(indexes.tasks.total_tasks, 4);
    assert_eq!(indexes.tasks.tasks_with_status(TaskStatus::Now).len(), 1);
    assert_eq!(indexes.tasks.recent.len(), 1);
    assert_eq!(indexes.timeline.days.len(), 2);
    assert_eq!(indexes.graph.hub_pages, vec!["Alice Johnson", "Sprint 23"]);
    assert_eq!(indexes.graph.orphan_pages(), vec!["Empty"]);

    let missing: Vec<&str> = indexes
        .missing_pages
        .pages
        .iter()
        .map(|page| page.name.as_str())
        .collect();
    assert_eq!(missing, vec!["Alice Johnson", "Sprint 23"]);
}

#[test]
fn reports_are_written_to_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    sample_repository(dir.path());
    let config = IndexerConfig::default();

    let files = scan_repository(dir.path()).unwrap();
    let extraction = extract_notes(&files, &config);
    let indexes = build_indexes(&extraction, &files, &config, now());
    let ctx = ReportContext::new(now(), &config);
    let out_dir = config.output_path(dir.path());

    let written = write_reports(&indexes, &extraction.stats, &out_dir, &ctx).unwrap();
    assert_eq!(written.len(), REPORT_FILES.len());
    for file_name in REPORT_FILES {
        assert!(out_dir.join(file_name).is_file(), "{file_name} missing");
    }

    let dashboard = fs::read_to_string(out_dir.join("dashboard.md")).unwrap();
    assert!(dashboard.starts_with("# Knowledge Dashboard\n"));
    assert!(dashboard.contains("**Generated**: 2025-11-06T18:00:00"));
    assert!(dashboard.contains("- **[NOW]** Prepare [[Sprint 23]] demo `journals/2025_11_06.md:1`"));
    assert!(dashboard.contains("- **Sprint 23**: 2h 30m (2 active tasks)"));

    let recent = fs::read_to_string(out_dir.join("timeline-recent.md")).unwrap();
    assert!(recent.contains("**Last 7 Days**: 2 days with activity"));
    assert!(recent.contains("## Thursday, November 6, 2025"));
}

#[test]
fn renderers_handle_empty_indexes() {
    let dir = tempfile::tempdir().unwrap();
    let config = IndexerConfig::default();
    let files = scan_repository(dir.path()).unwrap();
    let extraction = extract_notes(&files, &config);
    let indexes = build_indexes(&extraction, &files, &config, now());
    let ctx = ReportContext::new(now(), &config);

    let missing = render_missing_pages(&indexes.missing_pages, &ctx);
    assert!(missing.contains("*No missing pages with 5+ references found.*"));

    let tasks = render_tasks_by_status(&indexes.tasks, &ctx);
    assert!(tasks.contains("- **Total Tasks**: 0"));
    assert!(tasks.contains("- **Completion Rate**: 0.0% (0 DONE)"));
}

#[test]
fn undecodable_notes_are_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_note(dir.path(), "pages/Good.md", "- TODO fine\n");
    fs::write(dir.path().join("pages/Bad.md"), [0xff, 0xfe, 0x00]).unwrap();

    let files = scan_repository(dir.path()).unwrap();
    let extraction = extract_notes(&files, &IndexerConfig::default());
    assert_eq!(extraction.stats.files_scanned, 2);
    assert_eq!(extraction.stats.read_errors, 1);
    assert_eq!(extraction.tasks.len(), 1);
}
