//! Report rendering and sink behaviour

use my_school::core::loader::{load_records, InputFiles};
use my_school::core::models::{RecordDefaults, RecordStore};
use my_school::core::ranking::{apply_enrolment_checks, EnrolmentPolicy};
use my_school::core::report::sink::RULE_WIDTH;
use my_school::core::report::{
    AppendFileSink, ReportContext, ReportGenerator, ReportSink, TeeSink, TextReporter,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn checked_sample_store() -> RecordStore {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");
    let mut store = load_records(&InputFiles::in_dir(&dir), &RecordDefaults::default())
        .expect("samples load");
    apply_enrolment_checks(&mut store, &EnrolmentPolicy::default());
    store
}

fn render(store: &RecordStore) -> String {
    TextReporter::new().render(&ReportContext::build(store))
}

fn student_row<'a>(report: &'a str, id: &str) -> Vec<&'a str> {
    report
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>())
        .find(|cells| cells.first() == Some(&id) && cells.iter().any(|c| *c == "UG" || *c == "PG"))
        .unwrap_or_else(|| panic!("no student row for {id}"))
}

fn line_starting_with<'a>(report: &'a str, prefix: &str) -> &'a str {
    report
        .lines()
        .find(|line| line.starts_with(prefix))
        .unwrap_or_else(|| panic!("no line starting with {prefix:?}"))
}

#[test]
fn sections_appear_in_order() {
    let report = render(&checked_sample_store());
    let positions: Vec<usize> = [
        "- RESULTS -",
        "RESULTS SUMMARY",
        "- COURSE INFORMATION -",
        "CORE COURSES",
        "ELECTIVE COURSES",
        "COURSE SUMMARY",
        "- STUDENT INFORMATION -",
        "UNDERGRADUATE STUDENTS",
        "POSTGRADUATE STUDENTS",
        "STUDENT SUMMARY",
    ]
    .iter()
    .map(|heading| report.find(heading).expect(heading))
    .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(!report.contains("{{"));
}

#[test]
fn results_grid_shows_grades_and_placeholders() {
    let report = render(&checked_sample_store());

    let header = line_starting_with(&report, "Student ID");
    let header_ids: Vec<&str> = header.split_whitespace().skip(2).collect();
    assert_eq!(header_ids, vec!["COSC111", "COSC112", "ISYS220", "MATH201"]);

    let alice: Vec<&str> = line_starting_with(&report, "S001 ").split_whitespace().collect();
    assert_eq!(alice, vec!["S001", "85", "72", "64", "--"]);

    // S003 has no COSC111 or ISYS220 result, so those cells are blank
    let chen: Vec<&str> = line_starting_with(&report, "S003 ").split_whitespace().collect();
    assert_eq!(chen, vec!["S003", "55", "79.5"]);
}

#[test]
fn summaries_report_counts_and_call_outs() {
    let report = render(&checked_sample_store());

    assert!(report.contains("Total Students: 4. Total Courses: 4."));
    assert!(report.contains("Pass Rate: 87.50%."));
    assert!(report.contains(
        "Hardest Core Course(s):\nCOSC111 (Programming Fundamentals), Average score: 64.33."
    ));
    assert!(report
        .contains("Hardest Elective Course(s):\nISYS220 (Databases), Average score: 64.00."));
    assert!(report.contains("Best UG Student(s):\nS001 (Alice Nguyen), GPA: 3.00."));
    assert!(report.contains("Best PG Student(s):\nS003 (Chen Li), GPA: 2.50."));
}

#[test]
fn student_rows_carry_marker_and_figures() {
    let report = render(&checked_sample_store());

    assert!(report.contains("Dana Kaur (!)"));
    assert!(report.contains("Bob Smith (!)"));
    assert!(!report.contains("Alice Nguyen (!)"));

    let alice = student_row(&report, "S001");
    assert_eq!(
        alice,
        vec!["S001", "Alice", "Nguyen", "UG", "FT", "73.67", "3.00", "3.20", "3", "1"]
    );
}

#[test]
fn missing_values_render_as_placeholders() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("results.txt"), "S001, COSC111,\n").unwrap();
    fs::write(dir.path().join("courses.txt"), "COSC111, C, Programming, 12\n").unwrap();
    fs::write(dir.path().join("students.txt"), "S001, Ann, UG\n").unwrap();

    let store = load_records(&InputFiles::in_dir(dir.path()), &RecordDefaults::default())
        .expect("valid inputs");
    let report = render(&store);

    assert!(report.contains("Pass Rate: N/A."));
    assert!(report.contains("Hardest Core Course(s):\nNone"));
    assert!(report.contains("Hardest Elective Course(s):\nNone"));
    assert!(report.contains("Best PG Student(s):\nNone"));

    assert_eq!(
        student_row(&report, "S001"),
        vec!["S001", "Ann", "UG", "FT", "--", "0.00", "--", "0", "1"]
    );
}

#[test]
fn rendering_twice_gives_identical_text() {
    let mut store = checked_sample_store();
    let first = render(&store);
    apply_enrolment_checks(&mut store, &EnrolmentPolicy::default());
    let second = render(&store);
    assert_eq!(first, second);
}

#[test]
fn report_file_is_append_only() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("out").join("reports.txt");
    let store = checked_sample_store();
    let ctx = ReportContext::build(&store);
    let reporter = TextReporter::new();

    let mut sink = AppendFileSink::new(&path);
    reporter.generate(&ctx, &mut sink).expect("first write");
    let after_first = fs::read_to_string(&path).expect("report file exists");
    reporter.generate(&ctx, &mut sink).expect("second write");
    let after_second = fs::read_to_string(&path).expect("report file exists");

    assert!(after_second.starts_with(&after_first));
    assert_eq!(after_second.matches("This report was generated on: ").count(), 2);

    let rule = "-".repeat(RULE_WIDTH);
    let appended = &after_second[after_first.len()..];
    assert!(after_first.starts_with(&format!("{rule}\n\nThis report was generated on: ")));
    assert!(appended.starts_with(&format!("{rule}\n\nThis report was generated on: ")));

    // Everything after the timestamp line is the unchanged report body
    let body = |chunk: &str| {
        chunk
            .split_once("generated on: ")
            .and_then(|(_, rest)| rest.split_once('\n'))
            .map(|(_, body)| body.to_string())
    };
    assert_eq!(body(&after_first), Some(reporter.render(&ctx)));
    assert_eq!(body(appended), body(&after_first));
}

#[test]
fn tee_sink_writes_every_destination() {
    let dir = TempDir::new().expect("temp dir");
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    let mut tee = TeeSink::new()
        .with(AppendFileSink::new(&a))
        .with(AppendFileSink::new(&b));
    tee.emit("report body\n").expect("emit");

    for path in [a, b] {
        let content = fs::read_to_string(path).expect("written");
        assert!(content.ends_with("report body\n"));
    }
}
