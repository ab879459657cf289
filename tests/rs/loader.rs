//! Integration tests for loading the three input files

use my_school::core::loader::{load_records, InputFiles};
use my_school::core::models::{CourseId, RecordDefaults, StudentId, StudyMode};
use my_school::core::{ErrorKind, SchoolError};
use std::fs;
use tempfile::TempDir;

const COURSES: &str = "COSC111, C, Programming, 12\nISYS220, E, Databases, , Sem1\n";
const STUDENTS: &str = "S001, Ann, UG\nS002, Ben, PG, PT\n";

fn write_inputs(results: &str, courses: &str, students: &str) -> (TempDir, InputFiles) {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("results.txt"), results).expect("write results");
    fs::write(dir.path().join("courses.txt"), courses).expect("write courses");
    fs::write(dir.path().join("students.txt"), students).expect("write students");
    let files = InputFiles::in_dir(dir.path());
    (dir, files)
}

fn load(results: &str, courses: &str, students: &str) -> Result<usize, SchoolError> {
    let (_dir, files) = write_inputs(results, courses, students);
    load_records(&files, &RecordDefaults::default()).map(|store| store.results().len())
}

#[test]
fn loads_valid_inputs_with_defaults_applied() {
    let (_dir, files) = write_inputs("S001, COSC111, 75\nS002, ISYS220,\n", COURSES, STUDENTS);
    let store = load_records(&files, &RecordDefaults::default()).expect("valid inputs");

    let elective = store
        .get_course(&CourseId::parse("ISYS220").unwrap())
        .unwrap();
    assert!((elective.credit_points() - 6.0).abs() < f64::EPSILON);

    let ug = store.get_student(&StudentId::parse("S001").unwrap()).unwrap();
    assert_eq!(ug.level().mode(), StudyMode::FullTime);

    assert_eq!(store.results()[0].grade(), Some(75.0));
    assert_eq!(store.results()[1].grade(), None);
}

#[test]
fn blank_lines_are_skipped() {
    let count = load("\nS001, COSC111, 75\n\n   \nS002, COSC111, 60\n", COURSES, STUDENTS)
        .expect("blank lines ignored");
    assert_eq!(count, 2);
}

#[test]
fn missing_files_are_listed_together() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("courses.txt"), COURSES).expect("write courses");

    let err = load_records(&InputFiles::in_dir(dir.path()), &RecordDefaults::default())
        .unwrap_err();
    let SchoolError::MissingInputs(missing) = &err else {
        panic!("expected missing inputs, got {err}");
    };
    assert_eq!(missing, &vec!["'Results' file", "'Student' file"]);

    let message = err.to_string();
    assert!(message.contains("\t- 'Results' file is missing."));
    assert!(message.contains("\t- 'Student' file is missing."));
}

#[test]
fn empty_results_file_is_rejected() {
    let err = load("\n\n", COURSES, STUDENTS).unwrap_err();
    assert!(matches!(err, SchoolError::EmptyResults(_)));
    assert_eq!(err.kind(), Some(ErrorKind::EmptyResultSet));
}

#[test]
fn invalid_grade_reports_file_and_line() {
    let err = load("S001, COSC111, 75\nS002, COSC111, 101\n", COURSES, STUDENTS).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidGrade));
    let SchoolError::Record { line, path, .. } = &err else {
        panic!("expected a line error, got {err}");
    };
    assert_eq!(*line, 2);
    assert!(path.ends_with("results.txt"));
}

#[test]
fn results_are_validated_before_courses_and_students() {
    let err = load("S001, COSC111, abc\n", "BAD, C, X, 1\n", "bad\n").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidGrade));

    let err = load("S001, COSC111, 50\n", "BAD, C, X, 1\n", "bad\n").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::InvalidIdentifier));
}

#[test]
fn every_course_rule_is_fatal() {
    let cases = [
        ("COSC11, C, Short, 12\n", ErrorKind::InvalidIdentifier),
        ("COSC111, X, Odd, 12\n", ErrorKind::InvalidType),
        ("COSC111, C, , 12\n", ErrorKind::InvalidName),
        ("COSC111, C, Programming, -3\n", ErrorKind::InvalidCreditPoints),
        ("ISYS220, E, Databases, 6, Semester1\n", ErrorKind::InvalidSemester),
        (
            "COSC111, C, Programming, 12\nCOSC111, C, Again, 12\n",
            ErrorKind::InvalidIdentifier,
        ),
    ];
    for (courses, kind) in cases {
        let err = load("S001, COSC111, 50\n", courses, STUDENTS).unwrap_err();
        assert_eq!(err.kind(), Some(kind), "courses {courses:?}");
    }
}

#[test]
fn every_student_rule_is_fatal() {
    let cases = [
        ("X001, Ann, UG\n", ErrorKind::InvalidIdentifier),
        ("S001, , UG\n", ErrorKind::InvalidName),
        ("S001, Ann, MG\n", ErrorKind::InvalidType),
        ("S001, Ann, PG, FULL\n", ErrorKind::InvalidStudyMode),
        ("S001, Ann, UG\nS001, Ann, UG\n", ErrorKind::InvalidIdentifier),
    ];
    for (students, kind) in cases {
        let err = load("S001, COSC111, 50\n", COURSES, students).unwrap_err();
        assert_eq!(err.kind(), Some(kind), "students {students:?}");
    }
}

#[test]
fn repeated_pairs_and_dangling_references_still_load() {
    let results = "S001, COSC111, 75\nS001, COSC111, 90\nS009, COSC111, 50\nS001, MATH101,\n";
    let (_dir, files) = write_inputs(results, COURSES, STUDENTS);
    let store = load_records(&files, &RecordDefaults::default()).expect("warnings only");

    assert_eq!(store.results().len(), 4);
    let first = store
        .find_result(
            &StudentId::parse("S001").unwrap(),
            &CourseId::parse("COSC111").unwrap(),
        )
        .unwrap();
    assert_eq!(first.grade(), Some(75.0));
    assert_eq!(store.dangling_references().len(), 2);
}

#[test]
fn configured_defaults_flow_into_records() {
    let (_dir, files) = write_inputs("S001, ISYS220, 70\n", COURSES, STUDENTS);
    let defaults = RecordDefaults {
        undergraduate_mode: StudyMode::PartTime,
        elective_credit_points: 3.0,
    };
    let store = load_records(&files, &defaults).expect("valid inputs");

    assert_eq!(store.students()[0].level().mode(), StudyMode::PartTime);
    assert!((store.courses()[1].credit_points() - 3.0).abs() < f64::EPSILON);
}
