//! Aggregation, ranking and enrolment checks over the bundled sample files

use my_school::core::loader::{load_records, InputFiles};
use my_school::core::metrics::{
    course_summary, grade_point, pass_rate, student_gpa_100, student_gpa_4, student_metrics,
    weighted_gpa,
};
use my_school::core::models::{
    CategoryCode, CourseId, LevelCode, RecordDefaults, RecordStore, StudentId,
};
use my_school::core::ranking::{
    apply_enrolment_checks, best_students, check_enrolment, hardest_courses, rank_courses,
    rank_students, EnrolmentPolicy,
};
use std::path::Path;

fn sample_store() -> RecordStore {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("samples");
    load_records(&InputFiles::in_dir(&dir), &RecordDefaults::default()).expect("samples load")
}

fn sid(id: &str) -> StudentId {
    StudentId::parse(id).unwrap()
}

fn cid(id: &str) -> CourseId {
    CourseId::parse(id).unwrap()
}

fn ids<T>(items: &[T], id: impl Fn(&T) -> String) -> Vec<String> {
    items.iter().map(id).collect()
}

#[test]
fn pass_rate_ignores_ongoing_results() {
    let store = sample_store();
    assert_eq!(pass_rate(store.results()), Some(87.5));
}

#[test]
fn course_summaries_count_each_student_once() {
    let store = sample_store();

    let cosc111 = course_summary(&cid("COSC111"), store.results());
    assert_eq!((cosc111.finished, cosc111.ongoing), (3, 0));
    assert_eq!(cosc111.average, Some(64.33));

    let math201 = course_summary(&cid("MATH201"), store.results());
    assert_eq!((math201.finished, math201.ongoing), (1, 1));
    assert_eq!(math201.average, Some(79.5));
}

#[test]
fn student_figures_match_hand_calculation() {
    let store = sample_store();

    assert_eq!(student_gpa_100(&sid("S001"), store.results()), Some(73.67));
    let gpa4 = student_gpa_4(&sid("S001"), store.results());
    assert_eq!(gpa4.points, vec![4, 3, 2]);
    assert!((gpa4.gpa - 3.0).abs() < f64::EPSILON);
    assert_eq!(
        weighted_gpa(&sid("S001"), store.results(), store.courses()),
        Some(3.2)
    );

    // elective credit defaulted to 6 for MATH201
    assert_eq!(
        weighted_gpa(&sid("S003"), store.results(), store.courses()),
        Some(2.0)
    );

    let metrics = student_metrics(&sid("S002"), &store);
    assert_eq!(metrics.gpa_100, Some(69.0));
    assert_eq!(metrics.enrolment.finished, 2);
    assert_eq!(metrics.enrolment.ongoing, 1);
}

#[test]
fn grade_point_band_edges() {
    assert_eq!(grade_point(49.49), 0);
    assert_eq!(grade_point(49.5), 1);
    assert_eq!(grade_point(59.5), 2);
    assert_eq!(grade_point(69.49), 2);
    assert_eq!(grade_point(69.5), 3);
    assert_eq!(grade_point(79.5), 4);
    assert_eq!(grade_point(100.0), 4);
}

#[test]
fn course_rankings_and_hardest() {
    let store = sample_store();

    let core = rank_courses(&store, CategoryCode::Core);
    assert_eq!(
        ids(&core, |r| r.course.id().to_string()),
        vec!["COSC112", "COSC111"]
    );
    let hardest = hardest_courses(&core);
    assert_eq!(ids(&hardest, |r| r.course.id().to_string()), vec!["COSC111"]);

    let electives = rank_courses(&store, CategoryCode::Elective);
    assert_eq!(
        ids(&electives, |r| r.course.id().to_string()),
        vec!["MATH201", "ISYS220"]
    );
    assert_eq!(
        ids(&hardest_courses(&electives), |r| r.course.id().to_string()),
        vec!["ISYS220"]
    );
}

#[test]
fn student_rankings_are_stable_on_ties() {
    let store = sample_store();

    let pg = rank_students(&store, LevelCode::Postgraduate);
    // both have a WGPA of 2.00, so input order is kept
    assert_eq!(
        ids(&pg, |r| r.student.id().to_string()),
        vec!["S002", "S003"]
    );
    assert_eq!(
        ids(&best_students(&pg), |r| r.student.id().to_string()),
        vec!["S003"]
    );

    let ug = rank_students(&store, LevelCode::Undergraduate);
    assert_eq!(
        ids(&ug, |r| r.student.id().to_string()),
        vec!["S001", "S004"]
    );
}

#[test]
fn enrolment_checks_mark_each_name_once() {
    let mut store = sample_store();
    let policy = EnrolmentPolicy::default();

    assert_eq!(apply_enrolment_checks(&mut store, &policy), 2);
    assert_eq!(apply_enrolment_checks(&mut store, &policy), 0);
    assert!(!check_enrolment(&mut store, &sid("S004"), &policy));

    let names: Vec<&str> = store.students().iter().map(|s| s.name()).collect();
    assert_eq!(
        names,
        vec!["Alice Nguyen", "Bob Smith (!)", "Chen Li", "Dana Kaur (!)"]
    );
}

#[test]
fn enrolment_thresholds_follow_policy() {
    let mut store = sample_store();
    let strict = EnrolmentPolicy {
        postgraduate_part_time_min: 3,
        marker: "*".to_string(),
        ..EnrolmentPolicy::default()
    };

    assert!(check_enrolment(&mut store, &sid("S003"), &strict));
    assert_eq!(store.get_student(&sid("S003")).unwrap().name(), "Chen Li *");
}

#[test]
fn aggregation_is_deterministic() {
    let first = sample_store();
    let second = sample_store();
    for student in first.students() {
        assert_eq!(
            student_metrics(student.id(), &first),
            student_metrics(student.id(), &second)
        );
    }
    for course in first.courses() {
        assert_eq!(
            course_summary(course.id(), first.results()),
            course_summary(course.id(), second.results())
        );
    }
}
