//! Academic aggregation: pass rates, course summaries, GPA and enrolment counts
//!
//! Every function is a read-only query over the loaded records and is
//! recomputed on each call.

use crate::core::models::{Course, CourseId, RecordStore, ResultRecord, StudentId};
use std::collections::HashSet;
use std::hash::Hash;

/// Lowest grade that counts as a pass (inclusive)
pub const PASS_MARK: f64 = 49.5;

/// Lower bounds of each grade-point band, highest first.
/// Grades below the last bound earn 0 points.
pub const GRADE_POINT_BANDS: [(f64, u8); 4] = [(79.5, 4), (69.5, 3), (59.5, 2), (49.5, 1)];

/// Per-course completion statistics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CourseSummary {
    /// Distinct students with a grade
    pub finished: usize,
    /// Distinct students still enrolled without a grade
    pub ongoing: usize,
    /// Mean of counted grades, `None` when nobody has finished
    pub average: Option<f64>,
}

/// GPA on the 4-point scale together with the points it was built from
#[derive(Debug, Clone, PartialEq)]
pub struct GradePoints {
    /// Mean grade point, `0.0` when the student has no grades
    pub gpa: f64,
    /// One grade point per graded result, in result order
    pub points: Vec<u8>,
}

/// Distinct-course enrolment counts for a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrolmentCounts {
    /// Courses with a grade
    pub finished: usize,
    /// Courses still in progress
    pub ongoing: usize,
}

impl EnrolmentCounts {
    /// Finished plus ongoing enrolments
    #[must_use]
    pub const fn total(&self) -> usize {
        self.finished + self.ongoing
    }
}

/// All per-student figures shown in the student tables
#[derive(Debug, Clone, PartialEq)]
pub struct StudentMetrics {
    /// Mean raw grade
    pub gpa_100: Option<f64>,
    /// 4-point GPA
    pub gpa_4: f64,
    /// Credit-weighted 4-point GPA
    pub weighted_gpa: Option<f64>,
    /// Enrolment counts
    pub enrolment: EnrolmentCounts,
}

/// Round to two decimal places, sending exact halves to the even neighbour
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Map a grade to its grade point
#[must_use]
pub fn grade_point(grade: f64) -> u8 {
    GRADE_POINT_BANDS
        .iter()
        .find(|(lower, _)| grade >= *lower)
        .map_or(0, |(_, points)| *points)
}

/// Percentage of graded results that pass, rounded to 2 decimals.
///
/// Ongoing results are left out of the denominator. Returns `None` when no
/// result has been graded.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pass_rate(results: &[ResultRecord]) -> Option<f64> {
    let graded: Vec<f64> = results.iter().filter_map(ResultRecord::grade).collect();
    if graded.is_empty() {
        return None;
    }
    let passing = graded.iter().filter(|g| **g >= PASS_MARK).count();
    Some(round2(passing as f64 / graded.len() as f64 * 100.0))
}

/// Keep only the first row seen for each key, preserving its grade state
fn first_encounters<K, I>(rows: I) -> Vec<Option<f64>>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, Option<f64>)>,
{
    let mut seen = HashSet::new();
    let mut states = Vec::new();
    for (key, grade) in rows {
        if seen.insert(key) {
            states.push(grade);
        }
    }
    states
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Finished/ongoing counts and average grade for one course.
///
/// Each student is counted once, using the first result row that mentions
/// them for this course; the average uses the same rows.
#[must_use]
pub fn course_summary(course: &CourseId, results: &[ResultRecord]) -> CourseSummary {
    let states = first_encounters(
        results
            .iter()
            .filter(|r| r.course() == course)
            .map(|r| (r.student(), r.grade())),
    );
    let scores: Vec<f64> = states.iter().flatten().copied().collect();

    CourseSummary {
        finished: scores.len(),
        ongoing: states.len() - scores.len(),
        average: mean(&scores).map(round2),
    }
}

fn grades_for<'a>(
    student: &'a StudentId,
    results: &'a [ResultRecord],
) -> impl Iterator<Item = &'a ResultRecord> + 'a {
    results
        .iter()
        .filter(move |r| r.student() == student && r.is_graded())
}

/// Mean of every graded result for a student, rounded to 2 decimals
#[must_use]
pub fn student_gpa_100(student: &StudentId, results: &[ResultRecord]) -> Option<f64> {
    let grades: Vec<f64> = grades_for(student, results)
        .filter_map(ResultRecord::grade)
        .collect();
    mean(&grades).map(round2)
}

/// GPA on the 4-point scale.
///
/// A student without grades gets `0.0` and no points rather than `None`;
/// callers that need to tell the two apart should check `points`.
#[must_use]
pub fn student_gpa_4(student: &StudentId, results: &[ResultRecord]) -> GradePoints {
    let points: Vec<u8> = grades_for(student, results)
        .filter_map(ResultRecord::grade)
        .map(grade_point)
        .collect();
    let as_f64: Vec<f64> = points.iter().copied().map(f64::from).collect();

    GradePoints {
        gpa: mean(&as_f64).map_or(0.0, round2),
        points,
    }
}

/// Credit points of a course, `None` if it is not in the catalogue
#[must_use]
pub fn credit_points(course: &CourseId, courses: &[Course]) -> Option<f64> {
    courses
        .iter()
        .find(|c| c.id() == course)
        .map(Course::credit_points)
}

/// Credit-weighted 4-point GPA.
///
/// Returns `None` when a graded result names a course missing from
/// `courses`, or when the total weight is zero (which includes having no
/// grades at all).
#[must_use]
pub fn weighted_gpa(
    student: &StudentId,
    results: &[ResultRecord],
    courses: &[Course],
) -> Option<f64> {
    let GradePoints { points, .. } = student_gpa_4(student, results);
    let credits: Vec<f64> = grades_for(student, results)
        .filter_map(|r| credit_points(r.course(), courses))
        .collect();

    if credits.len() != points.len() {
        return None;
    }

    let total_credits: f64 = credits.iter().sum();
    if total_credits == 0.0 {
        return None;
    }

    let weighted: f64 = points
        .iter()
        .zip(&credits)
        .map(|(point, credit)| f64::from(*point) * credit)
        .sum();
    Some(round2(weighted / total_credits))
}

/// Distinct-course finished/ongoing counts for a student
#[must_use]
pub fn enrolment_counts(student: &StudentId, results: &[ResultRecord]) -> EnrolmentCounts {
    let states = first_encounters(
        results
            .iter()
            .filter(|r| r.student() == student)
            .map(|r| (r.course(), r.grade())),
    );
    let finished = states.iter().filter(|g| g.is_some()).count();

    EnrolmentCounts {
        finished,
        ongoing: states.len() - finished,
    }
}

/// Compute every student figure at once
#[must_use]
pub fn student_metrics(student: &StudentId, store: &RecordStore) -> StudentMetrics {
    StudentMetrics {
        gpa_100: student_gpa_100(student, store.results()),
        gpa_4: student_gpa_4(student, store.results()).gpa,
        weighted_gpa: weighted_gpa(student, store.results(), store.courses()),
        enrolment: enrolment_counts(student, store.results()),
    }
}
