//! Ranking, tie handling and enrolment-sufficiency checks

use crate::core::metrics::{self, CourseSummary, StudentMetrics};
use crate::core::models::{
    CategoryCode, Course, CourseCategory, LevelCode, RecordStore, Student, StudentId,
    StudentLevel, StudyMode,
};
use crate::{debug, info};
use std::cmp::Ordering;

/// Minimum enrolments per student level and the marker shown when unmet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolmentPolicy {
    /// Minimum for undergraduates
    pub undergraduate_min: usize,
    /// Minimum for full-time postgraduates
    pub postgraduate_full_time_min: usize,
    /// Minimum for part-time postgraduates
    pub postgraduate_part_time_min: usize,
    /// Text appended to the name of an under-enrolled student
    pub marker: String,
}

impl Default for EnrolmentPolicy {
    fn default() -> Self {
        Self {
            undergraduate_min: 4,
            postgraduate_full_time_min: 4,
            postgraduate_part_time_min: 2,
            marker: "(!)".to_string(),
        }
    }
}

impl EnrolmentPolicy {
    /// Minimum number of enrolments (finished + ongoing) for a level
    #[must_use]
    pub const fn minimum_for(&self, level: StudentLevel) -> usize {
        match level {
            StudentLevel::Undergraduate { .. } => self.undergraduate_min,
            StudentLevel::Postgraduate {
                mode: StudyMode::FullTime,
            } => self.postgraduate_full_time_min,
            StudentLevel::Postgraduate {
                mode: StudyMode::PartTime,
            } => self.postgraduate_part_time_min,
        }
    }
}

/// Check one student's enrolment load and mark their name if it is too low.
///
/// The marker is appended at most once, so repeated checks are harmless.
/// Returns `true` only when this call added the marker.
pub fn check_enrolment(
    store: &mut RecordStore,
    student_id: &StudentId,
    policy: &EnrolmentPolicy,
) -> bool {
    let enrolled = metrics::enrolment_counts(student_id, store.results()).total();
    let Some(student) = store.get_student_mut(student_id) else {
        return false;
    };
    let minimum = policy.minimum_for(student.level());
    if enrolled >= minimum {
        return false;
    }
    let marked = student.mark_name(&policy.marker);
    if marked {
        info!("Student {student_id} has {enrolled} enrolment(s), below the minimum of {minimum}");
    }
    marked
}

/// Run [`check_enrolment`] for every student, returning how many names changed
pub fn apply_enrolment_checks(store: &mut RecordStore, policy: &EnrolmentPolicy) -> usize {
    let ids: Vec<StudentId> = store.students().iter().map(|s| s.id().clone()).collect();
    let marked = ids
        .iter()
        .filter(|id| check_enrolment(store, id, policy))
        .count();
    debug!("Enrolment check marked {marked} of {} student(s)", ids.len());
    marked
}

/// A course with its computed summary
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCourse<'a> {
    /// The course
    pub course: &'a Course,
    /// Its completion statistics
    pub summary: CourseSummary,
}

/// A student with their computed figures
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStudent<'a> {
    /// The student
    pub student: &'a Student,
    /// Their GPA and enrolment figures
    pub metrics: StudentMetrics,
}

/// Descending order with missing values last
fn descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

const fn in_category(category: &CourseCategory, code: CategoryCode) -> bool {
    matches!(
        (category, code),
        (CourseCategory::Core, CategoryCode::Core)
            | (CourseCategory::Elective { .. }, CategoryCode::Elective)
    )
}

const fn in_level(level: StudentLevel, code: LevelCode) -> bool {
    matches!(
        (level, code),
        (StudentLevel::Undergraduate { .. }, LevelCode::Undergraduate)
            | (StudentLevel::Postgraduate { .. }, LevelCode::Postgraduate)
    )
}

/// Courses of one category ordered by average grade, highest first.
///
/// The sort is stable: equal averages keep input order, and courses
/// without an average come last.
#[must_use]
pub fn rank_courses(store: &RecordStore, category: CategoryCode) -> Vec<RankedCourse<'_>> {
    let mut ranked: Vec<RankedCourse<'_>> = store
        .courses()
        .iter()
        .filter(|c| in_category(c.category(), category))
        .map(|course| RankedCourse {
            course,
            summary: metrics::course_summary(course.id(), store.results()),
        })
        .collect();
    ranked.sort_by(|a, b| descending(a.summary.average, b.summary.average));
    ranked
}

/// Every course sharing the lowest average; courses without an average are ignored
#[must_use]
#[allow(clippy::float_cmp)]
pub fn hardest_courses<'a>(ranked: &[RankedCourse<'a>]) -> Vec<RankedCourse<'a>> {
    let lowest = ranked
        .iter()
        .filter_map(|r| r.summary.average)
        .min_by(f64::total_cmp);
    let Some(lowest) = lowest else {
        return Vec::new();
    };
    ranked
        .iter()
        .filter(|r| r.summary.average == Some(lowest))
        .cloned()
        .collect()
}

/// Students of one level ordered by weighted GPA, highest first.
///
/// Stable like [`rank_courses`]; students without a weighted GPA come last.
#[must_use]
pub fn rank_students(store: &RecordStore, level: LevelCode) -> Vec<RankedStudent<'_>> {
    let mut ranked: Vec<RankedStudent<'_>> = store
        .students()
        .iter()
        .filter(|s| in_level(s.level(), level))
        .map(|student| RankedStudent {
            student,
            metrics: metrics::student_metrics(student.id(), store),
        })
        .collect();
    ranked.sort_by(|a, b| descending(a.metrics.weighted_gpa, b.metrics.weighted_gpa));
    ranked
}

/// Every student sharing the highest 4-point GPA
#[must_use]
#[allow(clippy::float_cmp)]
pub fn best_students<'a>(ranked: &[RankedStudent<'a>]) -> Vec<RankedStudent<'a>> {
    let Some(highest) = ranked.iter().map(|r| r.metrics.gpa_4).max_by(f64::total_cmp) else {
        return Vec::new();
    };
    ranked
        .iter()
        .filter(|r| r.metrics.gpa_4 == highest)
        .cloned()
        .collect()
}
