//! Grade result model

use super::{CourseId, StudentId};
use crate::core::error::{ErrorKind, ValidationError};

/// Check that a grade lies in `[0, 100]`
///
/// # Errors
/// Returns `InvalidGrade` for non-finite or out-of-range values
pub fn validate_grade(grade: f64) -> Result<f64, ValidationError> {
    if !grade.is_finite() {
        return Err(ValidationError::new(
            ErrorKind::InvalidGrade,
            "Grade must be a numerical value!",
        ));
    }
    if !(0.0..=100.0).contains(&grade) {
        return Err(ValidationError::new(
            ErrorKind::InvalidGrade,
            format!("Grade {grade} must be within the valid range from 0 to 100!"),
        ));
    }
    Ok(grade)
}

/// Parse the optional grade field of a results line.
///
/// An empty field means the enrolment is ongoing and yields `None`.
///
/// # Errors
/// Returns `InvalidGrade` for non-numeric or out-of-range text
pub fn parse_grade(value: &str) -> Result<Option<f64>, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    let grade = value.parse::<f64>().map_err(|_| {
        ValidationError::new(
            ErrorKind::InvalidGrade,
            format!("Grade '{value}' must be a numerical value!"),
        )
    })?;
    validate_grade(grade).map(Some)
}

/// One result row: a student's enrolment in a course, graded or ongoing
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    student: StudentId,
    course: CourseId,
    grade: Option<f64>,
}

impl ResultRecord {
    /// Create a result; `None` marks an ongoing enrolment
    ///
    /// # Errors
    /// Returns `InvalidGrade` when a grade is given outside `[0, 100]`
    pub fn new(
        student: StudentId,
        course: CourseId,
        grade: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let grade = grade.map(validate_grade).transpose()?;
        Ok(Self {
            student,
            course,
            grade,
        })
    }

    /// Student the result belongs to
    #[must_use]
    pub const fn student(&self) -> &StudentId {
        &self.student
    }

    /// Course the result is for
    #[must_use]
    pub const fn course(&self) -> &CourseId {
        &self.course
    }

    /// Recorded grade, `None` while ongoing
    #[must_use]
    pub const fn grade(&self) -> Option<f64> {
        self.grade
    }

    /// Whether a grade has been recorded
    #[must_use]
    pub const fn is_graded(&self) -> bool {
        self.grade.is_some()
    }

    /// Record a grade
    ///
    /// # Errors
    /// Returns `InvalidGrade` and leaves the result unchanged when out of range
    pub fn set_grade(&mut self, grade: f64) -> Result<(), ValidationError> {
        self.grade = Some(validate_grade(grade)?);
        Ok(())
    }
}
