//! In-memory record store

use super::{Course, CourseId, ResultRecord, Student, StudentId};
use crate::core::error::{ErrorKind, ValidationError};
use std::collections::HashSet;

/// Holds the students, courses and results of one run.
///
/// Collections keep input (encounter) order, which ranking and the results
/// grid rely on.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    students: Vec<Student>,
    courses: Vec<Course>,
    results: Vec<ResultRecord>,
}

impl RecordStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
            courses: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Add a student
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` if a student with the same id already exists
    pub fn add_student(&mut self, student: Student) -> Result<(), ValidationError> {
        if self.get_student(student.id()).is_some() {
            return Err(ValidationError::new(
                ErrorKind::InvalidIdentifier,
                format!("Student ID '{}' appears more than once!", student.id()),
            ));
        }
        self.students.push(student);
        Ok(())
    }

    /// Add a course
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` if a course with the same id already exists
    pub fn add_course(&mut self, course: Course) -> Result<(), ValidationError> {
        if self.get_course(course.id()).is_some() {
            return Err(ValidationError::new(
                ErrorKind::InvalidIdentifier,
                format!("Course ID '{}' appears more than once!", course.id()),
            ));
        }
        self.courses.push(course);
        Ok(())
    }

    /// Add a result row. Repeated (student, course) pairs are accepted.
    ///
    /// Returns `false` when the pair was already present.
    pub fn add_result(&mut self, result: ResultRecord) -> bool {
        let fresh = !self
            .results
            .iter()
            .any(|r| r.student() == result.student() && r.course() == result.course());
        self.results.push(result);
        fresh
    }

    /// All students in input order
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// All courses in input order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// All result rows in input order
    #[must_use]
    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    /// Look up a student by id
    #[must_use]
    pub fn get_student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| s.id() == id)
    }

    /// Look up a student by id for the name-marker update
    pub fn get_student_mut(&mut self, id: &StudentId) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id() == id)
    }

    /// Look up a course by id
    #[must_use]
    pub fn get_course(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id() == id)
    }

    /// Number of students
    #[must_use]
    pub fn total_students(&self) -> usize {
        self.students.len()
    }

    /// Number of courses
    #[must_use]
    pub fn total_courses(&self) -> usize {
        self.courses.len()
    }

    /// First result row for a (student, course) pair
    #[must_use]
    pub fn find_result(&self, student: &StudentId, course: &CourseId) -> Option<&ResultRecord> {
        self.results
            .iter()
            .find(|r| r.student() == student && r.course() == course)
    }

    /// Result rows that reference a student or course missing from the store
    ///
    /// # Returns
    /// A list of human-readable descriptions, one per dangling reference
    #[must_use]
    pub fn dangling_references(&self) -> Vec<String> {
        let students: HashSet<&StudentId> = self.students.iter().map(Student::id).collect();
        let courses: HashSet<&CourseId> = self.courses.iter().map(Course::id).collect();
        let mut dangling = Vec::new();

        for result in &self.results {
            if !students.contains(result.student()) {
                dangling.push(format!(
                    "Result for course '{}' references unknown student '{}'",
                    result.course(),
                    result.student()
                ));
            }
            if !courses.contains(result.course()) {
                dangling.push(format!(
                    "Result for student '{}' references unknown course '{}'",
                    result.student(),
                    result.course()
                ));
            }
        }

        dangling
    }
}
