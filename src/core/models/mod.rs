//! Data models for `MySchool`

pub mod course;
pub mod records;
pub mod result_record;
pub mod student;

pub use course::{CategoryCode, Course, CourseCategory, CourseId, Semester};
pub use records::RecordStore;
pub use result_record::ResultRecord;
pub use student::{LevelCode, Student, StudentId, StudentLevel, StudyMode};

/// Values applied when constructing records whose input omits them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordDefaults {
    /// Study mode given to every undergraduate
    pub undergraduate_mode: StudyMode,
    /// Credit points for an elective whose credit field is empty
    pub elective_credit_points: f64,
}

impl Default for RecordDefaults {
    fn default() -> Self {
        Self {
            undergraduate_mode: StudyMode::FullTime,
            elective_credit_points: 6.0,
        }
    }
}
