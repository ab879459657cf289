//! Delimited-text readers for the results, courses and students files

use crate::core::error::{SchoolError, ValidationError};
use crate::core::models::course::parse_credit_points;
use crate::core::models::result_record::parse_grade;
use crate::core::models::{
    CategoryCode, Course, CourseCategory, CourseId, LevelCode, RecordDefaults, RecordStore,
    ResultRecord, Semester, Student, StudentId, StudentLevel, StudyMode,
};
use crate::{debug, warn};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::path::Path;

/// Read every non-blank record of a file together with its line number
fn read_lines(path: &Path) -> Result<Vec<(u64, StringRecord)>, SchoolError> {
    let file = File::open(path).map_err(|source| SchoolError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(file);

    let mut lines = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|source| SchoolError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record
            .position()
            .map_or(index as u64 + 1, csv::Position::line);
        lines.push((line, record));
    }

    debug!("Read {} record(s) from {}", lines.len(), path.display());
    Ok(lines)
}

/// Get a field by position, empty when absent
fn field<'a>(record: &'a StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or("")
}

/// Parse `studentId,courseId[,grade]`
///
/// # Errors
/// Returns the first rule the line breaks
pub fn parse_result_line(record: &StringRecord) -> Result<ResultRecord, ValidationError> {
    let student = StudentId::parse(field(record, 0))?;
    let course = CourseId::parse(field(record, 1))?;
    let grade = parse_grade(field(record, 2))?;
    ResultRecord::new(student, course, grade)
}

/// Parse `id,type,name,creditPoints[,semester]`
///
/// Electives with an empty credit field take `defaults.elective_credit_points`.
///
/// # Errors
/// Returns the first rule the line breaks
pub fn parse_course_line(
    record: &StringRecord,
    defaults: &RecordDefaults,
) -> Result<Course, ValidationError> {
    let id = CourseId::parse(field(record, 0))?;
    let code = field(record, 1).parse::<CategoryCode>()?;
    let name = field(record, 2);
    let credit_field = field(record, 3);

    let (category, credit_points) = match code {
        CategoryCode::Core => (CourseCategory::Core, parse_credit_points(credit_field)?),
        CategoryCode::Elective => {
            let semester = Semester::parse(field(record, 4))?;
            let credit_points = if credit_field.is_empty() {
                defaults.elective_credit_points
            } else {
                parse_credit_points(credit_field)?
            };
            (CourseCategory::Elective { semester }, credit_points)
        }
    };

    Course::new(id, name, category, credit_points)
}

/// Parse `id,name,type[,mode]`
///
/// # Errors
/// Returns the first rule the line breaks
pub fn parse_student_line(
    record: &StringRecord,
    defaults: &RecordDefaults,
) -> Result<Student, ValidationError> {
    let id = StudentId::parse(field(record, 0))?;
    let name = field(record, 1);
    let level = match field(record, 2).parse::<LevelCode>()? {
        LevelCode::Undergraduate => StudentLevel::Undergraduate {
            mode: defaults.undergraduate_mode,
        },
        LevelCode::Postgraduate => StudentLevel::Postgraduate {
            mode: field(record, 3).parse::<StudyMode>()?,
        },
    };
    Student::new(id, name, level)
}

/// Load the results file into `store`
///
/// # Returns
/// The number of result rows read
///
/// # Errors
/// Returns `EmptyResults` for a file without records, or the first invalid line
pub fn read_results(path: &Path, store: &mut RecordStore) -> Result<usize, SchoolError> {
    let lines = read_lines(path)?;
    if lines.is_empty() {
        return Err(SchoolError::EmptyResults(path.to_path_buf()));
    }

    for (line, record) in &lines {
        let result =
            parse_result_line(record).map_err(|e| SchoolError::at_line(path, *line, e))?;
        let (student, course) = (result.student().clone(), result.course().clone());
        if !store.add_result(result) {
            warn!(
                "{} (line {line}): repeated result for {student}/{course}; only the first is counted",
                path.display()
            );
        }
    }

    Ok(lines.len())
}

/// Load the courses file into `store`
///
/// # Errors
/// Returns the first invalid or duplicated course
pub fn read_courses(
    path: &Path,
    store: &mut RecordStore,
    defaults: &RecordDefaults,
) -> Result<usize, SchoolError> {
    let lines = read_lines(path)?;
    for (line, record) in &lines {
        parse_course_line(record, defaults)
            .and_then(|course| store.add_course(course))
            .map_err(|e| SchoolError::at_line(path, *line, e))?;
    }
    Ok(lines.len())
}

/// Load the students file into `store`
///
/// # Errors
/// Returns the first invalid or duplicated student
pub fn read_students(
    path: &Path,
    store: &mut RecordStore,
    defaults: &RecordDefaults,
) -> Result<usize, SchoolError> {
    let lines = read_lines(path)?;
    for (line, record) in &lines {
        parse_student_line(record, defaults)
            .and_then(|student| store.add_student(student))
            .map_err(|e| SchoolError::at_line(path, *line, e))?;
    }
    Ok(lines.len())
}
