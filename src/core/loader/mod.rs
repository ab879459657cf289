//! Input discovery and record loading

pub mod csv_parser;

pub use csv_parser::{read_courses, read_results, read_students};

use crate::core::error::SchoolError;
use crate::core::models::{RecordDefaults, RecordStore};
use crate::{info, warn};
use std::path::{Path, PathBuf};

/// Default file names looked up inside a data directory
pub const RESULTS_FILE: &str = "results.txt";
/// See [`RESULTS_FILE`]
pub const COURSES_FILE: &str = "courses.txt";
/// See [`RESULTS_FILE`]
pub const STUDENTS_FILE: &str = "students.txt";

/// The three input files of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFiles {
    /// `studentId,courseId[,grade]` rows
    pub results: PathBuf,
    /// `id,type,name,creditPoints[,semester]` rows
    pub courses: PathBuf,
    /// `id,name,type[,mode]` rows
    pub students: PathBuf,
}

impl InputFiles {
    /// Explicit paths, in `results courses students` order
    pub fn new(
        results: impl Into<PathBuf>,
        courses: impl Into<PathBuf>,
        students: impl Into<PathBuf>,
    ) -> Self {
        Self {
            results: results.into(),
            courses: courses.into(),
            students: students.into(),
        }
    }

    /// The default file names resolved against `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(
            dir.join(RESULTS_FILE),
            dir.join(COURSES_FILE),
            dir.join(STUDENTS_FILE),
        )
    }

    /// Labels of the files that do not exist, in results/courses/students order
    #[must_use]
    pub fn missing(&self) -> Vec<String> {
        [
            ("Results", &self.results),
            ("Course", &self.courses),
            ("Student", &self.students),
        ]
        .into_iter()
        .filter(|(_, path)| !path.is_file())
        .map(|(label, _)| format!("'{label}' file"))
        .collect()
    }

    /// Fail with every missing file listed at once
    ///
    /// # Errors
    /// Returns `MissingInputs` when at least one file is absent
    pub fn check(&self) -> Result<(), SchoolError> {
        let missing = self.missing();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchoolError::MissingInputs(missing))
        }
    }
}

/// Load all three files into a fresh store.
///
/// Results are read first, then courses, then students; the first invalid
/// line aborts the load. Results naming unknown students or courses are
/// kept and reported as warnings.
///
/// # Errors
/// Returns the first missing file set, I/O failure or invalid record
pub fn load_records(
    files: &InputFiles,
    defaults: &RecordDefaults,
) -> Result<RecordStore, SchoolError> {
    files.check()?;

    let mut store = RecordStore::new();
    let results = read_results(&files.results, &mut store)?;
    let courses = read_courses(&files.courses, &mut store, defaults)?;
    let students = read_students(&files.students, &mut store, defaults)?;

    for reference in store.dangling_references() {
        warn!("{reference}");
    }

    info!("Loaded {results} result(s), {courses} course(s), {students} student(s)");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_every_absent_file() {
        let files = InputFiles::new("/nope/r.txt", "/nope/c.txt", "/nope/s.txt");
        assert_eq!(
            files.missing(),
            vec!["'Results' file", "'Course' file", "'Student' file"]
        );
        assert!(matches!(files.check(), Err(SchoolError::MissingInputs(m)) if m.len() == 3));
    }

    #[test]
    fn test_in_dir_uses_default_names() {
        let files = InputFiles::in_dir(Path::new("data"));
        assert_eq!(files.results, Path::new("data").join("results.txt"));
        assert_eq!(files.courses, Path::new("data").join("courses.txt"));
        assert_eq!(files.students, Path::new("data").join("students.txt"));
    }
}
