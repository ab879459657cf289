//! Course model

use crate::core::error::{ErrorKind, ValidationError};
use crate::core::models::student::validate_name;
use std::fmt;
use std::str::FromStr;

/// Subject prefixes a course identifier may start with
pub const COURSE_PREFIXES: [&str; 3] = ["COSC", "ISYS", "MATH"];

/// Course identifier: a subject prefix from [`COURSE_PREFIXES`] followed by three digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseId(String);

impl CourseId {
    /// Validate and wrap a course identifier (e.g. `COSC111`)
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` for blank, wrongly sized, unknown-prefix or non-digit ids
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let fail = |msg: String| Err(ValidationError::new(ErrorKind::InvalidIdentifier, msg));

        if value.is_empty() {
            return fail("Course ID cannot be blank!".to_string());
        }
        if value.len() != 7 {
            return fail(format!("Course ID '{value}' must be 7 characters long!"));
        }
        let Some(digits) = COURSE_PREFIXES
            .iter()
            .find_map(|prefix| value.strip_prefix(*prefix))
        else {
            return fail(format!(
                "Course ID '{value}' must start with 'COSC,' 'ISYS,' or 'MATH'!"
            ));
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return fail(format!(
                "Course ID '{value}': last three characters must be digits!"
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// The identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Elective semester tag, `Sem` followed by one digit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Semester(String);

impl Semester {
    /// Validate a semester tag
    ///
    /// # Errors
    /// Returns `InvalidSemester` unless the value is exactly `Sem` + 1 digit
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::new(
                ErrorKind::InvalidSemester,
                "Semester cannot be blank!",
            ));
        }
        let well_formed = value.len() == 4
            && value
                .strip_prefix("Sem")
                .is_some_and(|digit| digit.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(ValidationError::new(
                ErrorKind::InvalidSemester,
                format!("Semester '{value}' must be 'Sem' followed by a digit, e.g. 'Sem1'!"),
            ));
        }
        Ok(Self(value.to_string()))
    }

    /// The semester text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Course category code as written in the courses file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryCode {
    /// `C`
    Core,
    /// `E`
    Elective,
}

impl FromStr for CategoryCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" => Ok(Self::Core),
            "E" => Ok(Self::Elective),
            "" => Err(ValidationError::new(
                ErrorKind::InvalidType,
                "Course type cannot be blank!",
            )),
            other => Err(ValidationError::new(
                ErrorKind::InvalidType,
                format!("Course type '{other}' must be either C(Core) or E(Elective)!"),
            )),
        }
    }
}

/// Course category, carrying the fields only that category has
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseCategory {
    /// Core course, offered in every semester
    Core,
    /// Elective course offered in one semester
    Elective {
        /// Semester the elective runs in
        semester: Semester,
    },
}

impl CourseCategory {
    /// One-letter category code (`C` or `E`)
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Core => "C",
            Self::Elective { .. } => "E",
        }
    }
}

/// Parse a credit point value
///
/// # Errors
/// Returns `InvalidCreditPoints` for blank, non-numeric, negative or non-finite values
pub fn parse_credit_points(value: &str) -> Result<f64, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(
            ErrorKind::InvalidCreditPoints,
            "Credit point cannot be blank!",
        ));
    }
    let points = value.parse::<f64>().map_err(|_| {
        ValidationError::new(
            ErrorKind::InvalidCreditPoints,
            format!("Credit point '{value}' must be a numerical value!"),
        )
    })?;
    validate_credit_points(points)
}

/// Check that credit points are a finite, non-negative number
///
/// # Errors
/// Returns `InvalidCreditPoints` otherwise
pub fn validate_credit_points(points: f64) -> Result<f64, ValidationError> {
    if !points.is_finite() || points < 0.0 {
        return Err(ValidationError::new(
            ErrorKind::InvalidCreditPoints,
            format!("Credit point '{points}' must be a non-negative number!"),
        ));
    }
    Ok(points)
}

/// Represents a course offered by the school
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: CourseId,
    name: String,
    category: CourseCategory,
    credit_points: f64,
}

impl Course {
    /// Create a course
    ///
    /// # Errors
    /// Returns `InvalidName` for a blank name or `InvalidCreditPoints` for bad credit points
    pub fn new(
        id: CourseId,
        name: &str,
        category: CourseCategory,
        credit_points: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: validate_name(name)?,
            category,
            credit_points: validate_credit_points(credit_points)?,
        })
    }

    /// Course identifier
    #[must_use]
    pub const fn id(&self) -> &CourseId {
        &self.id
    }

    /// Course name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Course category
    #[must_use]
    pub const fn category(&self) -> &CourseCategory {
        &self.category
    }

    /// Credit points awarded for the course
    #[must_use]
    pub const fn credit_points(&self) -> f64 {
        self.credit_points
    }

    /// Semester label: the elective's tag, or `All` for core courses
    #[must_use]
    pub fn semester(&self) -> &str {
        match &self.category {
            CourseCategory::Core => "All",
            CourseCategory::Elective { semester } => semester.as_str(),
        }
    }
}
