//! Student model

use crate::core::error::{ErrorKind, ValidationError};
use std::fmt;
use std::str::FromStr;

/// Student identifier in the form `S` followed by three digits (e.g. `S007`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StudentId(String);

impl StudentId {
    /// Validate and wrap a student identifier
    ///
    /// # Errors
    /// Returns `InvalidIdentifier` unless the value is exactly `S` + 3 digits
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::new(
                ErrorKind::InvalidIdentifier,
                "Student ID cannot be blank!",
            ));
        }
        if value.len() != 4 {
            return Err(ValidationError::new(
                ErrorKind::InvalidIdentifier,
                format!("Student ID '{value}' must be 4 characters long!"),
            ));
        }
        let well_formed = value
            .strip_prefix('S')
            .is_some_and(|digits| digits.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(ValidationError::new(
                ErrorKind::InvalidIdentifier,
                format!("Student ID '{value}' must start with 'S' and end in 3 digits, e.g. 'S123'!"),
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

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Study load of a student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyMode {
    /// Full-time (`FT`)
    FullTime,
    /// Part-time (`PT`)
    PartTime,
}

impl StudyMode {
    /// Two-letter code used in input files and reports
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FullTime => "FT",
            Self::PartTime => "PT",
        }
    }
}

impl FromStr for StudyMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FT" => Ok(Self::FullTime),
            "PT" => Ok(Self::PartTime),
            "" => Err(ValidationError::new(
                ErrorKind::InvalidStudyMode,
                "Mode cannot be blank!",
            )),
            other => Err(ValidationError::new(
                ErrorKind::InvalidStudyMode,
                format!("Mode '{other}' must be either FT (full-time) or PT (part-time)!"),
            )),
        }
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Academic level, carrying the study mode that applies to it.
///
/// Undergraduates never declare a mode in the input; theirs comes from
/// [`RecordDefaults`](super::RecordDefaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentLevel {
    /// Undergraduate (`UG`)
    Undergraduate {
        /// Configured undergraduate mode
        mode: StudyMode,
    },
    /// Postgraduate (`PG`)
    Postgraduate {
        /// Declared study mode
        mode: StudyMode,
    },
}

impl StudentLevel {
    /// Two-letter level code (`UG` or `PG`)
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Undergraduate { .. } => "UG",
            Self::Postgraduate { .. } => "PG",
        }
    }

    /// Study mode for this level
    #[must_use]
    pub const fn mode(&self) -> StudyMode {
        match self {
            Self::Undergraduate { mode } | Self::Postgraduate { mode } => *mode,
        }
    }

    /// Whether this is an undergraduate level
    #[must_use]
    pub const fn is_undergraduate(&self) -> bool {
        matches!(self, Self::Undergraduate { .. })
    }
}

/// Level code as written in the students file, before the mode is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCode {
    /// `UG`
    Undergraduate,
    /// `PG`
    Postgraduate,
}

impl FromStr for LevelCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UG" => Ok(Self::Undergraduate),
            "PG" => Ok(Self::Postgraduate),
            "" => Err(ValidationError::new(
                ErrorKind::InvalidType,
                "Student type cannot be blank!",
            )),
            other => Err(ValidationError::new(
                ErrorKind::InvalidType,
                format!("Student type '{other}' must be either UG(Undergrad) or PG(Postgrad)!"),
            )),
        }
    }
}

/// Check that a display name is not blank
///
/// # Errors
/// Returns `InvalidName` for an empty or whitespace-only name
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::new(
            ErrorKind::InvalidName,
            "Name cannot be blank!",
        ));
    }
    Ok(name.to_string())
}

/// Represents a student enrolled at the school
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: StudentId,
    name: String,
    level: StudentLevel,
}

impl Student {
    /// Create a student after validating the name
    ///
    /// # Errors
    /// Returns `InvalidName` for a blank name
    pub fn new(id: StudentId, name: &str, level: StudentLevel) -> Result<Self, ValidationError> {
        Ok(Self {
            id,
            name: validate_name(name)?,
            level,
        })
    }

    /// Student identifier
    #[must_use]
    pub const fn id(&self) -> &StudentId {
        &self.id
    }

    /// Display name, including any enrolment warning marker
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Academic level and mode
    #[must_use]
    pub const fn level(&self) -> StudentLevel {
        self.level
    }

    /// Append `marker` to the display name unless it is already present.
    ///
    /// Returns `true` when the name changed.
    pub fn mark_name(&mut self, marker: &str) -> bool {
        if marker.is_empty() || self.name.contains(marker) {
            return false;
        }
        self.name.push(' ');
        self.name.push_str(marker);
        true
    }
}
