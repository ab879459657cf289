//! Error types for record validation and input loading

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// The category of a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or duplicated student/course identifier
    InvalidIdentifier,
    /// Blank student or course name
    InvalidName,
    /// Unknown course category or student level
    InvalidType,
    /// Unknown postgraduate study mode
    InvalidStudyMode,
    /// Missing, non-numeric or negative credit points
    InvalidCreditPoints,
    /// Malformed elective semester tag
    InvalidSemester,
    /// Non-numeric grade or grade outside `[0, 100]`
    InvalidGrade,
    /// Results file without any records
    EmptyResultSet,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidIdentifier => "invalid identifier",
            Self::InvalidName => "invalid name",
            Self::InvalidType => "invalid type",
            Self::InvalidStudyMode => "invalid study mode",
            Self::InvalidCreditPoints => "invalid credit points",
            Self::InvalidSemester => "invalid semester",
            Self::InvalidGrade => "invalid grade",
            Self::EmptyResultSet => "empty result set",
        };
        write!(f, "{label}")
    }
}

/// A rule violation raised while constructing a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// What kind of rule was broken
    pub kind: ErrorKind,
    /// User-facing description
    pub message: String,
}

impl ValidationError {
    /// Create a validation error of the given kind
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for ValidationError {}

/// Top-level error for loading and reporting
#[derive(Debug)]
pub enum SchoolError {
    /// A record on a specific input line failed validation
    Record {
        /// Input file
        path: PathBuf,
        /// 1-based line number
        line: u64,
        /// The underlying rule violation
        source: ValidationError,
    },
    /// The results file holds no records
    EmptyResults(PathBuf),
    /// One or more input files do not exist (labels such as `'Results' file`)
    MissingInputs(Vec<String>),
    /// Reading or writing a file failed
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The delimited reader rejected the file
    Csv {
        /// Input file
        path: PathBuf,
        /// Underlying reader error
        source: csv::Error,
    },
}

impl SchoolError {
    /// The validation category behind this error, if any
    #[must_use]
    pub const fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Record { source, .. } => Some(source.kind),
            Self::EmptyResults(_) => Some(ErrorKind::EmptyResultSet),
            Self::MissingInputs(_) | Self::Io { .. } | Self::Csv { .. } => None,
        }
    }

    /// Attach file and line context to a validation error
    pub fn at_line(path: impl Into<PathBuf>, line: u64, source: ValidationError) -> Self {
        Self::Record {
            path: path.into(),
            line,
            source,
        }
    }
}

impl fmt::Display for SchoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record { path, line, source } => {
                write!(f, "{} (line {line}): {source}", path.display())
            }
            Self::EmptyResults(path) => write!(f, "The result file is empty: {}", path.display()),
            Self::MissingInputs(missing) => {
                writeln!(f, "One or more required files do not exist:")?;
                for label in missing {
                    writeln!(f, "\t- {label} is missing.")?;
                }
                write!(f, "Please ensure these files exist in the data directory.")
            }
            Self::Io { path, source } => write!(f, "Cannot access {}: {source}", path.display()),
            Self::Csv { path, source } => write!(f, "Cannot read {}: {source}", path.display()),
        }
    }
}

impl Error for SchoolError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::EmptyResults(_) | Self::MissingInputs(_) => None,
        }
    }
}
