use std::fmt;
use thiserror::Error;

/// Required fields of a course record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Number,
    Name,
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseField::Number => write!(f, "Course Number"),
            CourseField::Name => write!(f, "Course Name"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{field} Missing in record '{line}'")]
    MissingField { field: CourseField, line: String },
    #[error("Duplicate found, Course {0} already exists")]
    DuplicateCourse(String),
    #[error("Course {0} does not exist")]
    CourseNotFound(String),
    #[error("Bucket count must be greater than zero, got {0}")]
    InvalidBucketCount(usize),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}
