use thiserror::Error;

use crate::parse::ParseError;
use crate::types::GradeError;

/// Unified error type covering file access, parsing, and grade computation.
///
/// Returned by convenience methods like
/// [`GradeFile::from_file()`](crate::GradeFile::from_file); everything in it
/// is reportable to the user as a single message plus, where available, the
/// offending line.
#[derive(Debug, Error)]
pub enum GradeFileError {
    #[error("Cannot find file with path \"{path}\"")]
    FileNotFound { path: String },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Grade(#[from] GradeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GradeFileError {
    /// The raw input text the error points at, if any.
    #[must_use]
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            GradeFileError::Parse(err) => err.offending_line(),
            _ => None,
        }
    }
}
