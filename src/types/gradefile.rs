use std::path::Path;

use super::config::Config;
use super::entry::GradeEntry;
use super::scheme::GradingScheme;
use super::summary::GradeSummary;
use crate::error::GradeFileError;

/// A fully parsed grade file: the grading scheme, the declared grade
/// entries, and the configuration. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct GradeFile {
    scheme: GradingScheme,
    grades: Vec<GradeEntry>,
    config: Config,
}

impl GradeFile {
    #[must_use]
    pub(crate) fn new(scheme: GradingScheme, grades: Vec<GradeEntry>, config: Config) -> Self {
        Self {
            scheme,
            grades,
            config,
        }
    }

    /// Read and parse a grade file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`GradeFileError::FileNotFound`] if the path does not exist,
    /// [`GradeFileError::Io`] on read failure, and a parse error for
    /// malformed content.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GradeFileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GradeFileError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Ok(crate::parse::parse(&content)?)
    }

    #[must_use]
    pub fn scheme(&self) -> &GradingScheme {
        &self.scheme
    }

    #[must_use]
    pub fn grades(&self) -> &[GradeEntry] {
        &self.grades
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the grade report for this file.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError`](super::GradeError) when a final score is
    /// required but some scheme category has no grade entry at all.
    pub fn summary(&self) -> Result<GradeSummary, super::GradeError> {
        crate::report::summarize(self)
    }
}
