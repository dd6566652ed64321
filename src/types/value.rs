use std::fmt;

/// A category score as produced by the expression evaluator.
///
/// Scores are fractions of 1.0 (a 100% is `1.0`). A category whose score
/// has not been earned yet is `Unknown`; every consumer must handle both
/// variants explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeValue {
    /// A concrete score.
    Known(f64),
    /// A score that is not available yet.
    Unknown,
}

impl GradeValue {
    /// Returns the score if this value is known.
    #[must_use]
    pub fn known(self) -> Option<f64> {
        match self {
            GradeValue::Known(v) => Some(v),
            GradeValue::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, GradeValue::Unknown)
    }
}

impl From<f64> for GradeValue {
    fn from(v: f64) -> Self {
        GradeValue::Known(v)
    }
}

impl fmt::Display for GradeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradeValue::Known(v) => write!(f, "{v}"),
            GradeValue::Unknown => write!(f, "unknown"),
        }
    }
}
