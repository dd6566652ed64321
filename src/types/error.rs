use thiserror::Error;

/// Errors raised while computing grades against a [`GradingScheme`](super::GradingScheme).
#[derive(Debug, Error)]
pub enum GradeError {
    #[error("Missing grade entry for \"{category}\"")]
    MissingGradeEntry { category: String },
}
