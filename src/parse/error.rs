use thiserror::Error;

/// Errors produced while parsing a grade file.
///
/// Display strings are the user-facing messages printed by the command-line
/// tool; the offending text (where one exists) is reported separately via
/// [`offending_line()`](ParseError::offending_line).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unexpected statement \"{line}\"")]
    UnexpectedStatement { line: String },

    #[error("Missing value name")]
    MissingValueName { line: String },

    #[error("Expected colon")]
    ExpectedColon { line: String },

    #[error("Expected expression following a colon")]
    ExpectedExpression,

    #[error("Invalid expression \"{expr}\"")]
    InvalidExpression { expr: String },

    #[error("Invalid weight")]
    InvalidWeight { line: String },

    #[error("Invalid value for config option \"{name}\"")]
    InvalidConfigValue { name: String },

    #[error("Unknown config option \"{name}\"")]
    UnknownConfigOption { name: String },
}

impl ParseError {
    pub(crate) fn invalid_expression(expr: &str) -> Self {
        ParseError::InvalidExpression {
            expr: expr.to_owned(),
        }
    }

    /// The raw input text the error points at, if any.
    #[must_use]
    pub fn offending_line(&self) -> Option<&str> {
        match self {
            ParseError::MissingValueName { line }
            | ParseError::ExpectedColon { line }
            | ParseError::InvalidWeight { line } => Some(line),
            ParseError::UnexpectedStatement { .. }
            | ParseError::ExpectedExpression
            | ParseError::InvalidExpression { .. }
            | ParseError::InvalidConfigValue { .. }
            | ParseError::UnknownConfigOption { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_statement_message() {
        let err = ParseError::UnexpectedStatement {
            line: "badline".into(),
        };
        assert_eq!(err.to_string(), "Unexpected statement \"badline\"");
        assert_eq!(err.offending_line(), None);
    }

    #[test]
    fn missing_value_name_message() {
        let err = ParseError::MissingValueName {
            line: ": 50%".into(),
        };
        assert_eq!(err.to_string(), "Missing value name");
        assert_eq!(err.offending_line(), Some(": 50%"));
    }

    #[test]
    fn expected_colon_message() {
        let err = ParseError::ExpectedColon { line: "= 1".into() };
        assert_eq!(err.to_string(), "Expected colon");
        assert_eq!(err.offending_line(), Some("= 1"));
    }

    #[test]
    fn expected_expression_message() {
        let err = ParseError::ExpectedExpression;
        assert_eq!(err.to_string(), "Expected expression following a colon");
        assert_eq!(err.offending_line(), None);
    }

    #[test]
    fn invalid_expression_message() {
        let err = ParseError::invalid_expression("1 +");
        assert_eq!(err.to_string(), "Invalid expression \"1 +\"");
    }

    #[test]
    fn invalid_weight_message() {
        let err = ParseError::InvalidWeight {
            line: " unknown".into(),
        };
        assert_eq!(err.to_string(), "Invalid weight");
        assert_eq!(err.offending_line(), Some(" unknown"));
    }

    #[test]
    fn unknown_config_option_message() {
        let err = ParseError::UnknownConfigOption {
            name: "passing".into(),
        };
        assert_eq!(err.to_string(), "Unknown config option \"passing\"");
    }

    #[test]
    fn invalid_config_value_message() {
        let err = ParseError::InvalidConfigValue {
            name: "passing_grade".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for config option \"passing_grade\""
        );
    }
}
