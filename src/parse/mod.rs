mod error;
pub(crate) mod grammar;

pub use error::ParseError;

use crate::eval::evaluate_expression;
use crate::types::{Config, GradeEntry, GradeFile, GradeValue, GradingScheme};

/// Parse grade-file content into a [`GradeFile`].
///
/// The format is line-oriented: `[section]` headers switch the active
/// section, `name: expression` statements feed it, and blank lines and
/// `#` comments are skipped. Statements in unrecognized sections are
/// evaluated but have no effect.
///
/// # Errors
///
/// Returns [`ParseError`] on the first malformed line; nothing past it is
/// processed.
pub fn parse(content: &str) -> Result<GradeFile, ParseError> {
    let mut mode: Option<&str> = None;
    let mut scheme = Vec::new();
    let mut grades = Vec::new();
    let mut config = Config::default();

    for raw in content.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            mode = Some(header);
            continue;
        }

        // Statement lines are only meaningful inside a section.
        let Some(mode) = mode else {
            return Err(ParseError::UnexpectedStatement {
                line: line.to_owned(),
            });
        };

        // The value name is the longest leading run of [A-Za-z0-9_- ],
        // kept exactly as written (interior and trailing spaces included).
        let name_end = line
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == ' '))
            .unwrap_or(line.len());
        if name_end == 0 {
            return Err(ParseError::MissingValueName {
                line: line.to_owned(),
            });
        }
        let name = &line[..name_end];
        let rest = &line[name_end..];

        let Some(expr_src) = rest.strip_prefix(':') else {
            return Err(ParseError::ExpectedColon {
                line: rest.to_owned(),
            });
        };
        if expr_src.is_empty() {
            return Err(ParseError::ExpectedExpression);
        }

        let value = evaluate_expression(expr_src)?;

        match mode {
            "breakdown" => match value {
                GradeValue::Known(weight) => scheme.push((name.to_owned(), weight)),
                GradeValue::Unknown => {
                    return Err(ParseError::InvalidWeight {
                        line: expr_src.to_owned(),
                    });
                }
            },
            "grades" => grades.push(GradeEntry::new(name, value)),
            "config" => match (name, value) {
                ("passing_grade", GradeValue::Known(v)) => config.passing_grade = v,
                ("passing_grade", GradeValue::Unknown) => {
                    return Err(ParseError::InvalidConfigValue {
                        name: name.to_owned(),
                    });
                }
                _ => {
                    return Err(ParseError::UnknownConfigOption {
                        name: name.to_owned(),
                    });
                }
            },
            _ => {}
        }
    }

    Ok(GradeFile::new(GradingScheme::new(scheme), grades, config))
}
