use std::collections::HashMap;

use crate::types::{
    CategoryRow, CategoryStatus, GradeError, GradeFile, GradeSummary, GradeValue, Outcome,
};

/// Build the grade report for a parsed file.
///
/// Grade entries are de-duplicated by name, last write wins, preserving the
/// first-occurrence order of names. Entries that declare `unknown` trigger
/// the minimum-needed scan; otherwise the final weighted score is computed.
pub(crate) fn summarize(file: &GradeFile) -> Result<GradeSummary, GradeError> {
    let scheme = file.scheme();
    let passing = file.config().passing_grade;

    let mut latest: HashMap<&str, GradeValue> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for entry in file.grades() {
        if !latest.contains_key(entry.name.as_str()) {
            order.push(&entry.name);
        }
        latest.insert(&entry.name, entry.value);
    }

    let mut knowns: HashMap<String, f64> = HashMap::new();
    let mut unknowns: Vec<String> = Vec::new();
    for name in &order {
        match latest[name] {
            GradeValue::Known(value) => {
                knowns.insert((*name).to_owned(), value);
            }
            GradeValue::Unknown => unknowns.push((*name).to_owned()),
        }
    }

    let rows = scheme
        .categories()
        .iter()
        .map(|name| CategoryRow {
            name: name.clone(),
            weight_share: scheme.proportional_weight(name).unwrap_or(0.0),
            status: latest
                .get(name.as_str())
                .map_or(CategoryStatus::Unspecified, |value| (*value).into()),
        })
        .collect();

    let outcome = if unknowns.is_empty() {
        let value = scheme.compute_grade(&knowns)?;
        Outcome::Score {
            value,
            passed: value > passing,
        }
    } else {
        let minimum = scheme.min_value_for_unknowns(&unknowns, &knowns, passing)?;
        Outcome::MinimumNeeded { unknowns, minimum }
    };

    Ok(GradeSummary {
        rows,
        outcome,
        passing_grade: passing,
    })
}
