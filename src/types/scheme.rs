use std::collections::{HashMap, HashSet};
use std::fmt;

use super::error::GradeError;

/// How a final grade is computed: an ordered list of categories and their
/// weights, built from a grade file's `[breakdown]` section.
///
/// The declaration list is kept verbatim, duplicates included; weight
/// lookups are last-write-wins per name, and the weighted math visits each
/// distinct name once in first-occurrence order. Weights need not sum to 1;
/// the sum is only a normalizing denominator. Immutable once constructed.
#[derive(Debug, Clone, Default)]
pub struct GradingScheme {
    names: Vec<String>,
    weights: HashMap<String, f64>,
}

/// Weighted average of `(value, weight)` pairs; `0.0` for an empty slice.
fn weighted_average(data: &[(f64, f64)]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum_weights: f64 = data.iter().map(|(_, weight)| weight).sum();
    let weighted_total: f64 = data.iter().map(|(value, weight)| value * weight).sum();
    weighted_total / sum_weights
}

impl GradingScheme {
    #[must_use]
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        let mut names = Vec::with_capacity(entries.len());
        let mut weights = HashMap::with_capacity(entries.len());
        for (name, weight) in entries {
            names.push(name.clone());
            weights.insert(name, weight);
        }
        Self { names, weights }
    }

    /// Category names in declaration order, duplicates preserved.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn weight(&self, name: &str) -> Option<f64> {
        self.weights.get(name).copied()
    }

    /// This category's share of the total weight, i.e. `weight / Σ weights`.
    #[must_use]
    pub fn proportional_weight(&self, name: &str) -> Option<f64> {
        let total: f64 = self.weights.values().sum();
        Some(self.weights.get(name)? / total)
    }

    /// Compute the weighted-average grade for the given category scores
    /// (1.0 is a 100%). An empty scheme scores `0.0`.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::MissingGradeEntry`] if any declared category
    /// has no score in `values`.
    pub fn compute_grade(&self, values: &HashMap<String, f64>) -> Result<f64, GradeError> {
        let mut seen = HashSet::new();
        let mut data = Vec::with_capacity(self.weights.len());

        for name in &self.names {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let weight = self.weights[name.as_str()];
            let value = values
                .get(name)
                .ok_or_else(|| GradeError::MissingGradeEntry {
                    category: name.clone(),
                })?;
            data.push((*value, weight));
        }

        Ok(weighted_average(&data))
    }

    /// The smallest integer percentage that, assigned to every category in
    /// `unknowns`, pushes the grade strictly above `passing`. `None` means
    /// passing is unattainable even at 100.
    ///
    /// The scan recomputes the full weighted average for each candidate
    /// instead of solving in closed form, so it stays correct for any
    /// grading function that is monotonic in the unknown scores.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError::MissingGradeEntry`] if a declared category is
    /// in neither `known_values` nor `unknowns`.
    pub fn min_value_for_unknowns(
        &self,
        unknowns: &[String],
        known_values: &HashMap<String, f64>,
        passing: f64,
    ) -> Result<Option<u32>, GradeError> {
        for min_percent in 0..=100u32 {
            let value = f64::from(min_percent) / 100.0;

            let mut values = known_values.clone();
            for unknown in unknowns {
                values.insert(unknown.clone(), value);
            }

            if self.compute_grade(&values)? > passing {
                return Ok(Some(min_percent));
            }
        }

        Ok(None)
    }
}

impl fmt::Display for GradingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GradingScheme({} categories)", self.names.len())
    }
}
