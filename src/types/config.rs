/// Options settable from a grade file's `[config]` section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// The fraction of 1.0 a final grade must strictly exceed to pass.
    pub passing_grade: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self { passing_grade: 0.5 }
    }
}
