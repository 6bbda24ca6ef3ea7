use serde::{Deserialize, Serialize};

/// Domain rules that vary between deployments: the dashboard profile uses
/// ages 5-30 with plain letter grades, the extended profile widens the age
/// range and adds plus grades. Everything else treats these as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub age_min: i64,
    pub age_max: i64,
    pub grades: Vec<String>,
    pub pass_threshold: i64,
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            age_min: 5,
            age_max: 30,
            grades: ["A", "B", "C", "D", "F"]
                .iter()
                .map(|g| g.to_string())
                .collect(),
            pass_threshold: 40,
            top_n: 5,
        }
    }
}

impl Config {
    /// Uppercase the grade set so it compares cleanly against normalized
    /// records.
    pub fn normalized(mut self) -> Self {
        self.grades = self
            .grades
            .iter()
            .map(|g| g.trim().to_ascii_uppercase())
            .collect();
        self
    }

    pub fn grade_is_valid(&self, grade: &str) -> bool {
        self.grades.iter().any(|g| g.eq_ignore_ascii_case(grade))
    }
}
