use serde::Serialize;

use crate::codec::Record;
use crate::config::Config;

pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeCount {
    pub grade: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeAverage {
    pub grade: String,
    pub average_marks: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBucket {
    pub label: String,
    pub min: i64,
    pub max: i64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Exceptional,
    NeedsAttention,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anomaly {
    pub record: Record,
    pub z_score: f64,
    pub kind: AnomalyKind,
}

/// Aggregate statistics over one collection snapshot. Every metric is
/// defined for the empty collection; nothing here touches storage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_students: usize,
    pub average_marks: f64,
    pub median_marks: f64,
    pub top_performer: Option<Record>,
    pub lowest_performer: Option<Record>,
    pub below_average_count: usize,
    pub grade_distribution: Vec<GradeCount>,
    pub average_marks_per_grade: Vec<GradeAverage>,
    pub age_distribution: Vec<AgeBucket>,
    pub pass_rate: f64,
    pub top_students: Vec<Record>,
    pub anomalies: Vec<Anomaly>,
}

fn mean(records: &[Record]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: i64 = records.iter().map(|s| s.marks).sum();
    total as f64 / records.len() as f64
}

pub fn mean_marks(records: &[Record]) -> f64 {
    round2(mean(records))
}

/// Middle of the sorted marks; even-sized collections average the two middle
/// values (the legacy lower-middle pick was dropped on purpose).
pub fn median_marks(records: &[Record]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let mut sorted: Vec<i64> = records.iter().map(|s| s.marks).collect();
    sorted.sort_unstable();
    let n = sorted.len();
    let median = if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[(n / 2) - 1] + sorted[n / 2]) as f64 / 2.0
    };
    round2(median)
}

/// The N best records by marks, descending. The sort is stable, so ties
/// keep collection order.
pub fn top_n(records: &[Record], n: usize) -> Vec<Record> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| b.marks.cmp(&a.marks));
    ranked.truncate(n);
    ranked
}

/// Contiguous width-5 age bands spanning the configured range; the first
/// band is one wider so the classic 5-30 profile yields 5-10, 11-15, ...,
/// 26-30.
pub fn age_buckets(config: &Config) -> Vec<(i64, i64)> {
    let mut buckets = Vec::new();
    if config.age_min > config.age_max {
        return buckets;
    }
    let mut start = config.age_min;
    let mut end = (config.age_min + 5).min(config.age_max);
    loop {
        buckets.push((start, end));
        if end >= config.age_max {
            break;
        }
        start = end + 1;
        end = (start + 4).min(config.age_max);
    }
    buckets
}

/// Marks more than two population standard deviations from the mean, for
/// collections of at least three records. A flat collection (stddev 0)
/// reports nothing.
pub fn detect_anomalies(records: &[Record]) -> Vec<Anomaly> {
    if records.len() < 3 {
        return Vec::new();
    }
    let m = mean(records);
    let variance = records
        .iter()
        .map(|s| {
            let d = s.marks as f64 - m;
            d * d
        })
        .sum::<f64>()
        / records.len() as f64;
    let stddev = variance.sqrt();
    if stddev == 0.0 {
        return Vec::new();
    }
    records
        .iter()
        .filter_map(|s| {
            let z = (s.marks as f64 - m).abs() / stddev;
            if z <= 2.0 {
                return None;
            }
            let kind = if (s.marks as f64) > m {
                AnomalyKind::Exceptional
            } else {
                AnomalyKind::NeedsAttention
            };
            Some(Anomaly {
                record: s.clone(),
                z_score: round2(z),
                kind,
            })
        })
        .collect()
}

/// Placeholder projection of next-term marks: drift a quarter of the way
/// toward the class mean. A stand-in heuristic, not a trained model.
pub fn projected_marks(marks: i64, class_mean: f64) -> f64 {
    let projected = marks as f64 + (class_mean - marks as f64) * 0.25;
    round2(projected.clamp(0.0, 100.0))
}

pub fn analyze(records: &[Record], config: &Config) -> AnalyticsReport {
    let raw_mean = mean(records);

    // First record wins ties for both extremes.
    let mut top: Option<&Record> = None;
    let mut lowest: Option<&Record> = None;
    for s in records {
        if top.map_or(true, |t| s.marks > t.marks) {
            top = Some(s);
        }
        if lowest.map_or(true, |l| s.marks < l.marks) {
            lowest = Some(s);
        }
    }

    let below_average_count = records
        .iter()
        .filter(|s| (s.marks as f64) < raw_mean)
        .count();

    // Grade slices are zero-filled from the configured set, never inferred
    // from the data.
    let grade_distribution: Vec<GradeCount> = config
        .grades
        .iter()
        .map(|grade| GradeCount {
            grade: grade.clone(),
            count: records.iter().filter(|s| &s.grade == grade).count(),
        })
        .collect();

    let average_marks_per_grade: Vec<GradeAverage> = config
        .grades
        .iter()
        .map(|grade| {
            let members: Vec<&Record> = records.iter().filter(|s| &s.grade == grade).collect();
            let avg = if members.is_empty() {
                0.0
            } else {
                round2(
                    members.iter().map(|s| s.marks).sum::<i64>() as f64 / members.len() as f64,
                )
            };
            GradeAverage {
                grade: grade.clone(),
                average_marks: avg,
            }
        })
        .collect();

    let age_distribution: Vec<AgeBucket> = age_buckets(config)
        .into_iter()
        .map(|(min, max)| AgeBucket {
            label: format!("{min}-{max}"),
            min,
            max,
            count: records
                .iter()
                .filter(|s| s.age >= min && s.age <= max)
                .count(),
        })
        .collect();

    let pass_rate = if records.is_empty() {
        0.0
    } else {
        let passed = records
            .iter()
            .filter(|s| s.marks >= config.pass_threshold)
            .count();
        round2(passed as f64 / records.len() as f64 * 100.0)
    };

    AnalyticsReport {
        total_students: records.len(),
        average_marks: round2(raw_mean),
        median_marks: median_marks(records),
        top_performer: top.cloned(),
        lowest_performer: lowest.cloned(),
        below_average_count,
        grade_distribution,
        average_marks_per_grade,
        age_distribution,
        pass_rate,
        top_students: top_n(records, config.top_n),
        anomalies: detect_anomalies(records),
    }
}
