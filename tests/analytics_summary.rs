mod test_support;

use serde_json::json;
use test_support::{request_ok, spawn_sidecar, temp_dir};

#[test]
fn summary_reports_the_documented_metrics() {
    let workspace = temp_dir("studentd-analytics");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    for (i, (id, name, age, grade, marks)) in [
        (1, "Alice", 15, "D", 40),
        (2, "Bo Chen", 14, "B", 60),
        (3, "Cyrus", 13, "A", 80),
    ]
    .iter()
    .enumerate()
    {
        request_ok(
            &mut stdin,
            &mut reader,
            &format!("seed-{i}"),
            "students.create",
            json!({ "id": id, "name": name, "age": age, "grade": grade, "marks": marks }),
        );
    }

    let result = request_ok(&mut stdin, &mut reader, "10", "analytics.summary", json!({}));
    let report = result.get("report").expect("report");

    assert_eq!(report.get("totalStudents").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(report.get("averageMarks").and_then(|v| v.as_f64()), Some(60.0));
    assert_eq!(report.get("medianMarks").and_then(|v| v.as_f64()), Some(60.0));
    assert_eq!(report.get("belowAverageCount").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(report.get("passRate").and_then(|v| v.as_f64()), Some(100.0));
    assert_eq!(
        report.pointer("/topPerformer/name").and_then(|v| v.as_str()),
        Some("Cyrus")
    );
    assert_eq!(
        report.pointer("/lowestPerformer/name").and_then(|v| v.as_str()),
        Some("Alice")
    );

    let grades = report
        .get("gradeDistribution")
        .and_then(|v| v.as_array())
        .expect("grade distribution");
    // Zero-filled from the configured set, in its order.
    assert_eq!(grades.len(), 5);
    assert_eq!(grades[0].get("grade").and_then(|v| v.as_str()), Some("A"));
    assert_eq!(grades[0].get("count").and_then(|v| v.as_u64()), Some(1));
    assert_eq!(grades[2].get("grade").and_then(|v| v.as_str()), Some("C"));
    assert_eq!(grades[2].get("count").and_then(|v| v.as_u64()), Some(0));

    let ages = report
        .get("ageDistribution")
        .and_then(|v| v.as_array())
        .expect("age distribution");
    assert_eq!(ages.len(), 5);
    assert_eq!(ages[1].get("label").and_then(|v| v.as_str()), Some("11-15"));
    assert_eq!(ages[1].get("count").and_then(|v| v.as_u64()), Some(3));

    let top = report
        .get("topStudents")
        .and_then(|v| v.as_array())
        .expect("top students");
    assert_eq!(top.len(), 3);
    assert_eq!(top[0].get("id").and_then(|v| v.as_i64()), Some(3));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn summary_on_empty_collection_is_all_zeroes() {
    let workspace = temp_dir("studentd-analytics-empty");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let result = request_ok(&mut stdin, &mut reader, "2", "analytics.summary", json!({}));
    let report = result.get("report").expect("report");
    assert_eq!(report.get("totalStudents").and_then(|v| v.as_u64()), Some(0));
    assert_eq!(report.get("averageMarks").and_then(|v| v.as_f64()), Some(0.0));
    assert_eq!(report.get("passRate").and_then(|v| v.as_f64()), Some(0.0));
    assert!(report.get("topPerformer").map(|v| v.is_null()).unwrap_or(false));
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn pass_rate_rounds_like_the_dashboard() {
    let workspace = temp_dir("studentd-analytics-passrate");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    for (i, marks) in [10, 50, 90].iter().enumerate() {
        request_ok(
            &mut stdin,
            &mut reader,
            &format!("seed-{i}"),
            "students.create",
            json!({ "id": i + 1, "name": "Alice", "age": 15, "grade": "C", "marks": marks }),
        );
    }
    let result = request_ok(&mut stdin, &mut reader, "5", "analytics.summary", json!({}));
    assert_eq!(
        result.pointer("/report/passRate").and_then(|v| v.as_f64()),
        Some(66.67)
    );
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn extended_profile_changes_grades_and_age_range() {
    let workspace = temp_dir("studentd-analytics-profile");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({
            "path": workspace.to_string_lossy(),
            "config": {
                "ageMin": 5,
                "ageMax": 100,
                "grades": ["A+", "A", "B+", "B", "C+", "C", "D", "F"],
                "passThreshold": 40,
                "topN": 5
            }
        }),
    );
    // Out of range for the default profile, fine here.
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.create",
        json!({ "id": 1, "name": "Prof Wong", "age": 64, "grade": "A+", "marks": 95 }),
    );
    let result = request_ok(&mut stdin, &mut reader, "3", "analytics.summary", json!({}));
    let grades = result
        .pointer("/report/gradeDistribution")
        .and_then(|v| v.as_array())
        .expect("grade distribution");
    assert_eq!(grades.len(), 8);
    assert_eq!(grades[0].get("grade").and_then(|v| v.as_str()), Some("A+"));
    assert_eq!(grades[0].get("count").and_then(|v| v.as_u64()), Some(1));
    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn predict_is_a_labeled_placeholder() {
    let workspace = temp_dir("studentd-analytics-predict");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "students.create",
        json!({ "id": 1, "name": "Alice", "age": 15, "grade": "A", "marks": 80 }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.create",
        json!({ "id": 2, "name": "Bo Chen", "age": 14, "grade": "D", "marks": 40 }),
    );
    let first = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "analytics.predict",
        json!({ "id": 1 }),
    );
    assert_eq!(first.get("placeholder").and_then(|v| v.as_bool()), Some(true));
    // Mean is 60; 80 drifts a quarter of the way down.
    assert_eq!(first.get("projectedMarks").and_then(|v| v.as_f64()), Some(75.0));
    let again = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "analytics.predict",
        json!({ "id": 1 }),
    );
    assert_eq!(first, again);
    let _ = std::fs::remove_dir_all(workspace);
}
