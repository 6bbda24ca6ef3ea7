mod test_support;

use serde_json::json;
use test_support::{request_ok, spawn_sidecar, temp_dir};

#[test]
fn corrupted_lines_load_as_warnings_not_failures() {
    let workspace = temp_dir("studentd-warnings");
    std::fs::write(
        workspace.join("students.txt"),
        "1,Alice,15,A,85\n2,Bo Chen,14,B\n3,Cyrus,13,C,55\n",
    )
    .expect("seed data file");

    let (_child, mut stdin, mut reader) = spawn_sidecar();
    request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let listed = request_ok(&mut stdin, &mut reader, "2", "students.list", json!({}));
    let students = listed.get("students").and_then(|v| v.as_array()).expect("students");
    assert_eq!(students.len(), 2);
    let warnings = listed.get("warnings").and_then(|v| v.as_array()).expect("warnings");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].get("line").and_then(|v| v.as_u64()), Some(2));
    assert!(warnings[0]
        .get("reason")
        .and_then(|v| v.as_str())
        .expect("reason")
        .contains("expected 5 fields"));

    // A mutation rewrites only what parsed; the bad line is gone afterwards.
    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.create",
        json!({ "id": 4, "name": "Dee", "age": 12, "grade": "D", "marks": 45 }),
    );
    let text = std::fs::read_to_string(workspace.join("students.txt")).expect("read data file");
    assert_eq!(text, "1,Alice,15,A,85\n3,Cyrus,13,C,55\n4,Dee,12,D,45\n");

    let _ = std::fs::remove_dir_all(workspace);
}
