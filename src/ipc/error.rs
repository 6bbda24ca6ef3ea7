use serde_json::json;

use crate::repo::RepoError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Map a repository outcome onto the wire error codes. Validation failures
/// carry the full per-field list in details.
pub fn repo_err(id: &str, e: RepoError) -> serde_json::Value {
    match e {
        RepoError::Validation(errors) => err(
            id,
            "validation_failed",
            "record failed validation",
            Some(json!({ "errors": errors })),
        ),
        RepoError::NotFound(record_id) => err(
            id,
            "not_found",
            format!("student {record_id} not found"),
            None,
        ),
        RepoError::Storage(cause) => err(id, "storage_failed", format!("{cause:#}"), None),
    }
}
