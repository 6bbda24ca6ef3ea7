use serde_json::json;

use crate::analytics;
use crate::ipc::error::{err, ok, repo_err};
use crate::ipc::types::{AppState, Request};
use crate::repo;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "analytics.summary" => Some(summary(state, req)),
        "analytics.topN" => Some(top_n(state, req)),
        "analytics.predict" => Some(predict(state, req)),
        _ => None,
    }
}

fn summary(state: &AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match repo::load_all(store) {
        Ok(loaded) => {
            let report = analytics::analyze(&loaded.records, &state.config);
            ok(
                &req.id,
                json!({ "report": report, "warnings": loaded.warnings }),
            )
        }
        Err(e) => repo_err(&req.id, e),
    }
}

fn top_n(state: &AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let n = req
        .params
        .get("n")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(state.config.top_n);
    match repo::load_all(store) {
        Ok(loaded) => ok(
            &req.id,
            json!({ "students": analytics::top_n(&loaded.records, n) }),
        ),
        Err(e) => repo_err(&req.id, e),
    }
}

/// Placeholder projection, not a model: next-term marks drift a quarter of
/// the way toward the class mean. Labeled as such in the response.
fn predict(state: &AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(id) = req.params.get("id").and_then(|v| v.as_i64()) else {
        return err(&req.id, "bad_params", "missing params.id", None);
    };
    let loaded = match repo::load_all(store) {
        Ok(l) => l,
        Err(e) => return repo_err(&req.id, e),
    };
    let Some(student) = loaded.records.iter().find(|s| s.id == id) else {
        return err(&req.id, "not_found", format!("student {id} not found"), None);
    };
    let class_mean = analytics::mean_marks(&loaded.records);
    ok(
        &req.id,
        json!({
            "studentId": id,
            "projectedMarks": analytics::projected_marks(student.marks, class_mean),
            "heuristic": "drift-to-mean",
            "placeholder": true,
        }),
    )
}
