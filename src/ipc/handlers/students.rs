use serde_json::json;

use crate::codec::Record;
use crate::ipc::error::{err, ok, repo_err};
use crate::ipc::types::{AppState, Request};
use crate::repo;
use crate::store::Store;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(list(state, req)),
        "students.get" => Some(get(state, req)),
        "students.create" => Some(create(state, req)),
        "students.update" => Some(update(state, req)),
        "students.delete" => Some(delete(state, req)),
        "students.checkId" => Some(check_id(state, req)),
        _ => None,
    }
}

fn require_store<'a>(state: &'a AppState, req: &Request) -> Result<&'a Store, serde_json::Value> {
    state
        .store
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

fn require_id(req: &Request) -> Result<i64, serde_json::Value> {
    req.params
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", "missing params.id", None))
}

/// Pull the five record fields out of a params object. Type errors surface
/// as bad_params; domain rules are the validator's job.
fn parse_record(v: &serde_json::Value) -> Result<Record, String> {
    let id = v
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or("missing or non-integer id")?;
    let name = v
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or("missing name")?
        .to_string();
    let age = v
        .get("age")
        .and_then(|v| v.as_i64())
        .ok_or("missing or non-integer age")?;
    let grade = v
        .get("grade")
        .and_then(|v| v.as_str())
        .ok_or("missing grade")?
        .to_string();
    let marks = v
        .get("marks")
        .and_then(|v| v.as_i64())
        .ok_or("missing or non-integer marks")?;
    Ok(Record {
        id,
        name,
        age,
        grade,
        marks,
    })
}

fn list(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let query = req.params.get("query").and_then(|v| v.as_str());
    match query {
        Some(q) if !q.trim().is_empty() => match repo::find_by_query(store, q) {
            Ok(records) => ok(&req.id, json!({ "students": records })),
            Err(e) => repo_err(&req.id, e),
        },
        _ => match repo::load_all(store) {
            Ok(loaded) => ok(
                &req.id,
                json!({ "students": loaded.records, "warnings": loaded.warnings }),
            ),
            Err(e) => repo_err(&req.id, e),
        },
    }
}

fn get(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match require_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match repo::find_by_id(store, id) {
        Ok(Some(student)) => ok(&req.id, json!({ "student": student })),
        Ok(None) => err(&req.id, "not_found", format!("student {id} not found"), None),
        Err(e) => repo_err(&req.id, e),
    }
}

fn create(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let record = match parse_record(&req.params) {
        Ok(r) => r,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    match repo::add(store, &state.config, record) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => repo_err(&req.id, e),
    }
}

fn update(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match require_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(raw) = req.params.get("student") else {
        return err(&req.id, "bad_params", "missing params.student", None);
    };
    let record = match parse_record(raw) {
        Ok(r) => r,
        Err(m) => return err(&req.id, "bad_params", m, None),
    };
    match repo::update(store, &state.config, id, record) {
        Ok(student) => ok(&req.id, json!({ "student": student })),
        Err(e) => repo_err(&req.id, e),
    }
}

fn delete(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match require_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match repo::delete(store, id) {
        Ok(()) => ok(&req.id, json!({ "deleted": true })),
        Err(e) => repo_err(&req.id, e),
    }
}

fn check_id(state: &AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match require_id(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match repo::check_id_available(store, id) {
        Ok(available) => ok(&req.id, json!({ "available": available })),
        Err(e) => repo_err(&req.id, e),
    }
}
