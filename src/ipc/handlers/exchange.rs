use std::path::PathBuf;

use serde_json::json;

use crate::exchange;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "exchange.importCsv" => Some(import_csv(state, req)),
        "exchange.exportCsv" => Some(export_csv(state, req)),
        _ => None,
    }
}

fn path_param(req: &Request, key: &str) -> Result<PathBuf, serde_json::Value> {
    req.params
        .get(key)
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing params.{key}"), None))
}

fn import_csv(state: &AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let path = match path_param(req, "path") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match exchange::import_csv(store, &state.config, &path) {
        Ok(outcome) => ok(&req.id, json!(outcome)),
        Err(e) => err(&req.id, "import_failed", format!("{e:#}"), None),
    }
}

fn export_csv(state: &AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let path = match path_param(req, "path") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match exchange::export_csv(store, &path) {
        Ok(count) => ok(&req.id, json!({ "exportedCount": count })),
        Err(e) => err(&req.id, "export_failed", format!("{e:#}"), None),
    }
}
