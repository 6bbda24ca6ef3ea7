use std::path::PathBuf;

use serde_json::json;

use crate::config::Config;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::Store;

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(ok(
            &req.id,
            json!({
                "version": env!("CARGO_PKG_VERSION"),
                "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
            }),
        )),
        "workspace.select" => {
            let path = req
                .params
                .get("path")
                .and_then(|v| v.as_str())
                .map(PathBuf::from);
            let Some(path) = path else {
                return Some(err(&req.id, "bad_params", "missing params.path", None));
            };

            let config = match req.params.get("config") {
                Some(raw) => match serde_json::from_value::<Config>(raw.clone()) {
                    Ok(c) => c.normalized(),
                    Err(e) => {
                        return Some(err(
                            &req.id,
                            "bad_params",
                            format!("invalid config: {e}"),
                            None,
                        ))
                    }
                },
                None => Config::default(),
            };

            match Store::open(&path) {
                Ok(store) => {
                    state.workspace = Some(path.clone());
                    state.store = Some(store);
                    state.config = config;
                    Some(ok(
                        &req.id,
                        json!({ "workspacePath": path.to_string_lossy() }),
                    ))
                }
                Err(e) => Some(err(&req.id, "storage_failed", format!("{e:#}"), None)),
            }
        }
        _ => None,
    }
}
