use std::path::Path;

use anyhow::{anyhow, Context};
use serde::Serialize;

use crate::codec::{self, Record};
use crate::config::Config;
use crate::store::Store;
use crate::validate;

const HEADER_FIELDS: [&str; 5] = ["id", "name", "age", "grade", "marks"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub imported_count: usize,
    pub errors: Vec<RowError>,
}

/// Import header-plus-rows CSV. Rows are validated against the existing
/// collection plus every row already accepted in this batch, so an id
/// duplicated within the file is rejected from its second occurrence on.
/// The valid subset commits even when some rows fail.
pub fn import_csv(store: &Store, config: &Config, path: &Path) -> anyhow::Result<ImportOutcome> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read import file {}", path.to_string_lossy()))?;

    let mut lines = text.lines().enumerate();
    let header = loop {
        match lines.next() {
            Some((_, raw)) if raw.trim().is_empty() => continue,
            Some((_, raw)) => break raw,
            None => return Err(anyhow!("import file is empty")),
        }
    };
    let names: Vec<String> = header
        .split(codec::FIELD_DELIMITER)
        .map(|f| f.trim().to_ascii_lowercase())
        .collect();
    if names != HEADER_FIELDS {
        return Err(anyhow!(
            "unexpected header: expected {}, found {:?}",
            HEADER_FIELDS.join(","),
            header
        ));
    }

    let mut loaded = store.load()?;
    let mut outcome = ImportOutcome {
        imported_count: 0,
        errors: Vec::new(),
    };

    for (idx, raw) in lines {
        let row = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let record = match codec::decode(line) {
            Ok(rec) => rec.normalized(),
            Err(e) => {
                outcome.errors.push(RowError {
                    row,
                    message: e.to_string(),
                });
                continue;
            }
        };
        let errors = validate::validate_record(&record, &loaded.records, None, config);
        if !errors.is_empty() {
            let message = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            outcome.errors.push(RowError { row, message });
            continue;
        }
        loaded.records.push(record);
        outcome.imported_count += 1;
    }

    if outcome.imported_count > 0 {
        store.save(&loaded.records)?;
    }
    Ok(outcome)
}

/// Export the whole collection as header-plus-rows CSV in field order.
pub fn export_csv(store: &Store, path: &Path) -> anyhow::Result<usize> {
    let loaded = store.load()?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create directory {}", parent.to_string_lossy())
            })?;
        }
    }
    let mut body = String::new();
    body.push_str(&HEADER_FIELDS.join(","));
    body.push('\n');
    for rec in &loaded.records {
        body.push_str(&codec::encode(rec));
    }
    std::fs::write(path, body)
        .with_context(|| format!("failed to write export file {}", path.to_string_lossy()))?;
    Ok(loaded.records.len())
}
