use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::codec::{self, Record};

pub const DATA_FILE_NAME: &str = "students.txt";

/// A persisted line that failed to decode. Reported to the caller and
/// skipped; never fatal to the load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeWarning {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadResult {
    pub records: Vec<Record>,
    pub warnings: Vec<DecodeWarning>,
}

/// Whole-collection load/save against one flat text file. Every mutation
/// rewrites the file; there is no append path and no partial update.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Binds the store to `<workspace>/students.txt`, creating an empty data
    /// file on first use.
    pub fn open(workspace: &Path) -> anyhow::Result<Store> {
        std::fs::create_dir_all(workspace).with_context(|| {
            format!("failed to create workspace {}", workspace.to_string_lossy())
        })?;
        let path = workspace.join(DATA_FILE_NAME);
        if !path.exists() {
            OpenOptions::new()
                .create(true)
                .write(true)
                .open(&path)
                .with_context(|| {
                    format!("failed to create data file {}", path.to_string_lossy())
                })?;
        }
        Ok(Store { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every line, decodes what it can, and normalizes each record.
    /// Blank lines are skipped silently; malformed lines become warnings.
    pub fn load(&self) -> anyhow::Result<LoadResult> {
        if !self.path.exists() {
            File::create(&self.path).with_context(|| {
                format!("failed to create data file {}", self.path.to_string_lossy())
            })?;
            return Ok(LoadResult::default());
        }
        let text = std::fs::read_to_string(&self.path).with_context(|| {
            format!("failed to read data file {}", self.path.to_string_lossy())
        })?;

        let mut result = LoadResult::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            match codec::decode(line) {
                Ok(rec) => result.records.push(rec.normalized()),
                Err(e) => result.warnings.push(DecodeWarning {
                    line: idx + 1,
                    reason: e.to_string(),
                }),
            }
        }
        Ok(result)
    }

    /// Rewrites the whole file in the given order. Writes to a sibling temp
    /// file and renames over the data file, so a crash mid-write cannot leave
    /// a torn collection behind.
    pub fn save(&self, records: &[Record]) -> anyhow::Result<()> {
        let mut body = String::new();
        for rec in records {
            body.push_str(&codec::encode(rec));
        }

        let tmp = self.path.with_extension("txt.saving");
        {
            let mut f = File::create(&tmp).with_context(|| {
                format!("failed to create temp file {}", tmp.to_string_lossy())
            })?;
            f.write_all(body.as_bytes())
                .with_context(|| format!("failed to write {}", tmp.to_string_lossy()))?;
            f.flush()
                .with_context(|| format!("failed to flush {}", tmp.to_string_lossy()))?;
        }
        std::fs::rename(&tmp, &self.path).with_context(|| {
            format!(
                "failed to move {} to {}",
                tmp.to_string_lossy(),
                self.path.to_string_lossy()
            )
        })?;
        Ok(())
    }
}
