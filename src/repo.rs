use crate::codec::Record;
use crate::config::Config;
use crate::store::{LoadResult, Store};
use crate::validate::{self, ValidationError};

/// Outcome of a repository operation. Validation failures carry the full
/// per-field list; storage faults keep their cause and are never fatal to
/// the process.
#[derive(Debug)]
pub enum RepoError {
    Validation(Vec<ValidationError>),
    NotFound(i64),
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for RepoError {
    fn from(e: anyhow::Error) -> Self {
        RepoError::Storage(e)
    }
}

pub fn load_all(store: &Store) -> Result<LoadResult, RepoError> {
    Ok(store.load()?)
}

/// Validate against the current collection, append, rewrite. Storage is
/// untouched when validation fails.
pub fn add(store: &Store, config: &Config, record: Record) -> Result<Record, RepoError> {
    let record = record.normalized();
    let mut loaded = store.load()?;
    let errors = validate::validate_record(&record, &loaded.records, None, config);
    if !errors.is_empty() {
        return Err(RepoError::Validation(errors));
    }
    loaded.records.push(record.clone());
    store.save(&loaded.records)?;
    Ok(record)
}

/// Replace the record holding `id` wholesale, keeping its position. The
/// replacement may carry a different id as long as that id stays unique.
pub fn update(
    store: &Store,
    config: &Config,
    id: i64,
    new_record: Record,
) -> Result<Record, RepoError> {
    let new_record = new_record.normalized();
    let mut loaded = store.load()?;
    let Some(index) = loaded.records.iter().position(|s| s.id == id) else {
        return Err(RepoError::NotFound(id));
    };
    let errors = validate::validate_record(&new_record, &loaded.records, Some(id), config);
    if !errors.is_empty() {
        return Err(RepoError::Validation(errors));
    }
    loaded.records[index] = new_record.clone();
    store.save(&loaded.records)?;
    Ok(new_record)
}

pub fn delete(store: &Store, id: i64) -> Result<(), RepoError> {
    let mut loaded = store.load()?;
    let before = loaded.records.len();
    loaded.records.retain(|s| s.id != id);
    if loaded.records.len() == before {
        return Err(RepoError::NotFound(id));
    }
    store.save(&loaded.records)?;
    Ok(())
}

pub fn find_by_id(store: &Store, id: i64) -> Result<Option<Record>, RepoError> {
    let loaded = store.load()?;
    Ok(loaded.records.into_iter().find(|s| s.id == id))
}

/// Empty query returns everything. Otherwise a record matches when its id
/// printed as text equals the query exactly, or its name contains the query
/// case-insensitively. Results keep file order.
pub fn find_by_query(store: &Store, query: &str) -> Result<Vec<Record>, RepoError> {
    let loaded = store.load()?;
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Ok(loaded.records);
    }
    Ok(loaded
        .records
        .into_iter()
        .filter(|s| s.id.to_string() == needle || s.name.to_lowercase().contains(&needle))
        .collect())
}

/// Live-feedback check only; nothing is reserved between this and a later add.
pub fn check_id_available(store: &Store, id: i64) -> Result<bool, RepoError> {
    let loaded = store.load()?;
    Ok(!loaded.records.iter().any(|s| s.id == id))
}
