use super::{HarvestError, RecordKind};
use serde_json::Value;
use std::path::PathBuf;

/// One JSON array file per collection under a data directory.
#[derive(Debug, Clone)]
pub struct RecordCache {
    dir: PathBuf,
}

impl RecordCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(format!("{}.json", kind.path()))
    }

    /// Cached records for `kind`, or `None` when nothing has been cached yet.
    pub fn read(&self, kind: RecordKind) -> Result<Option<Vec<Value>>, HarvestError> {
        let path = self.path_for(kind);
        if !path.is_file() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| HarvestError::CacheIo {
            path: path.clone(),
            source,
        })?;
        let records = serde_json::from_str(&raw)
            .map_err(|source| HarvestError::CacheFormat { path, source })?;
        Ok(Some(records))
    }

    pub fn write(&self, kind: RecordKind, records: &[Value]) -> Result<(), HarvestError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| HarvestError::CacheIo {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.path_for(kind);
        let body = serde_json::to_vec(records).map_err(|source| HarvestError::CacheFormat {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, body).map_err(|source| HarvestError::CacheIo { path, source })
    }
}
