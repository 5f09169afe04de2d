//! Data source for the analysis: Harvest API collections with a local JSON cache.

mod cache;
mod client;
pub mod records;

pub use cache::RecordCache;
pub use client::{HarvestClient, PageSource};
pub use records::{
    Application, ApplicationId, Candidate, Department, HarvestSnapshot, Interviewer, Job,
    Reference, RejectionReason, RejectionType, Scorecard, ScorecardQuestion,
};

use crate::config::HarvestConfig;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashSet;
use std::path::PathBuf;

/// Collections pulled from Harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Departments,
    Jobs,
    Applications,
    Candidates,
    Scorecards,
}

impl RecordKind {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::Jobs => "jobs",
            Self::Applications => "applications",
            Self::Candidates => "candidates",
            Self::Scorecards => "scorecards",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HarvestError {
    #[error("Harvest request failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("Harvest responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("no cached {} and HARVEST_API_TOKEN is not set", .kind.path())]
    MissingToken { kind: RecordKind },
    #[error("cache {path} is not accessible: {source}")]
    CacheIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cache {path} does not hold a JSON array: {source}")]
    CacheFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} record #{index} is malformed: {source}", .kind.path())]
    Decode {
        kind: RecordKind,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Builds a [`HarvestSnapshot`] from the cache, falling back to the API for collections
/// that are not cached yet (or for all of them when refreshing).
pub struct SnapshotLoader<S> {
    source: Option<S>,
    cache: RecordCache,
    refresh: bool,
}

impl SnapshotLoader<HarvestClient> {
    /// Loader backed by the real API. Without a token only cached collections can load.
    pub fn from_config(config: &HarvestConfig) -> Result<Self, HarvestError> {
        let source = config
            .api_token
            .as_deref()
            .map(|token| HarvestClient::new(config, token))
            .transpose()?;

        Ok(Self::new(
            source,
            RecordCache::new(config.data_dir.clone()),
            config.refresh,
        ))
    }
}

impl<S: PageSource> SnapshotLoader<S> {
    pub fn new(source: Option<S>, cache: RecordCache, refresh: bool) -> Self {
        Self {
            source,
            cache,
            refresh,
        }
    }

    pub async fn load(&self) -> Result<HarvestSnapshot, HarvestError> {
        Ok(HarvestSnapshot {
            departments: self.collection(RecordKind::Departments).await?,
            jobs: self.collection(RecordKind::Jobs).await?,
            applications: self.collection(RecordKind::Applications).await?,
            candidates: self.collection(RecordKind::Candidates).await?,
            scorecards: self.collection(RecordKind::Scorecards).await?,
        })
    }

    async fn collection<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
    ) -> Result<Vec<T>, HarvestError> {
        let raw = self.raw_records(kind).await?;
        tracing::info!(kind = kind.path(), count = raw.len(), "loaded records");

        raw.into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value(value).map_err(|source| HarvestError::Decode {
                    kind,
                    index,
                    source,
                })
            })
            .collect()
    }

    async fn raw_records(&self, kind: RecordKind) -> Result<Vec<Value>, HarvestError> {
        if !self.refresh {
            if let Some(records) = self.cache.read(kind)? {
                tracing::info!(
                    path = %self.cache.path_for(kind).display(),
                    "reading cached records"
                );
                return Ok(records);
            }
        }

        let source = self
            .source
            .as_ref()
            .ok_or(HarvestError::MissingToken { kind })?;
        let records = fetch_all(source, kind).await?;
        self.cache.write(kind, &records)?;
        Ok(records)
    }
}

/// Walks pages until an empty one, keeping the first copy of any id seen twice. Records
/// shift between pages when the collection changes mid-fetch.
async fn fetch_all<S: PageSource>(
    source: &S,
    kind: RecordKind,
) -> Result<Vec<Value>, HarvestError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();
    let mut page = 1;

    loop {
        let batch = source.fetch_page(kind, page).await?;
        tracing::info!(kind = kind.path(), page, count = batch.len(), "fetched page");
        if batch.is_empty() {
            break;
        }

        let before = records.len();
        for record in batch {
            match record.get("id").and_then(Value::as_u64) {
                Some(id) if !seen.insert(id) => {
                    tracing::debug!(kind = kind.path(), id, "skipping duplicate record");
                }
                _ => records.push(record),
            }
        }
        // A server that ignores `page` keeps returning the same records.
        if records.len() == before {
            tracing::warn!(kind = kind.path(), page, "page added no new records, stopping");
            break;
        }
        page += 1;
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakePages {
        pages: HashMap<(&'static str, u32), Vec<Value>>,
        requests: Mutex<Vec<(&'static str, u32)>>,
    }

    impl FakePages {
        fn with_page(mut self, kind: RecordKind, page: u32, records: Vec<Value>) -> Self {
            self.pages.insert((kind.path(), page), records);
            self
        }

        fn requests(&self) -> Vec<(&'static str, u32)> {
            self.requests.lock().expect("requests mutex poisoned").clone()
        }
    }

    impl PageSource for FakePages {
        async fn fetch_page(
            &self,
            kind: RecordKind,
            page: u32,
        ) -> Result<Vec<Value>, HarvestError> {
            self.requests
                .lock()
                .expect("requests mutex poisoned")
                .push((kind.path(), page));
            Ok(self
                .pages
                .get(&(kind.path(), page))
                .cloned()
                .unwrap_or_default())
        }
    }

    fn full_source() -> FakePages {
        FakePages::default()
            .with_page(RecordKind::Departments, 1, vec![json!({"id": 1, "name": "Tech"})])
            .with_page(
                RecordKind::Jobs,
                1,
                vec![json!({"id": 10, "departments": [{"id": 1, "name": "Tech"}]})],
            )
            .with_page(
                RecordKind::Applications,
                1,
                vec![json!({"id": 100, "candidate_id": 1000, "status": "hired", "jobs": [{"id": 10}]})],
            )
            .with_page(
                RecordKind::Candidates,
                1,
                vec![json!({"id": 1000, "first_name": "Ada", "last_name": "Lovelace"})],
            )
            .with_page(
                RecordKind::Scorecards,
                1,
                vec![json!({
                    "id": 5000,
                    "application_id": 100,
                    "interview": "Dev Round 1 - Phone Screen",
                    "submitted_by": {"id": 1, "name": "Grace Hopper"},
                    "overall_recommendation": "yes"
                })],
            )
            .with_page(
                RecordKind::Scorecards,
                2,
                vec![
                    json!({
                        "id": 5000,
                        "application_id": 100,
                        "interview": "Dev Round 1 - Phone Screen",
                        "submitted_by": {"id": 1, "name": "Grace Hopper"},
                        "overall_recommendation": "yes"
                    }),
                    json!({
                        "id": 5001,
                        "application_id": 100,
                        "interview": "Dev Round 2 - Technical Interview 1",
                        "submitted_by": {"id": 2, "name": "Alan Turing"},
                        "overall_recommendation": "no"
                    }),
                ],
            )
    }

    #[tokio::test]
    async fn fetches_until_empty_page_and_drops_duplicates() {
        let source = full_source();
        let scorecards = fetch_all(&source, RecordKind::Scorecards)
            .await
            .expect("fetch succeeds");

        assert_eq!(scorecards.len(), 2);
        assert_eq!(
            source.requests(),
            vec![("scorecards", 1), ("scorecards", 2), ("scorecards", 3)]
        );
    }

    #[tokio::test]
    async fn stops_when_a_page_repeats_earlier_records() {
        let tech = json!({"id": 1, "name": "Tech"});
        let source = FakePages::default()
            .with_page(RecordKind::Departments, 1, vec![tech.clone()])
            .with_page(RecordKind::Departments, 2, vec![tech.clone()])
            .with_page(RecordKind::Departments, 3, vec![tech]);

        let departments = fetch_all(&source, RecordKind::Departments)
            .await
            .expect("fetch succeeds");

        assert_eq!(departments.len(), 1);
        assert_eq!(
            source.requests(),
            vec![("departments", 1), ("departments", 2)]
        );
    }

    #[tokio::test]
    async fn load_populates_cache_and_reuses_it() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loader = SnapshotLoader::new(Some(full_source()), RecordCache::new(dir.path()), false);
        let snapshot = loader.load().await.expect("snapshot loads");
        assert_eq!(snapshot.departments.len(), 1);
        assert_eq!(snapshot.scorecards.len(), 2);
        assert_eq!(snapshot.candidates[0].display_name(), "Ada Lovelace");

        let offline: SnapshotLoader<FakePages> =
            SnapshotLoader::new(None, RecordCache::new(dir.path()), false);
        let cached = offline.load().await.expect("cached snapshot loads");
        assert_eq!(cached.applications, snapshot.applications);
        assert_eq!(cached.scorecards, snapshot.scorecards);
    }

    #[tokio::test]
    async fn refresh_ignores_cache() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = RecordCache::new(dir.path());
        cache
            .write(RecordKind::Departments, &[json!({"id": 9, "name": "Stale"})])
            .expect("seed cache");

        let loader = SnapshotLoader::new(Some(full_source()), cache.clone(), true);
        let snapshot = loader.load().await.expect("snapshot loads");
        assert_eq!(snapshot.departments[0].name, "Tech");

        let rewritten = cache
            .read(RecordKind::Departments)
            .expect("read")
            .expect("cached");
        assert_eq!(rewritten, vec![json!({"id": 1, "name": "Tech"})]);
    }

    #[tokio::test]
    async fn missing_cache_without_token_names_the_collection() {
        let dir = tempfile::tempdir().expect("temp dir");
        let loader: SnapshotLoader<FakePages> =
            SnapshotLoader::new(None, RecordCache::new(dir.path()), false);

        let err = loader.load().await.expect_err("nothing to load");
        assert!(matches!(
            err,
            HarvestError::MissingToken {
                kind: RecordKind::Departments
            }
        ));
        assert!(err.to_string().contains("departments"));
    }

    #[tokio::test]
    async fn malformed_record_reports_its_position() {
        let dir = tempfile::tempdir().expect("temp dir");
        let cache = RecordCache::new(dir.path());
        cache
            .write(
                RecordKind::Departments,
                &[json!({"id": 1, "name": "Tech"}), json!({"name": "No id"})],
            )
            .expect("seed cache");

        let loader: SnapshotLoader<FakePages> = SnapshotLoader::new(None, cache, false);
        match loader.load().await {
            Err(HarvestError::Decode { kind, index, .. }) => {
                assert_eq!(kind, RecordKind::Departments);
                assert_eq!(index, 1);
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
