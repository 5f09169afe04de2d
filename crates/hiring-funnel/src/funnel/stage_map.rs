use super::domain::Stage;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Interview-type name to funnel stage. Interviews missing from the map are outside the
/// analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageMap {
    stages: BTreeMap<String, Stage>,
}

impl StageMap {
    /// Interview kits of the engineering pipeline the analysis was first written for.
    pub fn standard() -> Self {
        Self::default()
            .with("Dev Round 1 - Phone Screen", Stage::PhoneScreen)
            .with("Dev Round 2 - Technical Interview 1", Stage::SecondRound)
            .with("Dev Round 2 - Technical Interview 2", Stage::SecondRound)
            .with("Dev Round 2 - Non-Technical Interview", Stage::SecondRound)
            .with("Dev Second Round - Pair Programming", Stage::SecondRound)
            .with("Dev Peer Panel Review", Stage::FinalRound)
    }

    pub fn with(mut self, interview: impl Into<String>, stage: Stage) -> Self {
        self.insert(interview, stage);
        self
    }

    pub fn insert(&mut self, interview: impl Into<String>, stage: Stage) -> Option<Stage> {
        self.stages.insert(interview.into(), stage)
    }

    pub fn stage_for(&self, interview: &str) -> Option<Stage> {
        self.stages.get(interview).copied()
    }

    pub fn contains(&self, interview: &str) -> bool {
        self.stages.contains_key(interview)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Stage)> {
        self.stages
            .iter()
            .map(|(interview, stage)| (interview.as_str(), *stage))
    }

    /// Parses `{"<interview>": "<stage name>" | <stage index>}`.
    pub fn from_json(raw: &str) -> Result<Self, StageMapError> {
        let entries: BTreeMap<String, StageSpec> = serde_json::from_str(raw)?;
        if entries.is_empty() {
            return Err(StageMapError::Empty);
        }

        let mut map = Self::default();
        for (interview, spec) in entries {
            let stage = match spec {
                StageSpec::Named(stage) => stage,
                StageSpec::Index(index) => Stage::from_index(index).ok_or_else(|| {
                    StageMapError::IndexOutOfRange {
                        interview: interview.clone(),
                        index,
                    }
                })?,
            };
            map.insert(interview, stage);
        }
        Ok(map)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StageSpec {
    Index(usize),
    Named(Stage),
}

#[derive(Debug, thiserror::Error)]
pub enum StageMapError {
    #[error("stage map is not a JSON object of interview names to stages: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stage map has no entries")]
    Empty,
    #[error("stage index {index} for '{interview}' is out of range (expected 0, 1 or 2)")]
    IndexOutOfRange { interview: String, index: usize },
}
