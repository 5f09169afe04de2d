use super::domain::{ApplicationStatus, FunnelError, RejectionDirection, Stage};
use super::stage_map::StageMap;
use crate::harvest::{Application, ApplicationId, Candidate, Scorecard};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

/// Scorecards of one application split by funnel stage.
#[derive(Debug, Clone, Default)]
pub struct StageBuckets<'a> {
    buckets: [Vec<&'a Scorecard>; Stage::COUNT],
}

impl<'a> StageBuckets<'a> {
    pub fn get(&self, stage: Stage) -> &[&'a Scorecard] {
        &self.buckets[stage.index()]
    }

    pub fn reached(&self, stage: Stage) -> bool {
        !self.buckets[stage.index()].is_empty()
    }

    pub fn push(&mut self, stage: Stage, scorecard: &'a Scorecard) {
        self.buckets[stage.index()].push(scorecard);
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Stages in funnel order with their scorecards, empty stages included.
    pub fn iter(&self) -> impl Iterator<Item = (Stage, &[&'a Scorecard])> {
        Stage::ordered()
            .into_iter()
            .map(move |stage| (stage, self.get(stage)))
    }
}

/// Per-application funnel position with the metadata the statistics need.
#[derive(Debug, Clone)]
pub struct ApplicationRecord<'a> {
    pub application_id: ApplicationId,
    pub candidate_name: String,
    pub status: ApplicationStatus,
    pub rejection_direction: Option<RejectionDirection>,
    pub stages: StageBuckets<'a>,
}

pub type ApplicationRecords<'a> = BTreeMap<ApplicationId, ApplicationRecord<'a>>;

/// Groups filtered scorecards by application. Scorecards whose interview is not in the
/// stage map are skipped; filtered input never contains any.
pub fn aggregate_applications<'a>(
    scorecards: &[&'a Scorecard],
    applications: &[Application],
    candidates: &[Candidate],
    stage_map: &StageMap,
) -> Result<ApplicationRecords<'a>, FunnelError> {
    let applications_by_id: HashMap<ApplicationId, &Application> = applications
        .iter()
        .map(|application| (application.id, application))
        .collect();
    let candidates_by_id: HashMap<u64, &Candidate> = candidates
        .iter()
        .map(|candidate| (candidate.id, candidate))
        .collect();

    let mut records = ApplicationRecords::new();
    for &scorecard in scorecards {
        let Some(stage) = stage_map.stage_for(&scorecard.interview) else {
            continue;
        };

        let record = match records.entry(scorecard.application_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let application = applications_by_id
                    .get(&scorecard.application_id)
                    .ok_or(FunnelError::MissingApplication {
                        scorecard_id: scorecard.id,
                        application_id: scorecard.application_id,
                    })?;
                let candidate = candidates_by_id.get(&application.candidate_id).ok_or(
                    FunnelError::MissingCandidate {
                        application_id: application.id,
                        candidate_id: application.candidate_id,
                    },
                )?;

                entry.insert(ApplicationRecord {
                    application_id: application.id,
                    candidate_name: candidate.display_name(),
                    status: ApplicationStatus::parse(&application.status),
                    rejection_direction: application
                        .rejection_type_name()
                        .map(RejectionDirection::parse),
                    stages: StageBuckets::default(),
                })
            }
        };
        record.stages.push(stage, scorecard);
    }

    tracing::debug!(applications = records.len(), "aggregated scorecards");
    Ok(records)
}
