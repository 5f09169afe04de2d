use super::aggregate::ApplicationRecords;
use super::domain::Stage;
use super::outcome::OutcomeSets;
use super::percent::{percent_of, Percentage, Share};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StageTotal {
    pub stage: Stage,
    pub stage_label: &'static str,
    pub applications: usize,
    /// Share of the previous stage's applications; absent for the first stage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion: Option<Percentage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FunnelStats {
    pub stages: Vec<StageTotal>,
    pub offered: Share,
    pub rejected: Share,
    pub active: Share,
    pub unclassified: usize,
}

impl FunnelStats {
    pub fn total(&self, stage: Stage) -> usize {
        self.stages
            .iter()
            .find(|entry| entry.stage == stage)
            .map_or(0, |entry| entry.applications)
    }
}

pub fn funnel_stats(records: &ApplicationRecords<'_>, outcomes: &OutcomeSets) -> FunnelStats {
    let mut totals = [0usize; Stage::COUNT];
    for record in records.values() {
        for stage in Stage::ordered() {
            if record.stages.reached(stage) {
                totals[stage.index()] += 1;
            }
        }
    }

    let stages = Stage::ordered()
        .into_iter()
        .map(|stage| {
            let applications = totals[stage.index()];
            let conversion = stage
                .index()
                .checked_sub(1)
                .map(|previous| percent_of(applications, totals[previous]));
            StageTotal {
                stage,
                stage_label: stage.label(),
                applications,
                conversion,
            }
        })
        .collect();

    let finals = totals[Stage::FinalRound.index()];
    FunnelStats {
        stages,
        offered: Share::of(outcomes.offered.len(), finals),
        rejected: Share::of(outcomes.rejected.len(), finals),
        active: Share::of(outcomes.active.len(), finals),
        unclassified: outcomes.unclassified.len(),
    }
}
