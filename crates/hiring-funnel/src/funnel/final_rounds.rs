use super::aggregate::ApplicationRecords;
use super::domain::{OutcomeDecision, Recommendation, Stage};
use super::outcome::OutcomeSets;
use crate::harvest::ApplicationId;
use serde::Serialize;

/// Final-round panel calls for one application, weakest first, rendered as
/// `.` definitely not, `0` no, `1` yes, `*` strong yes.
#[derive(Debug, Clone, Serialize)]
pub struct FinalRoundResult {
    pub application_id: ApplicationId,
    pub candidate_name: String,
    pub results: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OutcomeDecision>,
}

impl FinalRoundResult {
    pub fn outcome_label(&self) -> &'static str {
        self.outcome.map_or("unclassified", OutcomeDecision::label)
    }
}

/// Applications with at least one decided final-round scorecard, ordered by their sorted
/// calls and then by application id.
pub fn final_round_results(
    records: &ApplicationRecords<'_>,
    outcomes: &OutcomeSets,
) -> Vec<FinalRoundResult> {
    let mut rows: Vec<(Vec<Recommendation>, FinalRoundResult)> = records
        .iter()
        .filter_map(|(id, record)| {
            let mut calls: Vec<Recommendation> = record
                .stages
                .get(Stage::FinalRound)
                .iter()
                .map(|scorecard| Recommendation::of(scorecard))
                .filter(|call| *call != Recommendation::Unknown)
                .collect();
            if calls.is_empty() {
                return None;
            }
            calls.sort();

            let results = calls.iter().filter_map(|call| call.symbol()).collect();
            Some((
                calls,
                FinalRoundResult {
                    application_id: *id,
                    candidate_name: record.candidate_name.clone(),
                    results,
                    status: record.status.label().to_string(),
                    outcome: outcomes.outcome_of(*id),
                },
            ))
        })
        .collect();

    rows.sort_by(|(left_calls, left), (right_calls, right)| {
        left_calls
            .cmp(right_calls)
            .then(left.application_id.cmp(&right.application_id))
    });
    rows.into_iter().map(|(_, result)| result).collect()
}
