//! Agreement between the two technical interviewers of the second round.
//!
//! The pair string keeps scorecard encounter order, so "10" and "01" carry no information
//! about who interviewed first. Both count as a disagreement.

use super::aggregate::ApplicationRecords;
use super::domain::{Recommendation, Stage};
use super::outcome::OutcomeSets;
use super::percent::{percent_of, Percentage, Share};
use crate::harvest::ApplicationId;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static NON_TECHNICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)non.technical").expect("non-technical pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicalPairing {
    PassedBoth,
    FailedBoth,
    Disagreement,
}

pub fn is_non_technical(interview: &str) -> bool {
    NON_TECHNICAL.is_match(interview)
}

/// Classifies a technical result string; anything but exactly two results is excluded.
pub fn classify_technical(results: &str) -> Option<TechnicalPairing> {
    match results {
        "11" => Some(TechnicalPairing::PassedBoth),
        "00" => Some(TechnicalPairing::FailedBoth),
        "01" | "10" => Some(TechnicalPairing::Disagreement),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalPair {
    pub application_id: ApplicationId,
    pub results: String,
    pub pairing: TechnicalPairing,
    pub reached_final_round: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassRate {
    pub interviews: usize,
    pub passes: usize,
    pub pass_rate: Percentage,
}

impl PassRate {
    pub fn new(interviews: usize, passes: usize) -> Self {
        Self {
            interviews,
            passes,
            pass_rate: percent_of(passes, interviews),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DisagreementReport {
    /// Applications with exactly two technical results.
    pub paired: usize,
    /// Applications with technical scorecards but not exactly two results.
    pub excluded: usize,
    pub passed_both: Share,
    pub failed_both: Share,
    pub disagreements: Share,
    pub disagreements_reaching_final: Share,
    pub disagreements_offered: Share,
    /// Disagreements that reached the final round and were rejected there.
    pub disagreements_rejected_after_final: Share,
    pub non_technical: PassRate,
    pub pairs: Vec<TechnicalPair>,
}

pub fn analyze_disagreements(
    records: &ApplicationRecords<'_>,
    outcomes: &OutcomeSets,
) -> DisagreementReport {
    let mut pairs = Vec::new();
    let mut excluded = 0;
    let mut non_technical_interviews = 0;
    let mut non_technical_passes = 0;

    for (id, record) in records {
        let mut results = String::new();
        let mut technical = 0;

        for scorecard in record.stages.get(Stage::SecondRound) {
            let recommendation = Recommendation::of(scorecard);
            if is_non_technical(&scorecard.interview) {
                non_technical_interviews += 1;
                non_technical_passes += usize::from(recommendation.passed() == Some(true));
            } else {
                technical += 1;
                results.extend(recommendation.binary_char());
            }
        }

        match classify_technical(&results) {
            Some(pairing) => pairs.push(TechnicalPair {
                application_id: *id,
                results,
                pairing,
                reached_final_round: record.stages.reached(Stage::FinalRound),
            }),
            None if technical > 0 => excluded += 1,
            None => {}
        }
    }

    let paired = pairs.len();
    let count = |pairing: TechnicalPairing| {
        pairs
            .iter()
            .filter(|pair| pair.pairing == pairing)
            .count()
    };
    let disagreements: Vec<&TechnicalPair> = pairs
        .iter()
        .filter(|pair| pair.pairing == TechnicalPairing::Disagreement)
        .collect();
    let disagreement_count = disagreements.len();
    let reaching_final = disagreements
        .iter()
        .filter(|pair| pair.reached_final_round)
        .count();
    let offered = disagreements
        .iter()
        .filter(|pair| outcomes.offered.contains(&pair.application_id))
        .count();
    let rejected = disagreements
        .iter()
        .filter(|pair| outcomes.rejected.contains(&pair.application_id))
        .count();

    tracing::debug!(
        paired,
        excluded,
        disagreements = disagreement_count,
        "analyzed second-round pairs"
    );

    DisagreementReport {
        paired,
        excluded,
        passed_both: Share::of(count(TechnicalPairing::PassedBoth), paired),
        failed_both: Share::of(count(TechnicalPairing::FailedBoth), paired),
        disagreements: Share::of(disagreement_count, paired),
        disagreements_reaching_final: Share::of(reaching_final, disagreement_count),
        disagreements_offered: Share::of(offered, disagreement_count),
        disagreements_rejected_after_final: Share::of(rejected, disagreement_count),
        non_technical: PassRate::new(non_technical_interviews, non_technical_passes),
        pairs,
    }
}
