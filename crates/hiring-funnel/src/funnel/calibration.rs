//! Per-interviewer pass rates and how often their calls match the final outcome.

use super::aggregate::ApplicationRecords;
use super::domain::{Recommendation, Stage};
use super::outcome::OutcomeSets;
use super::percent::{percent_of, Percentage};
use crate::harvest::{ApplicationId, Scorecard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which scorecards feed an interviewer's alignment figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignmentMode {
    /// Every scorecard across the three stages.
    #[default]
    AllStages,
    /// Only the interviewer's last stage (in funnel order) with any scorecard. This
    /// reproduces the historical report, whose loop measured alignment on whichever stage
    /// it visited last.
    LastStageOnly,
}

#[derive(Debug, Clone, Serialize)]
pub struct StageCalibration {
    pub stage: Stage,
    pub interviews: usize,
    pub passes: usize,
    pub pass_rate: Percentage,
}

impl StageCalibration {
    /// "67% over 3 phone screens", or "no phone screens" for an empty stage.
    pub fn summary(&self) -> String {
        match self.interviews {
            0 => format!("no {}", self.stage.plural()),
            1 => format!("{} over 1 {}", self.pass_rate, self.stage.singular()),
            interviews => format!(
                "{} over {} {}",
                self.pass_rate,
                interviews,
                self.stage.plural()
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewerCalibration {
    pub name: String,
    pub stages: Vec<StageCalibration>,
    pub interviews: usize,
    pub passes: usize,
    pub pass_rate: Percentage,
    /// Scorecards the alignment figure was computed over.
    pub alignment_sample: usize,
    pub aligned: usize,
    pub alignment: Percentage,
}

impl InterviewerCalibration {
    pub fn stage(&self, stage: Stage) -> Option<&StageCalibration> {
        self.stages.iter().find(|entry| entry.stage == stage)
    }
}

/// One interviewer's scorecards as (application, said yes), per stage, in discovery order.
/// A scorecard without a decision counts as not saying yes.
#[derive(Default)]
struct InterviewerCalls {
    stages: [Vec<(ApplicationId, bool)>; Stage::COUNT],
}

/// Calibration for every interviewer, sorted ascending by overall pass rate. Ties keep
/// discovery order: applications by id, stages in funnel order, scorecards in bucket order.
pub fn calibrate_interviewers(
    records: &ApplicationRecords<'_>,
    outcomes: &OutcomeSets,
    mode: AlignmentMode,
) -> Vec<InterviewerCalibration> {
    let mut order: Vec<&str> = Vec::new();
    let mut calls: HashMap<&str, InterviewerCalls> = HashMap::new();

    for (id, record) in records {
        for (stage, scorecards) in record.stages.iter() {
            for scorecard in scorecards {
                let name = scorecard.submitted_by.name.as_str();
                let entry = calls.entry(name).or_insert_with(|| {
                    order.push(name);
                    InterviewerCalls::default()
                });
                entry.stages[stage.index()].push((*id, said_yes(scorecard)));
            }
        }
    }

    let mut calibrations: Vec<InterviewerCalibration> = order
        .into_iter()
        .filter_map(|name| {
            calls
                .get(name)
                .map(|interviewer| summarize(name, interviewer, outcomes, mode))
        })
        .collect();

    calibrations.sort_by_key(|calibration| calibration.pass_rate);
    calibrations
}

fn said_yes(scorecard: &Scorecard) -> bool {
    Recommendation::of(scorecard).passed() == Some(true)
}

fn summarize(
    name: &str,
    interviewer: &InterviewerCalls,
    outcomes: &OutcomeSets,
    mode: AlignmentMode,
) -> InterviewerCalibration {
    let stages: Vec<StageCalibration> = Stage::ordered()
        .into_iter()
        .map(|stage| {
            let calls = &interviewer.stages[stage.index()];
            let passes = calls.iter().filter(|(_, passed)| *passed).count();
            StageCalibration {
                stage,
                interviews: calls.len(),
                passes,
                pass_rate: percent_of(passes, calls.len()),
            }
        })
        .collect();

    let interviews = stages.iter().map(|stage| stage.interviews).sum();
    let passes = stages.iter().map(|stage| stage.passes).sum();

    let sample: Vec<&(ApplicationId, bool)> = match mode {
        AlignmentMode::AllStages => interviewer.stages.iter().flatten().collect(),
        AlignmentMode::LastStageOnly => interviewer
            .stages
            .iter()
            .rev()
            .find(|calls| !calls.is_empty())
            .map(|calls| calls.iter().collect())
            .unwrap_or_default(),
    };
    let aligned = sample
        .iter()
        .filter(|(application_id, passed)| *passed == outcomes.is_offered(*application_id))
        .count();

    InterviewerCalibration {
        name: name.to_string(),
        stages,
        interviews,
        passes,
        pass_rate: percent_of(passes, interviews),
        alignment_sample: sample.len(),
        aligned,
        alignment: percent_of(aligned, sample.len()),
    }
}
