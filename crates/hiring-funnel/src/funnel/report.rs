use super::aggregate::aggregate_applications;
use super::calibration::{calibrate_interviewers, AlignmentMode, InterviewerCalibration};
use super::disagreement::{analyze_disagreements, DisagreementReport};
use super::domain::FunnelError;
use super::filter::{filter_scope, InterviewTypeCount};
use super::final_rounds::{final_round_results, FinalRoundResult};
use super::outcome::{classify_outcomes, OutcomeSets};
use super::questions::{phone_screen_questions, QuestionFrequencies};
use super::stats::{funnel_stats, FunnelStats};
use crate::config::FunnelConfig;
use crate::harvest::HarvestSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentSummary {
    pub id: u64,
    pub name: String,
    pub jobs: usize,
    pub applications: usize,
    /// Scorecards whose interview is in the stage map.
    pub scorecards: usize,
}

/// Everything one analysis run produces for a department.
#[derive(Debug, Clone, Serialize)]
pub struct HiringReport {
    pub department: DepartmentSummary,
    pub interview_types: Vec<InterviewTypeCount>,
    pub funnel: FunnelStats,
    pub outcomes: OutcomeSets,
    pub disagreement: DisagreementReport,
    pub final_rounds: Vec<FinalRoundResult>,
    pub phone_screen_questions: QuestionFrequencies,
    pub alignment_mode: AlignmentMode,
    pub interviewers: Vec<InterviewerCalibration>,
}

pub struct FunnelAnalysis;

impl FunnelAnalysis {
    pub fn run(
        snapshot: &HarvestSnapshot,
        config: &FunnelConfig,
    ) -> Result<HiringReport, FunnelError> {
        let scope = filter_scope(snapshot, &config.department, &config.stage_map)?;
        let records = aggregate_applications(
            &scope.scorecards,
            &snapshot.applications,
            &snapshot.candidates,
            &config.stage_map,
        )?;
        let outcomes = classify_outcomes(&records);

        let report = HiringReport {
            department: DepartmentSummary {
                id: scope.department.id,
                name: scope.department.name.clone(),
                jobs: scope.job_ids.len(),
                applications: scope.application_ids.len(),
                scorecards: scope.scorecards.len(),
            },
            funnel: funnel_stats(&records, &outcomes),
            disagreement: analyze_disagreements(&records, &outcomes),
            final_rounds: final_round_results(&records, &outcomes),
            phone_screen_questions: phone_screen_questions(&records),
            alignment_mode: config.alignment,
            interviewers: calibrate_interviewers(&records, &outcomes, config.alignment),
            interview_types: scope.interview_types,
            outcomes,
        };

        tracing::info!(
            department = %report.department.name,
            applications = records.len(),
            interviewers = report.interviewers.len(),
            "funnel analysis complete"
        );
        Ok(report)
    }
}
