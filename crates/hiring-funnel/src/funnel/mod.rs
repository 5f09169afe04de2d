pub mod aggregate;
pub mod calibration;
pub mod disagreement;
pub mod domain;
mod export;
pub mod filter;
pub mod final_rounds;
pub mod outcome;
mod percent;
pub mod questions;
pub mod report;
pub mod stage_map;
pub mod stats;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate_applications, ApplicationRecord, ApplicationRecords, StageBuckets};
pub use calibration::{
    calibrate_interviewers, AlignmentMode, InterviewerCalibration, StageCalibration,
};
pub use disagreement::{analyze_disagreements, DisagreementReport, TechnicalPairing};
pub use domain::{
    ApplicationStatus, FunnelError, OutcomeDecision, Recommendation, RejectionDirection, Stage,
};
pub use export::write_calibration_csv;
pub use filter::{filter_scope, resolve_department, FilteredScope, InterviewTypeCount};
pub use final_rounds::{final_round_results, FinalRoundResult};
pub use outcome::{classify_outcomes, OutcomeSets};
pub use percent::{percent_of, Percentage, Share};
pub use questions::{phone_screen_questions, QuestionFrequencies};
pub use report::{DepartmentSummary, FunnelAnalysis, HiringReport};
pub use stage_map::{StageMap, StageMapError};
pub use stats::{funnel_stats, FunnelStats};
