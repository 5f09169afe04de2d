use super::domain::{FunnelError, Stage};
use super::stage_map::StageMap;
use crate::harvest::{ApplicationId, Department, HarvestSnapshot, Scorecard};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Department-scoped view of a snapshot.
#[derive(Debug)]
pub struct FilteredScope<'a> {
    pub department: &'a Department,
    pub job_ids: BTreeSet<u64>,
    pub application_ids: BTreeSet<ApplicationId>,
    /// In-scope scorecards whose interview is in the stage map, in snapshot order.
    pub scorecards: Vec<&'a Scorecard>,
    pub interview_types: Vec<InterviewTypeCount>,
}

/// Scorecard volume for one interview name seen in the department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterviewTypeCount {
    pub interview: String,
    pub scorecards: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
}

/// First department whose lower-cased name equals the lower-cased target.
pub fn resolve_department<'a>(
    departments: &'a [Department],
    name: &str,
) -> Result<&'a Department, FunnelError> {
    let target = name.to_lowercase();
    departments
        .iter()
        .find(|department| department.name.to_lowercase() == target)
        .ok_or_else(|| FunnelError::DepartmentNotFound {
            name: name.to_string(),
        })
}

pub fn filter_scope<'a>(
    snapshot: &'a HarvestSnapshot,
    department: &str,
    stage_map: &StageMap,
) -> Result<FilteredScope<'a>, FunnelError> {
    let department = resolve_department(&snapshot.departments, department)?;

    let job_ids: BTreeSet<u64> = snapshot
        .jobs
        .iter()
        .filter(|job| job.belongs_to(department.id))
        .map(|job| job.id)
        .collect();

    let application_ids: BTreeSet<ApplicationId> = snapshot
        .applications
        .iter()
        .filter(|application| application.jobs.iter().any(|job| job_ids.contains(&job.id)))
        .map(|application| application.id)
        .collect();

    let department_scorecards: Vec<&Scorecard> = snapshot
        .scorecards
        .iter()
        .filter(|scorecard| application_ids.contains(&scorecard.application_id))
        .collect();

    let interview_types = interview_inventory(&department_scorecards, stage_map);

    let scorecards: Vec<&Scorecard> = department_scorecards
        .into_iter()
        .filter(|scorecard| stage_map.contains(&scorecard.interview))
        .collect();

    let unmapped = interview_types
        .iter()
        .filter(|entry| entry.stage.is_none())
        .count();
    if unmapped > 0 {
        tracing::debug!(
            interview_types = unmapped,
            "ignoring interview types missing from the stage map"
        );
    }

    tracing::info!(
        department = %department.name,
        jobs = job_ids.len(),
        applications = application_ids.len(),
        scorecards = scorecards.len(),
        "filtered snapshot to department"
    );

    Ok(FilteredScope {
        department,
        job_ids,
        application_ids,
        scorecards,
        interview_types,
    })
}

fn interview_inventory(
    scorecards: &[&Scorecard],
    stage_map: &StageMap,
) -> Vec<InterviewTypeCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for scorecard in scorecards {
        *counts.entry(scorecard.interview.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(interview, scorecards)| InterviewTypeCount {
            interview: interview.to_string(),
            scorecards,
            stage: stage_map.stage_for(interview),
        })
        .collect()
}
