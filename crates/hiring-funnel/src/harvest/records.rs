//! Harvest API record shapes.
//!
//! Only the fields the analysis reads are modelled; everything else in the payload is
//! ignored on deserialization. The cache keeps the raw payloads, not these structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for Harvest applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u64);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: u64,
    pub name: String,
}

/// `{id, name}` pair Harvest embeds for related objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub departments: Vec<Reference>,
}

impl Job {
    pub fn belongs_to(&self, department_id: u64) -> bool {
        self.departments
            .iter()
            .any(|department| department.id == department_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionType {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionReason {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<RejectionType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub candidate_id: u64,
    pub status: String,
    #[serde(default)]
    pub jobs: Vec<Reference>,
    #[serde(default)]
    pub rejection_reason: Option<RejectionReason>,
}

impl Application {
    /// Name of the rejection type ("We rejected them", "They rejected us", ...), if any.
    pub fn rejection_type_name(&self) -> Option<&str> {
        self.rejection_reason
            .as_ref()
            .and_then(|reason| reason.kind.as_ref())
            .map(|kind| kind.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl Candidate {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interviewer {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardQuestion {
    /// Free-form note questions carry no id.
    #[serde(default)]
    pub id: Option<u64>,
    pub question: String,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    pub id: u64,
    pub application_id: ApplicationId,
    #[serde(default)]
    pub candidate_id: Option<u64>,
    pub interview: String,
    pub submitted_by: Interviewer,
    #[serde(default)]
    pub overall_recommendation: Option<String>,
    #[serde(default)]
    pub interviewed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub questions: Vec<ScorecardQuestion>,
}

/// The five collections one analysis run consumes.
#[derive(Debug, Clone, Default)]
pub struct HarvestSnapshot {
    pub departments: Vec<Department>,
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    pub candidates: Vec<Candidate>,
    pub scorecards: Vec<Scorecard>,
}
