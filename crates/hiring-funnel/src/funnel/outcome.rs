use super::aggregate::ApplicationRecords;
use super::domain::{ApplicationStatus, OutcomeDecision, RejectionDirection, Stage};
use crate::harvest::ApplicationId;
use serde::Serialize;
use std::collections::BTreeSet;

/// Terminal outcome for a status/direction pair. A candidate declining our offer counts as
/// offered; combinations the rules do not cover stay unclassified.
pub fn classify_status(
    status: &ApplicationStatus,
    direction: Option<&RejectionDirection>,
) -> Option<OutcomeDecision> {
    match (status, direction) {
        (ApplicationStatus::Active, _) => Some(OutcomeDecision::Active),
        (ApplicationStatus::Hired, _) => Some(OutcomeDecision::Offered),
        (ApplicationStatus::Rejected, Some(RejectionDirection::TheyRejectedUs)) => {
            Some(OutcomeDecision::Offered)
        }
        (ApplicationStatus::Rejected, Some(RejectionDirection::WeRejectedThem)) => {
            Some(OutcomeDecision::Rejected)
        }
        _ => None,
    }
}

/// Disjoint outcome sets over the final-round applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeSets {
    pub offered: BTreeSet<ApplicationId>,
    pub rejected: BTreeSet<ApplicationId>,
    pub active: BTreeSet<ApplicationId>,
    /// Reached the final round but matched no rule.
    pub unclassified: BTreeSet<ApplicationId>,
}

impl OutcomeSets {
    pub fn outcome_of(&self, id: ApplicationId) -> Option<OutcomeDecision> {
        if self.offered.contains(&id) {
            Some(OutcomeDecision::Offered)
        } else if self.rejected.contains(&id) {
            Some(OutcomeDecision::Rejected)
        } else if self.active.contains(&id) {
            Some(OutcomeDecision::Active)
        } else {
            None
        }
    }

    pub fn is_offered(&self, id: ApplicationId) -> bool {
        self.offered.contains(&id)
    }
}

pub fn classify_outcomes(records: &ApplicationRecords<'_>) -> OutcomeSets {
    let mut sets = OutcomeSets::default();

    for (id, record) in records {
        if !record.stages.reached(Stage::FinalRound) {
            continue;
        }

        match classify_status(&record.status, record.rejection_direction.as_ref()) {
            Some(OutcomeDecision::Offered) => sets.offered.insert(*id),
            Some(OutcomeDecision::Rejected) => sets.rejected.insert(*id),
            Some(OutcomeDecision::Active) => sets.active.insert(*id),
            None => {
                tracing::debug!(
                    application_id = %id,
                    status = record.status.label(),
                    direction = record.rejection_direction.as_ref().map(RejectionDirection::label),
                    "final-round application has no classifiable outcome"
                );
                sets.unclassified.insert(*id)
            }
        };
    }

    if !sets.unclassified.is_empty() {
        tracing::warn!(
            count = sets.unclassified.len(),
            "final-round applications left unclassified"
        );
    }

    sets
}
