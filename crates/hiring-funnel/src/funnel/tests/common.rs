use crate::config::FunnelConfig;
use crate::funnel::aggregate::{aggregate_applications, ApplicationRecords};
use crate::funnel::filter::filter_scope;
use crate::funnel::stage_map::StageMap;
use crate::harvest::{
    Application, ApplicationId, Candidate, Department, HarvestSnapshot, Interviewer, Job,
    Reference, RejectionReason, RejectionType, Scorecard, ScorecardQuestion,
};

pub(super) const PHONE_SCREEN: &str = "Dev Round 1 - Phone Screen";
pub(super) const TECHNICAL_1: &str = "Dev Round 2 - Technical Interview 1";
pub(super) const TECHNICAL_2: &str = "Dev Round 2 - Technical Interview 2";
pub(super) const NON_TECHNICAL: &str = "Dev Round 2 - Non-Technical Interview";
pub(super) const PEER_PANEL: &str = "Dev Peer Panel Review";
pub(super) const TAKE_HOME: &str = "Take Home Exercise";

pub(super) const GRACE: (u64, &str) = (1, "Grace Hopper");
pub(super) const ALAN: (u64, &str) = (2, "Alan Turing");
pub(super) const EDSGER: (u64, &str) = (3, "Edsger Dijkstra");

pub(super) fn department(id: u64, name: &str) -> Department {
    Department {
        id,
        name: name.to_string(),
    }
}

pub(super) fn job(id: u64, department_id: u64) -> Job {
    Job {
        id,
        name: Some(format!("Job {id}")),
        departments: vec![Reference {
            id: department_id,
            name: None,
        }],
    }
}

pub(super) fn candidate(id: u64, first_name: &str, last_name: &str) -> Candidate {
    Candidate {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    }
}

pub(super) fn application(id: u64, job_id: u64, candidate_id: u64, status: &str) -> Application {
    Application {
        id: ApplicationId(id),
        candidate_id,
        status: status.to_string(),
        jobs: vec![Reference {
            id: job_id,
            name: None,
        }],
        rejection_reason: None,
    }
}

pub(super) fn rejected(id: u64, job_id: u64, candidate_id: u64, direction: &str) -> Application {
    Application {
        rejection_reason: Some(RejectionReason {
            id: 7,
            name: Some("Other".to_string()),
            kind: Some(RejectionType {
                id: 3,
                name: direction.to_string(),
            }),
        }),
        ..application(id, job_id, candidate_id, "rejected")
    }
}

pub(super) fn scorecard(
    id: u64,
    application_id: u64,
    interview: &str,
    interviewer: (u64, &str),
    recommendation: &str,
) -> Scorecard {
    Scorecard {
        id,
        application_id: ApplicationId(application_id),
        candidate_id: None,
        interview: interview.to_string(),
        submitted_by: Interviewer {
            id: interviewer.0,
            name: interviewer.1.to_string(),
        },
        overall_recommendation: Some(recommendation.to_string()),
        interviewed_at: None,
        submitted_at: None,
        questions: Vec::new(),
    }
}

pub(super) fn question(id: Option<u64>, text: &str, answer: &str) -> ScorecardQuestion {
    ScorecardQuestion {
        id,
        question: text.to_string(),
        answer: Some(answer.to_string()),
    }
}

/// One hired application with a phone screen and a single technical interview.
pub(super) fn ada_snapshot() -> HarvestSnapshot {
    HarvestSnapshot {
        departments: vec![department(1, "Tech")],
        jobs: vec![job(10, 1)],
        applications: vec![application(100, 10, 1000, "hired")],
        candidates: vec![candidate(1000, "Ada", "Lovelace")],
        scorecards: vec![
            scorecard(1, 100, PHONE_SCREEN, GRACE, "yes"),
            scorecard(2, 100, TECHNICAL_1, ALAN, "no"),
        ],
    }
}

/// Six Tech applications across the funnel plus one Sales application.
///
/// | app | status                        | phone | technical | non-tech | final      |
/// |-----|-------------------------------|-------|-----------|----------|------------|
/// | 100 | hired                         | yes   | yes, no   | strong   | strong,yes |
/// | 101 | rejected / We rejected them   | yes   | no, no    |          | no         |
/// | 102 | rejected / They rejected us   | no    | yes, yes  |          | def. not   |
/// | 103 | active                        | yes   | undecided |          | yes        |
/// | 104 | rejected / None specified     | def.  | no        |          | no         |
/// | 105 | rejected / We rejected them   | no    |           |          |            |
pub(super) fn pipeline_snapshot() -> HarvestSnapshot {
    let mut phone_100 = scorecard(1, 100, PHONE_SCREEN, GRACE, "yes");
    phone_100.questions = vec![
        question(Some(1), "Q1: Problem solving", "Strong"),
        question(Some(2), "q2 Communication", "Average"),
        question(None, "Notes", "Good chat"),
    ];
    let mut phone_101 = scorecard(7, 101, PHONE_SCREEN, GRACE, "yes");
    phone_101.questions = vec![
        question(Some(1), "Q1: Problem Solving", "Strong"),
        question(Some(3), "Culture", "Not sure"),
    ];
    let mut panel_100 = scorecard(5, 100, PEER_PANEL, ALAN, "strong_yes");
    panel_100.questions = vec![question(Some(1), "Q1: Problem solving", "Weak")];

    HarvestSnapshot {
        departments: vec![department(1, "Tech"), department(2, "Sales")],
        jobs: vec![job(10, 1), job(11, 1), job(20, 2)],
        applications: vec![
            application(100, 10, 1000, "hired"),
            rejected(101, 10, 1001, "We rejected them"),
            rejected(102, 11, 1002, "They rejected us"),
            application(103, 11, 1003, "active"),
            rejected(104, 10, 1004, "None specified"),
            rejected(105, 10, 1005, "We rejected them"),
            application(200, 20, 1006, "hired"),
        ],
        candidates: vec![
            candidate(1000, "Ada", "Lovelace"),
            candidate(1001, "Charles", "Babbage"),
            candidate(1002, "Barbara", "Liskov"),
            candidate(1003, "Donald", "Knuth"),
            candidate(1004, "Niklaus", "Wirth"),
            candidate(1005, "John", "Backus"),
            candidate(1006, "Dale", "Carnegie"),
        ],
        scorecards: vec![
            phone_100,
            scorecard(2, 100, TECHNICAL_1, ALAN, "yes"),
            scorecard(3, 100, TECHNICAL_2, EDSGER, "no"),
            scorecard(4, 100, NON_TECHNICAL, GRACE, "strong_yes"),
            panel_100,
            scorecard(6, 100, PEER_PANEL, EDSGER, "yes"),
            phone_101,
            scorecard(8, 101, TECHNICAL_1, ALAN, "no"),
            scorecard(9, 101, TECHNICAL_2, EDSGER, "no"),
            scorecard(10, 101, PEER_PANEL, GRACE, "no"),
            scorecard(11, 102, PHONE_SCREEN, GRACE, "no"),
            scorecard(12, 102, TECHNICAL_1, ALAN, "yes"),
            scorecard(13, 102, TECHNICAL_2, EDSGER, "yes"),
            scorecard(14, 102, PEER_PANEL, ALAN, "definitely_not"),
            scorecard(15, 103, PHONE_SCREEN, EDSGER, "yes"),
            scorecard(16, 103, TECHNICAL_1, ALAN, "no_decision"),
            scorecard(17, 103, PEER_PANEL, GRACE, "yes"),
            scorecard(18, 104, PHONE_SCREEN, GRACE, "definitely_not"),
            scorecard(19, 104, TAKE_HOME, ALAN, "yes"),
            scorecard(20, 104, PEER_PANEL, EDSGER, "no"),
            scorecard(21, 200, PHONE_SCREEN, GRACE, "yes"),
            scorecard(22, 105, PHONE_SCREEN, ALAN, "no"),
            scorecard(23, 104, TECHNICAL_1, ALAN, "no"),
        ],
    }
}

pub(super) fn tech_config() -> FunnelConfig {
    FunnelConfig::new("tech", StageMap::standard())
}

/// Filters and aggregates the Tech department of `snapshot` with the standard stage map.
pub(super) fn tech_records(snapshot: &HarvestSnapshot) -> ApplicationRecords<'_> {
    let stage_map = StageMap::standard();
    let scope = filter_scope(snapshot, "tech", &stage_map).expect("tech department in scope");
    aggregate_applications(
        &scope.scorecards,
        &snapshot.applications,
        &snapshot.candidates,
        &stage_map,
    )
    .expect("snapshot is consistent")
}
