use crate::harvest::{ApplicationId, Scorecard};
use serde::{Deserialize, Serialize};

/// Ordered funnel stages. The index is the bucket position in every stage-shaped structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PhoneScreen,
    SecondRound,
    FinalRound,
}

impl Stage {
    pub const COUNT: usize = 3;

    pub const fn ordered() -> [Self; 3] {
        [Self::PhoneScreen, Self::SecondRound, Self::FinalRound]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::PhoneScreen => 0,
            Self::SecondRound => 1,
            Self::FinalRound => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::PhoneScreen),
            1 => Some(Self::SecondRound),
            2 => Some(Self::FinalRound),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::PhoneScreen => "Phone screen",
            Self::SecondRound => "Second round",
            Self::FinalRound => "Final round",
        }
    }

    pub const fn singular(self) -> &'static str {
        match self {
            Self::PhoneScreen => "phone screen",
            Self::SecondRound => "second round",
            Self::FinalRound => "final round",
        }
    }

    pub const fn plural(self) -> &'static str {
        match self {
            Self::PhoneScreen => "phone screens",
            Self::SecondRound => "second rounds",
            Self::FinalRound => "final rounds",
        }
    }
}

/// Interviewer's overall call on a scorecard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    DefinitelyNot,
    No,
    Yes,
    StrongYes,
    /// Missing, `no_decision`, or anything Harvest adds later.
    Unknown,
}

impl Recommendation {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("definitely_not") => Self::DefinitelyNot,
            Some("no") => Self::No,
            Some("yes") => Self::Yes,
            Some("strong_yes") => Self::StrongYes,
            _ => Self::Unknown,
        }
    }

    pub fn of(scorecard: &Scorecard) -> Self {
        Self::parse(scorecard.overall_recommendation.as_deref())
    }

    /// `Some(true)` for a hire call, `Some(false)` for a no-hire call, `None` without a decision.
    pub const fn passed(self) -> Option<bool> {
        match self {
            Self::Yes | Self::StrongYes => Some(true),
            Self::No | Self::DefinitelyNot => Some(false),
            Self::Unknown => None,
        }
    }

    pub const fn binary_char(self) -> Option<char> {
        match self.passed() {
            Some(true) => Some('1'),
            Some(false) => Some('0'),
            None => None,
        }
    }

    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::DefinitelyNot => Some('.'),
            Self::No => Some('0'),
            Self::Yes => Some('1'),
            Self::StrongYes => Some('*'),
            Self::Unknown => None,
        }
    }
}

/// Application status as reported by Harvest; unknown statuses pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationStatus {
    Active,
    Hired,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "active" => Self::Active,
            "hired" => Self::Hired,
            "rejected" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Active => "active",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw,
        }
    }
}

/// Which side ended the process, taken from the rejection reason's type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RejectionDirection {
    WeRejectedThem,
    TheyRejectedUs,
    Other(String),
}

impl RejectionDirection {
    pub fn parse(type_name: &str) -> Self {
        match type_name {
            "We rejected them" => Self::WeRejectedThem,
            "They rejected us" => Self::TheyRejectedUs,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::WeRejectedThem => "We rejected them",
            Self::TheyRejectedUs => "They rejected us",
            Self::Other(raw) => raw,
        }
    }
}

/// Terminal outcome of an application that reached the final round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeDecision {
    Offered,
    Rejected,
    Active,
}

impl OutcomeDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offered => "offered",
            Self::Rejected => "rejected",
            Self::Active => "active",
        }
    }
}

/// Structural failures that abort an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum FunnelError {
    #[error("no department named '{name}'")]
    DepartmentNotFound { name: String },
    #[error("scorecard {scorecard_id} references unknown application {application_id}")]
    MissingApplication {
        scorecard_id: u64,
        application_id: ApplicationId,
    },
    #[error("application {application_id} references unknown candidate {candidate_id}")]
    MissingCandidate {
        application_id: ApplicationId,
        candidate_id: u64,
    },
}
