use super::aggregate::ApplicationRecords;
use super::domain::Stage;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Answer labels on the phone-screen rating questions.
pub const RATED_ANSWERS: [&str; 3] = ["Weak", "Average", "Strong"];

static QUESTION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^q[0-9]+\s*:?").expect("question label pattern compiles"));

/// Normalized question text to answer label to count.
pub type QuestionFrequencies = BTreeMap<String, BTreeMap<String, usize>>;

/// Lower-cases a question and strips a leading `Q3:`-style label.
pub fn normalize_question(question: &str) -> String {
    let lowered = question.trim().to_lowercase();
    QUESTION_LABEL.replace(&lowered, "").trim().to_string()
}

pub fn phone_screen_questions(records: &ApplicationRecords<'_>) -> QuestionFrequencies {
    let mut frequencies = QuestionFrequencies::new();

    let scorecards = records
        .values()
        .flat_map(|record| record.stages.get(Stage::PhoneScreen).iter());
    for scorecard in scorecards {
        for question in &scorecard.questions {
            if question.id.is_none() {
                continue;
            }
            let Some(answer) = question
                .answer
                .as_deref()
                .filter(|answer| RATED_ANSWERS.contains(answer))
            else {
                continue;
            };

            *frequencies
                .entry(normalize_question(&question.question))
                .or_default()
                .entry(answer.to_string())
                .or_default() += 1;
        }
    }

    frequencies
}
