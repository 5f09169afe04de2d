use hiring_funnel::funnel::{HiringReport, InterviewTypeCount, Stage};

pub(crate) fn render_report(report: &HiringReport) {
    println!("Hiring funnel report");
    println!(
        "Department: {} ({} jobs, {} applications, {} scorecards)",
        report.department.name,
        report.department.jobs,
        report.department.applications,
        report.department.scorecards
    );

    println!("\nFUNNEL");
    let mut previous: Option<Stage> = None;
    for stage in &report.funnel.stages {
        match (previous, stage.conversion) {
            (Some(from), Some(conversion)) => println!(
                "{} {} ({} of {})",
                stage.applications,
                stage.stage.plural(),
                conversion,
                from.plural()
            ),
            _ => println!("{} {}", stage.applications, stage.stage.plural()),
        }
        previous = Some(stage.stage);
    }
    let funnel = &report.funnel;
    println!(
        "Final rounds: {} offered ({}), {} rejected ({}), {} active ({})",
        funnel.offered.count,
        funnel.offered.percent,
        funnel.rejected.count,
        funnel.rejected.percent,
        funnel.active.count,
        funnel.active.percent
    );
    if funnel.unclassified > 0 {
        println!("{} final rounds without a classifiable outcome", funnel.unclassified);
    }

    println!("\nPHONE SCREENS");
    if report.phone_screen_questions.is_empty() {
        println!("No rated phone-screen questions");
    }
    for (question, answers) in &report.phone_screen_questions {
        let counts: Vec<String> = answers
            .iter()
            .map(|(answer, count)| format!("{answer} {count}"))
            .collect();
        println!("- {}: {}", question, counts.join(", "));
    }

    let disagreement = &report.disagreement;
    println!(
        "\nSECOND ROUND TECHNICAL ({} paired, {} excluded)",
        disagreement.paired, disagreement.excluded
    );
    println!(
        "{} passed both ({})",
        disagreement.passed_both.count, disagreement.passed_both.percent
    );
    println!(
        "{} failed both ({})",
        disagreement.failed_both.count, disagreement.failed_both.percent
    );
    println!(
        "{} disagreed ({})",
        disagreement.disagreements.count, disagreement.disagreements.percent
    );
    println!(
        "Of the disagreements, {} went on to final round, {} were offered, \
         {} were rejected after the final round",
        disagreement.disagreements_reaching_final.percent,
        disagreement.disagreements_offered.percent,
        disagreement.disagreements_rejected_after_final.percent
    );
    println!(
        "Non-technical second rounds: {} pass rate over {} interviews",
        disagreement.non_technical.pass_rate, disagreement.non_technical.interviews
    );

    println!("\nFINAL ROUNDS");
    for result in &report.final_rounds {
        println!(
            "{} => {} ({}, {})",
            result.results,
            result.outcome_label(),
            result.status,
            result.candidate_name
        );
    }

    println!("\nINTERVIEWERS");
    for interviewer in &report.interviewers {
        let stages: Vec<String> = interviewer
            .stages
            .iter()
            .map(|stage| stage.summary())
            .collect();
        println!(
            "{} has a {} pass rate over {} interviews ({}); {} aligned with offers over {}",
            interviewer.name,
            interviewer.pass_rate,
            interviewer.interviews,
            stages.join(", "),
            interviewer.alignment,
            interviewer.alignment_sample
        );
    }
}

pub(crate) fn render_interview_types(department: &str, interview_types: &[InterviewTypeCount]) {
    println!("Interview types for {department}");
    for entry in interview_types {
        let stage = entry.stage.map_or("not analyzed", Stage::label);
        println!("- {}: {} scorecards ({})", entry.interview, entry.scorecards, stage);
    }
}
