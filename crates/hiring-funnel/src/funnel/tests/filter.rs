use super::common::*;
use crate::funnel::domain::{FunnelError, Stage};
use crate::funnel::filter::{filter_scope, resolve_department};
use crate::funnel::stage_map::StageMap;
use crate::harvest::ApplicationId;

#[test]
fn department_lookup_ignores_case() {
    let snapshot = pipeline_snapshot();

    let department = resolve_department(&snapshot.departments, "TECH").expect("found");

    assert_eq!(department.id, 1);
    assert_eq!(department.name, "Tech");
}

#[test]
fn unknown_department_is_an_error() {
    let snapshot = pipeline_snapshot();

    let error = filter_scope(&snapshot, "marketing", &StageMap::standard())
        .expect_err("no marketing department");

    match error {
        FunnelError::DepartmentNotFound { name } => assert_eq!(name, "marketing"),
        other => panic!("expected missing department, got {other:?}"),
    }
}

#[test]
fn scope_keeps_only_department_scorecards_with_mapped_interviews() {
    let snapshot = pipeline_snapshot();
    let stage_map = StageMap::standard();

    let scope = filter_scope(&snapshot, "tech", &stage_map).expect("scope");

    assert_eq!(scope.job_ids.iter().copied().collect::<Vec<_>>(), vec![10, 11]);
    assert_eq!(scope.application_ids.len(), 6);
    assert!(!scope.application_ids.contains(&ApplicationId(200)));
    assert_eq!(scope.scorecards.len(), 21);
    assert!(scope
        .scorecards
        .iter()
        .all(|scorecard| stage_map.contains(&scorecard.interview)
            && scope.application_ids.contains(&scorecard.application_id)));
}

#[test]
fn interview_inventory_lists_unmapped_types_too() {
    let snapshot = pipeline_snapshot();

    let scope = filter_scope(&snapshot, "tech", &StageMap::standard()).expect("scope");

    let inventory: Vec<(&str, usize, Option<Stage>)> = scope
        .interview_types
        .iter()
        .map(|entry| (entry.interview.as_str(), entry.scorecards, entry.stage))
        .collect();
    assert_eq!(
        inventory,
        vec![
            (PEER_PANEL, 6, Some(Stage::FinalRound)),
            (PHONE_SCREEN, 6, Some(Stage::PhoneScreen)),
            (NON_TECHNICAL, 1, Some(Stage::SecondRound)),
            (TECHNICAL_1, 5, Some(Stage::SecondRound)),
            (TECHNICAL_2, 3, Some(Stage::SecondRound)),
            (TAKE_HOME, 1, None),
        ]
    );
}

#[test]
fn custom_stage_map_widens_the_scope() {
    let snapshot = pipeline_snapshot();
    let stage_map = StageMap::standard().with(TAKE_HOME, Stage::SecondRound);

    let scope = filter_scope(&snapshot, "tech", &stage_map).expect("scope");

    assert_eq!(scope.scorecards.len(), 22);
}
