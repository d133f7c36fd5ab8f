use super::common::{date, draft_case, kinney_draft, matrix_draft};
use crate::scoring::{KinneyInputs, MatrixInputs, ScoringMethod};
use crate::workflows::assessment::ledger::{append_control, controls_newest_first};
use crate::workflows::assessment::{AssessmentError, ControlRecordDraft};

fn control_draft(day: u32, auditor: &str) -> ControlRecordDraft {
    ControlRecordDraft {
        control_date: Some(date(2026, 3, day)),
        auditor: auditor.to_string(),
        note: String::new(),
        scoring_method: None,
        kinney: KinneyInputs {
            probability: Some(1.0),
            frequency: Some(2.0),
            severity: Some(7),
        },
        matrix: MatrixInputs::unset(),
    }
}

#[test]
fn append_requires_auditor_and_date() {
    let mut case = draft_case();
    let risk_id = case.add_risk(kinney_draft(3.0, 6.0, 15));
    let risk = case.risk_mut(risk_id).expect("risk present");

    let missing_auditor = append_control(risk, control_draft(1, "  "), 1);
    assert!(matches!(missing_auditor, Err(AssessmentError::MissingAuditor)));

    let mut dateless = control_draft(1, "C. Kaya");
    dateless.control_date = None;
    let missing_date = append_control(risk, dateless, 1);
    assert!(matches!(missing_date, Err(AssessmentError::MissingControlDate)));

    assert!(risk.controls.is_empty());
}

#[test]
fn residual_uses_the_records_own_method() {
    let mut case = draft_case();
    let risk_id = case.add_risk(kinney_draft(3.0, 6.0, 15));
    let risk = case.risk_mut(risk_id).expect("risk present");

    // defaults to the parent's method
    let record = append_control(risk, control_draft(1, "C. Kaya"), 1).expect("appends");
    assert_eq!(record.scoring_method, ScoringMethod::FineKinney);
    assert_eq!(record.residual_score, Some(14));

    // a caller may pin the other method; inputs for it must then be present
    let mut diverging = control_draft(2, "C. Kaya");
    diverging.scoring_method = Some(ScoringMethod::LMatrix);
    diverging.matrix = MatrixInputs {
        probability: Some(2),
        severity: Some(3),
    };
    let record = append_control(risk, diverging, 2).expect("appends");
    assert_eq!(record.scoring_method, ScoringMethod::LMatrix);
    assert_eq!(record.residual_score, Some(6));
}

#[test]
fn incomplete_inputs_yield_null_residual() {
    let mut case = draft_case();
    let risk_id = case.add_risk(kinney_draft(3.0, 6.0, 15));
    let risk = case.risk_mut(risk_id).expect("risk present");

    let mut partial = control_draft(1, "C. Kaya");
    partial.kinney.frequency = None;
    let record = append_control(risk, partial, 1).expect("appends");
    assert_eq!(record.residual_score, None);
}

#[test]
fn append_never_touches_the_parent_scores() {
    let mut case = draft_case();
    let risk_id = case.add_risk(matrix_draft(4, 5));
    let risk = case.risk_mut(risk_id).expect("risk present");
    assert_eq!(risk.matrix_score, Some(20));

    let mut draft = control_draft(1, "C. Kaya");
    draft.scoring_method = Some(ScoringMethod::LMatrix);
    draft.matrix = MatrixInputs {
        probability: Some(1),
        severity: Some(2),
    };
    append_control(risk, draft, 1).expect("appends");

    assert_eq!(risk.matrix_score, Some(20));
    assert_eq!(risk.kinney_score, None);
}

#[test]
fn listing_is_newest_first_with_insertion_tiebreak() {
    let mut case = draft_case();
    let risk_id = case.add_risk(kinney_draft(3.0, 6.0, 15));
    let risk = case.risk_mut(risk_id).expect("risk present");

    append_control(risk, control_draft(5, "İlk"), 1).expect("appends");
    append_control(risk, control_draft(9, "Sonraki"), 2).expect("appends");
    append_control(risk, control_draft(5, "Aynı gün"), 3).expect("appends");

    let ordered: Vec<&str> = controls_newest_first(risk)
        .into_iter()
        .map(|record| record.auditor.as_str())
        .collect();
    assert_eq!(ordered, vec!["Sonraki", "Aynı gün", "İlk"]);
}

#[test]
fn every_record_is_retained() {
    let mut case = draft_case();
    let risk_id = case.add_risk(kinney_draft(3.0, 6.0, 15));
    let risk = case.risk_mut(risk_id).expect("risk present");

    for day in 1..=4 {
        append_control(risk, control_draft(day, "C. Kaya"), u64::from(day)).expect("appends");
    }
    assert_eq!(risk.controls.len(), 4);
}
