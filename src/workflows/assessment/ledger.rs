//! Append-only re-audit history per risk.
//!
//! Every control visit is retained individually; there is no rollup. The
//! residual score is computed at write time under the record's own method
//! and never rewrites the parent risk's original score.

use super::domain::{AssessmentError, ControlRecord, ControlRecordDraft, CustomRisk};
use crate::scoring::ScoringMethod;

/// Validate and append a control record to the risk's ledger.
///
/// The auditor name and control date are required before any score
/// computation. The record's method defaults to the parent risk's current
/// method but a caller may pin a different one; the two never interfere.
pub fn append_control(
    risk: &mut CustomRisk,
    draft: ControlRecordDraft,
    sequence: u64,
) -> Result<ControlRecord, AssessmentError> {
    if draft.auditor.trim().is_empty() {
        return Err(AssessmentError::MissingAuditor);
    }
    let control_date = draft.control_date.ok_or(AssessmentError::MissingControlDate)?;

    let scoring_method = draft.scoring_method.unwrap_or(risk.scoring_method);
    let matrix = draft.matrix.normalized();
    let residual_score = match scoring_method {
        ScoringMethod::FineKinney => draft.kinney.score(),
        ScoringMethod::LMatrix => matrix.score().map(i64::from),
    };

    let record = ControlRecord {
        control_date,
        auditor: draft.auditor,
        note: draft.note,
        scoring_method,
        kinney: draft.kinney,
        matrix,
        residual_score,
        sequence,
    };
    risk.controls.push(record.clone());
    Ok(record)
}

/// All control records for the risk, newest first by
/// (control date, insertion order).
pub fn controls_newest_first(risk: &CustomRisk) -> Vec<&ControlRecord> {
    let mut records: Vec<&ControlRecord> = risk.controls.iter().collect();
    records.sort_by(|a, b| {
        b.control_date
            .cmp(&a.control_date)
            .then(b.sequence.cmp(&a.sequence))
    });
    records
}
