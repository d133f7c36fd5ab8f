//! Remediation status derived from measures at read time.
//!
//! Nothing here is stored: the status is a pure function of already-loaded
//! entity state, so it can never go stale after a measure edit.

use serde::Serialize;

use super::case::AssessmentCase;
use super::domain::{Answer, AnswerResponse, CustomRisk, Measure, RiskId, RiskPriority};
use crate::library::QuestionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPlanStatus {
    NoMeasures,
    Incomplete,
    Complete,
}

impl ActionPlanStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoMeasures => "Önlem Girilmemiş",
            Self::Incomplete => "Eksik",
            Self::Complete => "Tamamlandı",
        }
    }
}

/// Where an action-plan entry originates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPlanOrigin {
    Question(QuestionId),
    Risk(RiskId),
}

/// One surfaced row of the action-plan list.
#[derive(Debug, Clone, Serialize)]
pub struct ActionPlanEntry {
    pub origin: ActionPlanOrigin,
    pub status: ActionPlanStatus,
    pub status_label: &'static str,
    pub priority: Option<RiskPriority>,
    pub measure_count: usize,
}

fn status_for(measures: &[Measure]) -> ActionPlanStatus {
    if measures.is_empty() {
        return ActionPlanStatus::NoMeasures;
    }
    if measures
        .iter()
        .any(|measure| measure.description.trim().is_empty())
    {
        return ActionPlanStatus::Incomplete;
    }
    ActionPlanStatus::Complete
}

/// Status for an answer, or `None` when the answer needs no remediation.
/// Only a "No" response puts a question on the action plan.
pub fn answer_status(answer: &Answer) -> Option<ActionPlanStatus> {
    match answer.response {
        Some(AnswerResponse::No) => Some(status_for(&answer.measures)),
        _ => None,
    }
}

/// Status for a risk, or `None` unless the risk was marked not acceptable.
pub fn risk_status(risk: &CustomRisk) -> Option<ActionPlanStatus> {
    match risk.is_acceptable {
        Some(false) => Some(status_for(&risk.measures)),
        _ => None,
    }
}

/// Project the case's action plan: only negatively assessed answers and
/// risks appear; everything else is excluded from the list entirely.
pub fn action_plan(case: &AssessmentCase) -> Vec<ActionPlanEntry> {
    let mut entries = Vec::new();

    for (question, answer) in case.answers() {
        if let Some(status) = answer_status(answer) {
            entries.push(ActionPlanEntry {
                origin: ActionPlanOrigin::Question(question),
                status,
                status_label: status.label(),
                priority: answer.risk_priority,
                measure_count: answer.measures.len(),
            });
        }
    }

    for risk in case.risks() {
        if let Some(status) = risk_status(risk) {
            entries.push(ActionPlanEntry {
                origin: ActionPlanOrigin::Risk(risk.id),
                status,
                status_label: status.label(),
                priority: risk.risk_priority,
                measure_count: risk.measures.len(),
            });
        }
    }

    entries
}
