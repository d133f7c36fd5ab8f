//! Read-side projections for report renderers and the UI.

use serde::Serialize;

use super::action_plan::{self, ActionPlanStatus};
use super::case::AssessmentCase;
use super::domain::{CaseId, ControlRecord, CustomRisk, RiskId, RiskPriority};
use crate::library::{QuestionId, Tool};
use crate::scoring::{
    kinney_label, matrix_label, KinneyBand, MatrixBand, ScoringMethod, EMPTY_SCORE_LABEL,
};

/// UI hint plus human-readable label for a scored risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskLevelView {
    pub css_class: &'static str,
    pub label: &'static str,
}

impl CustomRisk {
    /// Level for whichever score is populated, method first: the matrix
    /// band when the risk is scored by L-Matrix and a matrix score exists,
    /// else the Kinney band when a Kinney score exists, else nothing.
    pub fn risk_level(&self) -> Option<RiskLevelView> {
        if self.scoring_method == ScoringMethod::LMatrix {
            if let Some(score) = self.matrix_score {
                let band = MatrixBand::from_score(score);
                return Some(RiskLevelView {
                    css_class: band.css_class(),
                    label: band.label(),
                });
            }
        }
        self.kinney_score.map(|score| {
            let band = KinneyBand::from_score(score);
            RiskLevelView {
                css_class: band.css_class(),
                label: band.label(),
            }
        })
    }

    /// Score under the risk's own method, widened for display.
    pub fn display_score(&self) -> Option<i64> {
        match self.scoring_method {
            ScoringMethod::FineKinney => self.kinney_score,
            ScoringMethod::LMatrix => self.matrix_score.map(i64::from),
        }
    }
}

impl ControlRecord {
    pub fn to_view(&self) -> ControlRecordView {
        let residual_label = match self.scoring_method {
            ScoringMethod::FineKinney => kinney_label(self.residual_score),
            ScoringMethod::LMatrix => self
                .residual_score
                .map_or(EMPTY_SCORE_LABEL, |score| {
                    MatrixBand::from_score(score.clamp(0, u8::MAX as i64) as u8).label()
                }),
        };
        ControlRecordView {
            control_date: self.control_date.to_string(),
            auditor: self.auditor.clone(),
            note: self.note.clone(),
            scoring_method: self.scoring_method,
            residual_score: self.residual_score,
            residual_label,
        }
    }
}

/// One ledger entry of a risk's residual-score time series.
#[derive(Debug, Clone, Serialize)]
pub struct ControlRecordView {
    pub control_date: String,
    pub auditor: String,
    pub note: String,
    pub scoring_method: ScoringMethod,
    pub residual_score: Option<i64>,
    pub residual_label: &'static str,
}

/// Per-answer row of the case overview.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerRow {
    pub question: QuestionId,
    pub question_text: String,
    pub category: String,
    pub topic: String,
    pub response_label: &'static str,
    pub priority: Option<RiskPriority>,
    pub action_plan: Option<ActionPlanStatus>,
}

/// Per-risk row of the case overview.
#[derive(Debug, Clone, Serialize)]
pub struct RiskRow {
    pub id: RiskId,
    pub description: String,
    pub is_acceptable: Option<bool>,
    pub scoring_method: ScoringMethod,
    pub score: Option<i64>,
    pub score_label: &'static str,
    pub level: Option<RiskLevelView>,
    pub action_plan: Option<ActionPlanStatus>,
}

/// Full case projection handed to report renderers.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOverview {
    pub case: CaseId,
    pub status_label: &'static str,
    pub workflow_label: &'static str,
    pub method_label: &'static str,
    pub progress_percentage: u8,
    pub answers: Vec<AnswerRow>,
    pub risks: Vec<RiskRow>,
}

/// Build the overview for a case. `tool` must be the case's tool when it has
/// one; fast-track cases pass `None` and report only risks.
pub fn case_overview(case: &AssessmentCase, tool: Option<&Tool>) -> CaseOverview {
    let question_count = tool.map_or(0, Tool::question_count);

    let answers = tool
        .map(|tool| {
            tool.questions()
                .into_iter()
                .filter_map(|entry| {
                    case.answer(entry.question.id).map(|answer| AnswerRow {
                        question: entry.question.id,
                        question_text: entry.question.text.clone(),
                        category: entry.category.name.clone(),
                        topic: entry.topic.name.clone(),
                        response_label: answer
                            .response
                            .map_or(EMPTY_SCORE_LABEL, |response| response.label()),
                        priority: answer.risk_priority,
                        action_plan: action_plan::answer_status(answer),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    let risks = case
        .risks()
        .iter()
        .map(|risk| {
            let score = risk.display_score();
            let score_label = match risk.scoring_method {
                ScoringMethod::FineKinney => kinney_label(risk.kinney_score),
                ScoringMethod::LMatrix => matrix_label(risk.matrix_score),
            };
            RiskRow {
                id: risk.id,
                description: risk.description.clone(),
                is_acceptable: risk.is_acceptable,
                scoring_method: risk.scoring_method,
                score,
                score_label,
                level: risk.risk_level(),
                action_plan: action_plan::risk_status(risk),
            }
        })
        .collect();

    CaseOverview {
        case: case.id,
        status_label: case.status.label(),
        workflow_label: case.workflow.label(),
        method_label: case.scoring_method.label(),
        progress_percentage: case.progress_percentage(question_count),
        answers,
        risks,
    }
}
