use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{
    Answer, AnswerDraft, AssessmentError, CaseId, CaseStatus, CustomRisk, FacilityId, MeasureDraft,
    MeasureId, MeasureParent, RiskDraft, RiskId, TeamMember, WorkflowKind,
};
use crate::library::{QuestionId, ToolId};
use crate::scoring::ScoringMethod;

/// One facility's assessment instance: scope, method, lifecycle status and
/// the answers/risks it owns.
///
/// Answers are keyed on `QuestionId`, which makes re-submission of the same
/// question an in-place update rather than a duplicate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentCase {
    pub id: CaseId,
    pub facility: FacilityId,
    pub tool: Option<ToolId>,
    pub scoring_method: ScoringMethod,
    pub workflow: WorkflowKind,
    pub status: CaseStatus,
    pub final_comments: String,
    pub participants: String,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub team: Vec<TeamMember>,
    answers: BTreeMap<QuestionId, Answer>,
    risks: Vec<CustomRisk>,
    next_risk_id: u64,
    next_measure_id: u64,
    next_control_sequence: u64,
}

impl AssessmentCase {
    pub fn new_structured(
        id: CaseId,
        facility: FacilityId,
        tool: ToolId,
        scoring_method: ScoringMethod,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(id, facility, Some(tool), scoring_method, WorkflowKind::Library, created_at)
    }

    pub fn new_fast_track(
        id: CaseId,
        facility: FacilityId,
        scoring_method: ScoringMethod,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self::new(id, facility, None, scoring_method, WorkflowKind::Template, created_at)
    }

    fn new(
        id: CaseId,
        facility: FacilityId,
        tool: Option<ToolId>,
        scoring_method: ScoringMethod,
        workflow: WorkflowKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            facility,
            tool,
            scoring_method,
            workflow,
            status: CaseStatus::Draft,
            final_comments: String::new(),
            participants: String::new(),
            created_at,
            completed_at: None,
            team: Vec::new(),
            answers: BTreeMap::new(),
            risks: Vec::new(),
            next_risk_id: 1,
            next_measure_id: 1,
            next_control_sequence: 1,
        }
    }

    pub fn is_fast_track(&self) -> bool {
        self.tool.is_none()
    }

    /// Flip the case to completed, stamping comments and participants in the
    /// same write. One-way: a completed case cannot be finalized again.
    pub fn finalize(
        &mut self,
        comments: impl Into<String>,
        participants: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), AssessmentError> {
        if self.status != CaseStatus::Draft {
            return Err(AssessmentError::CaseAlreadyCompleted);
        }
        self.status = CaseStatus::Completed;
        self.final_comments = comments.into();
        self.participants = participants.into();
        self.completed_at = Some(at);
        Ok(())
    }

    /// Insert-or-update the answer for a question. Existing measures survive
    /// a re-submission; only the response fields are replaced.
    pub fn upsert_answer(&mut self, question: QuestionId, draft: AnswerDraft) -> &Answer {
        let answer = self.answers.entry(question).or_default();
        answer.response = draft.response;
        answer.notes = draft.notes;
        answer.risk_priority = draft.risk_priority;
        answer
    }

    pub fn answer(&self, question: QuestionId) -> Option<&Answer> {
        self.answers.get(&question)
    }

    pub(crate) fn answer_mut(&mut self, question: QuestionId) -> Option<&mut Answer> {
        self.answers.get_mut(&question)
    }

    pub fn answers(&self) -> impl Iterator<Item = (QuestionId, &Answer)> {
        self.answers.iter().map(|(id, answer)| (*id, answer))
    }

    pub fn answered_count(&self) -> usize {
        self.answers.values().filter(|answer| answer.is_answered()).count()
    }

    pub fn add_risk(&mut self, draft: RiskDraft) -> RiskId {
        let id = RiskId(self.next_risk_id);
        self.next_risk_id += 1;
        self.risks.push(CustomRisk::from_draft(id, draft));
        id
    }

    /// Replace a risk's fields from a draft, recomputing the cached scores.
    pub fn update_risk(&mut self, id: RiskId, draft: RiskDraft) -> Result<(), AssessmentError> {
        let risk = self
            .risks
            .iter_mut()
            .find(|risk| risk.id == id)
            .ok_or(AssessmentError::RiskNotFound(id))?;
        risk.apply_draft(draft);
        Ok(())
    }

    pub fn risk(&self, id: RiskId) -> Option<&CustomRisk> {
        self.risks.iter().find(|risk| risk.id == id)
    }

    pub(crate) fn risk_mut(&mut self, id: RiskId) -> Result<&mut CustomRisk, AssessmentError> {
        self.risks
            .iter_mut()
            .find(|risk| risk.id == id)
            .ok_or(AssessmentError::RiskNotFound(id))
    }

    pub fn risks(&self) -> &[CustomRisk] {
        &self.risks
    }

    /// Attach a measure to its parent answer or risk. The draft must name
    /// exactly one parent, and that parent must exist in this case.
    pub fn add_measure(&mut self, draft: MeasureDraft) -> Result<MeasureId, AssessmentError> {
        let parent = draft.parent()?;
        let id = MeasureId(self.next_measure_id);

        match parent {
            MeasureParent::Answer(question) => {
                let answer = self
                    .answers
                    .get_mut(&question)
                    .ok_or(AssessmentError::AnswerNotFound(question))?;
                answer.measures.push(draft.into_measure(id));
            }
            MeasureParent::Risk(risk_id) => {
                let risk = self.risk_mut(risk_id)?;
                risk.measures.push(draft.into_measure(id));
            }
        }

        self.next_measure_id += 1;
        Ok(id)
    }

    pub(crate) fn next_control_sequence(&mut self) -> u64 {
        let sequence = self.next_control_sequence;
        self.next_control_sequence += 1;
        sequence
    }

    /// Completion ratio for the case.
    ///
    /// Structured cases report answered questions over the tool's total.
    /// Fast-track cases have no questionnaire, so they report reviewed risks
    /// (acceptability decided) over total risks instead of a perpetual zero.
    pub fn progress_percentage(&self, question_count: usize) -> u8 {
        let (done, total) = if self.tool.is_some() {
            (self.answered_count(), question_count)
        } else {
            let reviewed = self
                .risks
                .iter()
                .filter(|risk| risk.is_acceptable.is_some())
                .count();
            (reviewed, self.risks.len())
        };

        if total == 0 {
            return 0;
        }
        ((100.0 * done as f64) / total as f64).round() as u8
    }
}
