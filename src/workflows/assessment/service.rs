use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::action_plan::{self, ActionPlanEntry};
use super::case::AssessmentCase;
use super::domain::{
    Answer, AnswerDraft, AssessmentError, CaseId, ControlRecordDraft, FacilityId, MeasureDraft,
    MeasureId, RiskDraft, RiskId, RiskPriority, TeamMember,
};
use super::ledger;
use super::repository::{CaseRepository, RepositoryError};
use super::views::{self, CaseOverview, ControlRecordView};
use crate::catalog::RiskCatalog;
use crate::library::{QuestionId, QuestionLibrary, ToolId};
use crate::scoring::ScoringMethod;

/// Service composing the case repository, the question library and the
/// external risk catalog. Every operation is one fetch-mutate-update round
/// trip; the repository update is the single commit point, so a rejected
/// draft leaves no partial write behind.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    catalog: Arc<dyn RiskCatalog>,
    library: Arc<QuestionLibrary>,
}

static CASE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_case_id() -> CaseId {
    CaseId(CASE_SEQUENCE.fetch_add(1, Ordering::Relaxed))
}

impl<R> AssessmentService<R>
where
    R: CaseRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        catalog: Arc<dyn RiskCatalog>,
        library: Arc<QuestionLibrary>,
    ) -> Self {
        Self {
            repository,
            catalog,
            library,
        }
    }

    /// Open a structured case walking the given tool's question tree.
    pub fn create_structured_case(
        &self,
        facility: FacilityId,
        tool: ToolId,
        method: ScoringMethod,
    ) -> Result<AssessmentCase, AssessmentServiceError> {
        if self.library.tool(tool).is_none() {
            return Err(AssessmentError::ToolNotFound(tool.0).into());
        }

        let case =
            AssessmentCase::new_structured(next_case_id(), facility, tool, method, Utc::now());
        info!(case = case.id.0, facility = facility.0, tool = tool.0, "structured case opened");
        Ok(self.repository.insert(case)?)
    }

    /// Open a fast-track case seeded from ad-hoc risks instead of a tool.
    pub fn create_fast_track_case(
        &self,
        facility: FacilityId,
        method: ScoringMethod,
    ) -> Result<AssessmentCase, AssessmentServiceError> {
        let case = AssessmentCase::new_fast_track(next_case_id(), facility, method, Utc::now());
        info!(case = case.id.0, facility = facility.0, "fast-track case opened");
        Ok(self.repository.insert(case)?)
    }

    fn load(&self, id: CaseId) -> Result<AssessmentCase, AssessmentServiceError> {
        Ok(self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?)
    }

    /// Insert-or-update the answer for one question of a structured case.
    pub fn save_answer(
        &self,
        case_id: CaseId,
        question: QuestionId,
        draft: AnswerDraft,
    ) -> Result<Answer, AssessmentServiceError> {
        let mut case = self.load(case_id)?;

        let tool_id = case.tool.ok_or(AssessmentError::AnswerRequiresTool)?;
        let tool = self
            .library
            .tool(tool_id)
            .ok_or(AssessmentError::ToolNotFound(tool_id.0))?;
        if !tool.contains_question(question) {
            return Err(AssessmentError::QuestionNotInTool(question).into());
        }

        let answer = case.upsert_answer(question, draft).clone();
        self.repository.update(case)?;
        debug!(case = case_id.0, question = question.0, "answer saved");
        Ok(answer)
    }

    /// Create (`risk_id` = None) or update an ad-hoc risk. The cached scores
    /// are recomputed from the draft's raw inputs on every save.
    pub fn save_risk(
        &self,
        case_id: CaseId,
        risk_id: Option<RiskId>,
        draft: RiskDraft,
    ) -> Result<RiskId, AssessmentServiceError> {
        let mut case = self.load(case_id)?;

        let id = match risk_id {
            Some(id) => {
                case.update_risk(id, draft)?;
                id
            }
            None => case.add_risk(draft),
        };

        self.repository.update(case)?;
        debug!(case = case_id.0, risk = id.0, "risk saved");
        Ok(id)
    }

    /// Seed a new ad-hoc risk from a catalog entry, copying its text fields
    /// verbatim. When the entry carries a remediation text, one measure is
    /// created from it as well. An unknown id performs no mutation.
    pub fn add_risk_from_catalog(
        &self,
        case_id: CaseId,
        entry_id: u32,
    ) -> Result<RiskId, AssessmentServiceError> {
        let entry = self
            .catalog
            .entry(entry_id)
            .ok_or(AssessmentError::CatalogEntryNotFound(entry_id))?
            .clone();

        let mut case = self.load(case_id)?;

        let mut draft = RiskDraft::new(entry.risk.clone(), case.scoring_method);
        draft.group = entry.group;
        draft.topic = entry.topic;
        draft.hazard_source = entry.hazard;
        draft.legal_basis = entry.legal_basis;
        draft.affected = entry.affected;
        draft.measure_text = entry.measure.clone();

        let risk_id = case.add_risk(draft);
        if !entry.measure.trim().is_empty() {
            case.add_measure(MeasureDraft {
                risk_id: Some(risk_id),
                description: entry.measure,
                ..MeasureDraft::default()
            })?;
        }

        self.repository.update(case)?;
        info!(case = case_id.0, entry = entry_id, risk = risk_id.0, "risk added from catalog");
        Ok(risk_id)
    }

    /// Attach a remediation measure to exactly one answer or risk.
    pub fn add_measure(
        &self,
        case_id: CaseId,
        draft: MeasureDraft,
    ) -> Result<MeasureId, AssessmentServiceError> {
        let mut case = self.load(case_id)?;
        let id = case.add_measure(draft)?;
        self.repository.update(case)?;
        Ok(id)
    }

    /// Remediation-planning update: priority for an answered question.
    pub fn set_answer_priority(
        &self,
        case_id: CaseId,
        question: QuestionId,
        priority: Option<RiskPriority>,
    ) -> Result<(), AssessmentServiceError> {
        let mut case = self.load(case_id)?;
        let answer = case
            .answer_mut(question)
            .ok_or(AssessmentError::AnswerNotFound(question))?;
        answer.risk_priority = priority;
        self.repository.update(case)?;
        Ok(())
    }

    /// Review update for an ad-hoc risk: acceptability verdict and priority.
    pub fn set_risk_review(
        &self,
        case_id: CaseId,
        risk_id: RiskId,
        is_acceptable: Option<bool>,
        priority: Option<RiskPriority>,
    ) -> Result<(), AssessmentServiceError> {
        let mut case = self.load(case_id)?;
        let risk = case.risk_mut(risk_id)?;
        risk.is_acceptable = is_acceptable;
        risk.risk_priority = priority;
        self.repository.update(case)?;
        Ok(())
    }

    /// Complete the assessment, writing final comments and participants
    /// atomically with the status flip.
    pub fn finalize_case(
        &self,
        case_id: CaseId,
        comments: impl Into<String>,
        participants: impl Into<String>,
    ) -> Result<AssessmentCase, AssessmentServiceError> {
        let mut case = self.load(case_id)?;
        case.finalize(comments, participants, Utc::now())?;
        self.repository.update(case.clone())?;
        info!(case = case_id.0, "case finalized");
        Ok(case)
    }

    /// Append a control record to a risk's ledger. The parent risk's own
    /// scores are left untouched.
    pub fn add_control_record(
        &self,
        case_id: CaseId,
        risk_id: RiskId,
        draft: ControlRecordDraft,
    ) -> Result<ControlRecordView, AssessmentServiceError> {
        let mut case = self.load(case_id)?;
        let sequence = case.next_control_sequence();
        let risk = case.risk_mut(risk_id)?;
        let record = ledger::append_control(risk, draft, sequence)?;
        let view = record.to_view();
        self.repository.update(case)?;
        debug!(case = case_id.0, risk = risk_id.0, "control record appended");
        Ok(view)
    }

    pub fn add_team_member(
        &self,
        case_id: CaseId,
        member: TeamMember,
    ) -> Result<(), AssessmentServiceError> {
        let mut case = self.load(case_id)?;
        case.team.push(member);
        self.repository.update(case)?;
        Ok(())
    }

    pub fn case(&self, case_id: CaseId) -> Result<AssessmentCase, AssessmentServiceError> {
        self.load(case_id)
    }

    pub fn cases_for_facility(
        &self,
        facility: FacilityId,
    ) -> Result<Vec<AssessmentCase>, AssessmentServiceError> {
        Ok(self.repository.for_facility(facility)?)
    }

    /// Full read-side projection of a case for report renderers.
    pub fn case_overview(&self, case_id: CaseId) -> Result<CaseOverview, AssessmentServiceError> {
        let case = self.load(case_id)?;
        let tool = case.tool.and_then(|id| self.library.tool(id));
        Ok(views::case_overview(&case, tool))
    }

    /// Only negatively assessed answers/risks, with derived statuses.
    pub fn action_plan(
        &self,
        case_id: CaseId,
    ) -> Result<Vec<ActionPlanEntry>, AssessmentServiceError> {
        let case = self.load(case_id)?;
        Ok(action_plan::action_plan(&case))
    }

    /// Residual-score time series for a risk, newest first.
    pub fn control_history(
        &self,
        case_id: CaseId,
        risk_id: RiskId,
    ) -> Result<Vec<ControlRecordView>, AssessmentServiceError> {
        let case = self.load(case_id)?;
        let risk = case.risk(risk_id).ok_or(AssessmentError::RiskNotFound(risk_id))?;
        Ok(ledger::controls_newest_first(risk)
            .into_iter()
            .map(|record| record.to_view())
            .collect())
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Domain(#[from] AssessmentError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
