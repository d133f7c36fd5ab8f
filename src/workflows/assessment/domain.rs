use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::library::QuestionId;
use crate::scoring::{KinneyInputs, MatrixInputs, ScoringMethod};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FacilityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RiskId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeasureId(pub u64);

/// Creation path that produced a case. Library cases walk the structured
/// question tree; template cases are seeded from the external risk catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    Library,
    Template,
}

impl WorkflowKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Library => "Soru Kütüphanesi",
            Self::Template => "Hızlı Değerlendirme",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Draft,
    Completed,
}

impl CaseStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Taslak",
            Self::Completed => "Tamamlandı",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerResponse {
    Yes,
    No,
    Postponed,
    NotApplicable,
}

impl AnswerResponse {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "Evet",
            Self::No => "Hayır",
            Self::Postponed => "Ertelendi",
            Self::NotApplicable => "Kapsam Dışı",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskPriority {
    High,
    Medium,
    Low,
}

impl RiskPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "Yüksek",
            Self::Medium => "Orta",
            Self::Low => "Düşük",
        }
    }
}

/// Remediation step attached to a negatively answered question or an
/// unacceptable risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub id: MeasureId,
    pub description: String,
    pub expertise: String,
    pub responsible: String,
    pub budget: String,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
}

/// Inbound measure payload. Exactly one of `answer_question` / `risk_id`
/// must be set; the write boundary rejects anything else.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeasureDraft {
    pub answer_question: Option<QuestionId>,
    pub risk_id: Option<RiskId>,
    pub description: String,
    #[serde(default)]
    pub expertise: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub planned_start: Option<NaiveDate>,
    #[serde(default)]
    pub planned_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureParent {
    Answer(QuestionId),
    Risk(RiskId),
}

impl MeasureDraft {
    pub fn parent(&self) -> Result<MeasureParent, AssessmentError> {
        match (self.answer_question, self.risk_id) {
            (Some(question), None) => Ok(MeasureParent::Answer(question)),
            (None, Some(risk)) => Ok(MeasureParent::Risk(risk)),
            (None, None) => Err(AssessmentError::MeasureParentMissing),
            (Some(_), Some(_)) => Err(AssessmentError::MeasureParentAmbiguous),
        }
    }

    pub(crate) fn into_measure(self, id: MeasureId) -> Measure {
        Measure {
            id,
            description: self.description,
            expertise: self.expertise,
            responsible: self.responsible,
            budget: self.budget,
            planned_start: self.planned_start,
            planned_end: self.planned_end,
        }
    }
}

/// Response to one question of the case's tool. Unique per question: the
/// case keys answers on `QuestionId`, so re-submitting updates in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Answer {
    pub response: Option<AnswerResponse>,
    pub notes: String,
    pub risk_priority: Option<RiskPriority>,
    pub measures: Vec<Measure>,
}

impl Answer {
    pub fn is_answered(&self) -> bool {
        self.response.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerDraft {
    pub response: Option<AnswerResponse>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub risk_priority: Option<RiskPriority>,
}

/// Site-specific risk recorded outside the structured questionnaire,
/// optionally seeded from the external catalog.
///
/// The cached `kinney_score` / `matrix_score` are projections of the raw
/// inputs, recomputed on every save. They are never authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRisk {
    pub id: RiskId,
    pub description: String,
    pub is_acceptable: Option<bool>,
    pub evidence: String,
    pub risk_priority: Option<RiskPriority>,

    pub group: String,
    pub topic: String,
    pub hazard_source: String,
    pub legal_basis: String,
    pub affected: String,
    pub measure_text: String,

    pub mitigation_strategy: String,
    pub estimated_budget: String,
    pub responsible: String,
    pub due_date: Option<NaiveDate>,

    pub scoring_method: ScoringMethod,
    pub kinney: KinneyInputs,
    pub kinney_score: Option<i64>,
    pub matrix: MatrixInputs,
    pub matrix_score: Option<u8>,

    pub measures: Vec<Measure>,
    pub controls: Vec<ControlRecord>,
}

impl CustomRisk {
    pub(crate) fn from_draft(id: RiskId, draft: RiskDraft) -> Self {
        let mut risk = Self {
            id,
            description: draft.description,
            is_acceptable: draft.is_acceptable,
            evidence: draft.evidence,
            risk_priority: draft.risk_priority,
            group: draft.group,
            topic: draft.topic,
            hazard_source: draft.hazard_source,
            legal_basis: draft.legal_basis,
            affected: draft.affected,
            measure_text: draft.measure_text,
            mitigation_strategy: draft.mitigation_strategy,
            estimated_budget: draft.estimated_budget,
            responsible: draft.responsible,
            due_date: draft.due_date,
            scoring_method: draft.scoring_method,
            kinney: draft.kinney,
            kinney_score: None,
            matrix: draft.matrix,
            matrix_score: None,
            measures: Vec::new(),
            controls: Vec::new(),
        };
        risk.recompute_scores();
        risk
    }

    pub(crate) fn apply_draft(&mut self, draft: RiskDraft) {
        self.description = draft.description;
        self.is_acceptable = draft.is_acceptable;
        self.evidence = draft.evidence;
        self.risk_priority = draft.risk_priority;
        self.group = draft.group;
        self.topic = draft.topic;
        self.hazard_source = draft.hazard_source;
        self.legal_basis = draft.legal_basis;
        self.affected = draft.affected;
        self.measure_text = draft.measure_text;
        self.mitigation_strategy = draft.mitigation_strategy;
        self.estimated_budget = draft.estimated_budget;
        self.responsible = draft.responsible;
        self.due_date = draft.due_date;
        self.scoring_method = draft.scoring_method;
        self.kinney = draft.kinney;
        self.matrix = draft.matrix;
        self.recompute_scores();
    }

    /// Refresh the cached score projections from the raw inputs.
    pub fn recompute_scores(&mut self) {
        self.matrix = self.matrix.normalized();
        self.kinney_score = self.kinney.score();
        self.matrix_score = self.matrix.score();
    }
}

/// Inbound risk payload used for both creation and update.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskDraft {
    pub description: String,
    #[serde(default)]
    pub is_acceptable: Option<bool>,
    #[serde(default)]
    pub evidence: String,
    #[serde(default)]
    pub risk_priority: Option<RiskPriority>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub hazard_source: String,
    #[serde(default)]
    pub legal_basis: String,
    #[serde(default)]
    pub affected: String,
    #[serde(default)]
    pub measure_text: String,
    #[serde(default)]
    pub mitigation_strategy: String,
    #[serde(default)]
    pub estimated_budget: String,
    #[serde(default)]
    pub responsible: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub scoring_method: ScoringMethod,
    #[serde(default)]
    pub kinney: KinneyInputs,
    #[serde(default)]
    pub matrix: MatrixInputs,
}

impl RiskDraft {
    pub fn new(description: impl Into<String>, scoring_method: ScoringMethod) -> Self {
        Self {
            description: description.into(),
            is_acceptable: None,
            evidence: String::new(),
            risk_priority: None,
            group: String::new(),
            topic: String::new(),
            hazard_source: String::new(),
            legal_basis: String::new(),
            affected: String::new(),
            measure_text: String::new(),
            mitigation_strategy: String::new(),
            estimated_budget: String::new(),
            responsible: String::new(),
            due_date: None,
            scoring_method,
            kinney: KinneyInputs::unset(),
            matrix: MatrixInputs::unset(),
        }
    }
}

/// Dated re-audit of a risk. Append-only: records are individually retained
/// and never folded into the parent risk's original score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlRecord {
    pub control_date: NaiveDate,
    pub auditor: String,
    pub note: String,
    pub scoring_method: ScoringMethod,
    pub kinney: KinneyInputs,
    pub matrix: MatrixInputs,
    pub residual_score: Option<i64>,
    pub sequence: u64,
}

/// Inbound control-record payload. The scoring method defaults to the parent
/// risk's current method when not given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ControlRecordDraft {
    pub control_date: Option<NaiveDate>,
    pub auditor: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub scoring_method: Option<ScoringMethod>,
    #[serde(default)]
    pub kinney: KinneyInputs,
    #[serde(default)]
    pub matrix: MatrixInputs,
}

/// Signatory line for report signature blocks. Storage only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub role: String,
    pub name: String,
    pub title: String,
}

/// Domain-rule violations. All recoverable and caller visible; none leaves
/// a partial write behind.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("case is already completed")]
    CaseAlreadyCompleted,
    #[error("measure must reference an answer or a risk")]
    MeasureParentMissing,
    #[error("measure cannot reference both an answer and a risk")]
    MeasureParentAmbiguous,
    #[error("control record requires an auditor name")]
    MissingAuditor,
    #[error("control record requires a control date")]
    MissingControlDate,
    #[error("question {0:?} is not part of the case's tool")]
    QuestionNotInTool(QuestionId),
    #[error("answers require a structured case with a tool")]
    AnswerRequiresTool,
    #[error("answer for question {0:?} not found")]
    AnswerNotFound(QuestionId),
    #[error("risk {0:?} not found in case")]
    RiskNotFound(RiskId),
    #[error("tool {0} not found in question library")]
    ToolNotFound(u64),
    #[error("catalog entry {0} not found")]
    CatalogEntryNotFound(u32),
}
