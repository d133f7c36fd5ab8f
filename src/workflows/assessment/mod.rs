//! Assessment lifecycle: cases, answers, ad-hoc risks, remediation measures
//! and the control-record ledger.

pub mod action_plan;
mod case;
pub mod domain;
pub mod ledger;
pub mod repository;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use action_plan::{action_plan, ActionPlanEntry, ActionPlanOrigin, ActionPlanStatus};
pub use case::AssessmentCase;
pub use domain::{
    Answer, AnswerDraft, AnswerResponse, AssessmentError, CaseId, CaseStatus, ControlRecord,
    ControlRecordDraft, CustomRisk, FacilityId, Measure, MeasureDraft, MeasureId, MeasureParent,
    RiskDraft, RiskId, RiskPriority, TeamMember, WorkflowKind,
};
pub use repository::{CaseRepository, MemoryCaseRepository, RepositoryError};
pub use service::{AssessmentService, AssessmentServiceError};
pub use views::{case_overview, CaseOverview, ControlRecordView, RiskLevelView};
