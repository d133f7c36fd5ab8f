use std::sync::Arc;

use chrono::NaiveDate;

use crate::catalog::{CatalogEntry, CatalogSnapshot};
use crate::library::{Category, Question, QuestionId, QuestionLibrary, Tool, ToolId, Topic};
use crate::scoring::{KinneyInputs, MatrixInputs, ScoringMethod};
use crate::workflows::assessment::repository::MemoryCaseRepository;
use crate::workflows::assessment::service::AssessmentService;
use crate::workflows::assessment::{AssessmentCase, CaseId, FacilityId, RiskDraft};

pub(super) const FACILITY: FacilityId = FacilityId(7);
pub(super) const TOOL: ToolId = ToolId(1);

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Ten-question tool split over two categories.
pub(super) fn sample_tool() -> Tool {
    let questions = |base: u64| -> Vec<Question> {
        (0..5)
            .map(|index| Question {
                id: QuestionId(base + index),
                text: format!("Kontrol sorusu {}", base + index),
                order: index as u32 + 1,
            })
            .collect()
    };

    Tool {
        id: TOOL,
        name: "Depo Kontrol Listesi".to_string(),
        categories: vec![
            Category {
                name: "Genel".to_string(),
                order: 1,
                topics: vec![Topic {
                    name: "Düzen".to_string(),
                    order: 1,
                    questions: questions(1),
                }],
            },
            Category {
                name: "Acil Durum".to_string(),
                order: 2,
                topics: vec![Topic {
                    name: "Yangın".to_string(),
                    order: 1,
                    questions: questions(6),
                }],
            },
        ],
    }
}

pub(super) fn library() -> Arc<QuestionLibrary> {
    Arc::new(QuestionLibrary::new(vec![sample_tool()]))
}

pub(super) fn catalog() -> Arc<CatalogSnapshot> {
    Arc::new(CatalogSnapshot::new(vec![
        CatalogEntry {
            id: 1,
            group: "Elektrik".to_string(),
            topic: "Pano".to_string(),
            hazard: "Açık elektrik panosu".to_string(),
            risk: "Elektrik çarpması".to_string(),
            legal_basis: "6331 sayılı kanun".to_string(),
            measure: "Pano kapakları kilitli tutulmalı".to_string(),
            affected: "Tüm çalışanlar".to_string(),
            source_file: "elektrik.json".to_string(),
        },
        CatalogEntry {
            id: 2,
            group: "Ergonomi".to_string(),
            topic: String::new(),
            hazard: "Uygunsuz duruş".to_string(),
            risk: "Kas iskelet rahatsızlığı".to_string(),
            legal_basis: String::new(),
            measure: String::new(),
            affected: "Ofis çalışanları".to_string(),
            source_file: "ergonomi.json".to_string(),
        },
    ]))
}

pub(super) fn build_service() -> (
    AssessmentService<MemoryCaseRepository>,
    Arc<MemoryCaseRepository>,
) {
    let repository = Arc::new(MemoryCaseRepository::default());
    let service = AssessmentService::new(repository.clone(), catalog(), library());
    (service, repository)
}

pub(super) fn structured_case(service: &AssessmentService<MemoryCaseRepository>) -> CaseId {
    service
        .create_structured_case(FACILITY, TOOL, ScoringMethod::FineKinney)
        .expect("structured case opens")
        .id
}

pub(super) fn fast_track_case(service: &AssessmentService<MemoryCaseRepository>) -> CaseId {
    service
        .create_fast_track_case(FACILITY, ScoringMethod::FineKinney)
        .expect("fast-track case opens")
        .id
}

pub(super) fn draft_case() -> AssessmentCase {
    AssessmentCase::new_structured(
        CaseId(900),
        FACILITY,
        TOOL,
        ScoringMethod::FineKinney,
        chrono::Utc::now(),
    )
}

pub(super) fn kinney_draft(probability: f64, frequency: f64, severity: i32) -> RiskDraft {
    let mut draft = RiskDraft::new("Yüksekte çalışma", ScoringMethod::FineKinney);
    draft.kinney = KinneyInputs {
        probability: Some(probability),
        frequency: Some(frequency),
        severity: Some(severity),
    };
    draft
}

pub(super) fn matrix_draft(probability: u8, severity: u8) -> RiskDraft {
    let mut draft = RiskDraft::new("Gürültüye maruziyet", ScoringMethod::LMatrix);
    draft.matrix = MatrixInputs {
        probability: Some(probability),
        severity: Some(severity),
    };
    draft
}
