use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::case::AssessmentCase;
use super::domain::{CaseId, FacilityId};

/// Storage abstraction so the service module can be exercised in isolation.
/// Every engine operation is a single fetch/update round trip against it.
pub trait CaseRepository: Send + Sync {
    fn insert(&self, case: AssessmentCase) -> Result<AssessmentCase, RepositoryError>;
    fn update(&self, case: AssessmentCase) -> Result<(), RepositoryError>;
    fn fetch(&self, id: CaseId) -> Result<Option<AssessmentCase>, RepositoryError>;
    fn for_facility(&self, facility: FacilityId) -> Result<Vec<AssessmentCase>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("case already exists")]
    Conflict,
    #[error("case not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// In-process store used as the default adapter and as the test double.
#[derive(Default, Clone)]
pub struct MemoryCaseRepository {
    cases: Arc<Mutex<HashMap<CaseId, AssessmentCase>>>,
}

impl MemoryCaseRepository {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<CaseId, AssessmentCase>>, RepositoryError> {
        self.cases
            .lock()
            .map_err(|_| RepositoryError::Unavailable("case store poisoned".to_string()))
    }
}

impl CaseRepository for MemoryCaseRepository {
    fn insert(&self, case: AssessmentCase) -> Result<AssessmentCase, RepositoryError> {
        let mut cases = self.lock()?;
        if cases.contains_key(&case.id) {
            return Err(RepositoryError::Conflict);
        }
        cases.insert(case.id, case.clone());
        Ok(case)
    }

    fn update(&self, case: AssessmentCase) -> Result<(), RepositoryError> {
        let mut cases = self.lock()?;
        if !cases.contains_key(&case.id) {
            return Err(RepositoryError::NotFound);
        }
        cases.insert(case.id, case);
        Ok(())
    }

    fn fetch(&self, id: CaseId) -> Result<Option<AssessmentCase>, RepositoryError> {
        Ok(self.lock()?.get(&id).cloned())
    }

    fn for_facility(&self, facility: FacilityId) -> Result<Vec<AssessmentCase>, RepositoryError> {
        let mut cases: Vec<AssessmentCase> = self
            .lock()?
            .values()
            .filter(|case| case.facility == facility)
            .cloned()
            .collect();
        cases.sort_by_key(|case| case.id);
        Ok(cases)
    }
}
