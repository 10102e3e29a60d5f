//! Session context: everything one wizard run holds, owned explicitly instead of
//! living in ambient UI state.
//!
//! A session starts with no category, accumulates uploads and at most one
//! analysis result, and is wiped by `reset`. Each reset bumps `epoch`, which is
//! how in-flight analyses started before the reset get discarded.
//!
//! Uploads are capped per session, and `last_touched` lets the registry drop
//! sessions nobody has used for a while.

pub mod handlers;
pub mod registry;
pub mod store;

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::analysis::result::AnalysisResult;
use crate::calculator::{manual_assessment, ManualAssessment};
use crate::catalog::{find_descriptor, required_documents};
use crate::errors::AppError;
use crate::models::applicant::{ApplicantCategory, EvaluationMode, Language};
use crate::models::document::{DocumentCategory, DocumentDescriptor};
use crate::session::store::{NewUpload, UploadStore, UploadedDocument};

/// Raw calculator inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    #[serde(default)]
    pub income: String,
    #[serde(default)]
    pub debt: String,
}

#[derive(Debug, Default)]
pub struct Session {
    pub category: Option<ApplicantCategory>,
    pub language: Language,
    pub mode: EvaluationMode,
    pub manual: ManualEntry,
    pub uploads: UploadStore,
    pub result: Option<AnalysisResult>,
    pub epoch: u64,
    /// Unix millis of the last access. Atomic so read-only access can refresh it.
    pub last_touched: AtomicI64,
}

/// Everything the analysis needs, captured so the session lock can be
/// released while the oracle call is in flight.
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub epoch: u64,
    pub category: ApplicantCategory,
    pub language: Language,
    pub documents: Vec<UploadedDocument>,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            last_touched: AtomicI64::new(Utc::now().timestamp_millis()),
            ..Self::default()
        }
    }

    pub fn touch(&self) {
        self.last_touched
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    pub fn last_touched_millis(&self) -> i64 {
        self.last_touched.load(Ordering::Relaxed)
    }

    /// Chooses the applicant category. It stays fixed until `reset`.
    pub fn select_category(&mut self, category: ApplicantCategory) -> Result<(), AppError> {
        match self.category {
            Some(current) if current == category => Ok(()),
            Some(current) => Err(AppError::Validation(format!(
                "Category already selected ({current:?}); reset the session to change it"
            ))),
            None => {
                self.category = Some(category);
                Ok(())
            }
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_mode(&mut self, mode: EvaluationMode) {
        self.mode = mode;
    }

    pub fn update_manual(&mut self, entry: ManualEntry) -> ManualAssessment {
        self.manual = entry;
        self.manual_assessment()
    }

    pub fn manual_assessment(&self) -> ManualAssessment {
        manual_assessment(
            &self.manual.income,
            &self.manual.debt,
            self.language,
            self.category,
        )
    }

    pub fn required_documents(&self) -> Vec<DocumentDescriptor> {
        required_documents(self.language, self.category)
    }

    /// Stores a batch in one catalog slot of the chosen category. A single-file
    /// slot takes one file per batch, and the session's total payload may not
    /// exceed `max_bytes`.
    pub fn add_uploads(
        &mut self,
        descriptor_id: &str,
        uploads: Vec<NewUpload>,
        max_bytes: usize,
    ) -> Result<Vec<String>, AppError> {
        let category = self.category.ok_or_else(|| {
            AppError::Validation("Select an applicant category before uploading".to_string())
        })?;
        let descriptor = find_descriptor(self.language, category, descriptor_id).ok_or_else(|| {
            AppError::Validation(format!(
                "Document '{descriptor_id}' is not required for {}",
                category.display_name()
            ))
        })?;
        if !descriptor.multiple && uploads.len() > 1 {
            return Err(AppError::Validation(format!(
                "Document '{descriptor_id}' accepts a single file"
            )));
        }

        let incoming: usize = uploads.iter().map(|u| u.data.len()).sum();
        let held = self.uploads.total_bytes();
        if held.saturating_add(incoming) > max_bytes {
            return Err(AppError::UploadLimit(format!(
                "Session upload limit is {max_bytes} bytes; {held} already stored, {incoming} more requested"
            )));
        }

        Ok(self
            .uploads
            .add_batch(descriptor.id, descriptor.category, uploads))
    }

    /// Validates inputs, clears any previous result and snapshots the uploads.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, AppError> {
        let category = self.category.ok_or_else(|| {
            AppError::Validation("Select an applicant category before analysis".to_string())
        })?;
        if self.uploads.is_empty() {
            return Err(AppError::Validation(
                "Please upload at least one document.".to_string(),
            ));
        }

        self.result = None;
        Ok(AnalysisTicket {
            epoch: self.epoch,
            category,
            language: self.language,
            documents: self.uploads.snapshot(),
        })
    }

    /// Stores a finished result unless the session was reset in the meantime.
    /// Returns whether the result was kept.
    pub fn complete_analysis(&mut self, epoch: u64, result: AnalysisResult) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.result = Some(result);
        true
    }

    /// Clears everything except the language and invalidates in-flight analyses.
    pub fn reset(&mut self) {
        self.category = None;
        self.mode = EvaluationMode::Manual;
        self.manual = ManualEntry::default();
        self.uploads.clear();
        self.result = None;
        self.epoch += 1;
    }
}

#[derive(Debug, Serialize)]
pub struct UploadedDocumentView {
    pub id: String,
    pub filename: String,
    pub descriptor_id: String,
    pub category: DocumentCategory,
    pub mime_type: String,
    pub size: usize,
    pub preview_url: String,
}

impl UploadedDocumentView {
    pub fn new(session_id: &uuid::Uuid, doc: &UploadedDocument) -> Self {
        Self {
            id: doc.id.clone(),
            filename: doc.filename.clone(),
            descriptor_id: doc.descriptor_id.clone(),
            category: doc.category,
            mime_type: doc.mime_type.clone(),
            size: doc.size(),
            preview_url: format!(
                "/api/v1/sessions/{session_id}/documents/{}/preview",
                doc.id
            ),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: uuid::Uuid,
    pub category: Option<ApplicantCategory>,
    pub language: Language,
    pub mode: EvaluationMode,
    pub manual: ManualEntry,
    pub manual_assessment: ManualAssessment,
    pub required_documents: Vec<DocumentDescriptor>,
    pub documents: Vec<UploadedDocumentView>,
    pub result: Option<AnalysisResult>,
}

impl SessionView {
    pub fn new(id: uuid::Uuid, session: &Session) -> Self {
        Self {
            id,
            category: session.category,
            language: session.language,
            mode: session.mode,
            manual: session.manual.clone(),
            manual_assessment: session.manual_assessment(),
            required_documents: session.required_documents(),
            documents: session
                .uploads
                .iter()
                .map(|d| UploadedDocumentView::new(&id, d))
                .collect(),
            result: session.result.clone(),
        }
    }
}
