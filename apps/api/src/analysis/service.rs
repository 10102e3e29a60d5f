//! Analysis flow: validate the session → build the request → one oracle call → validate → store.

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis::oracle::ScoringOracle;
use crate::analysis::request::build_request;
use crate::analysis::result::AnalysisResult;
use crate::errors::AppError;
use crate::llm_client::LlmError;
use crate::session::registry::SessionRegistry;

/// Oracle error fragments that mean a submitted file could not be parsed.
const UNREADABLE_MARKERS: &[&str] = &["no pages", "password protected", "password-protected"];

/// Maps client-level failures onto the user-facing taxonomy.
pub fn map_oracle_error(err: LlmError) -> AppError {
    let text = err.to_string();
    let lowered = text.to_lowercase();
    if UNREADABLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        AppError::UnreadableDocument(text)
    } else {
        AppError::Oracle(text)
    }
}

/// Runs one analysis attempt for a session. No retry: any failure ends the attempt
/// and leaves the session without a result.
pub async fn run_analysis(
    sessions: &SessionRegistry,
    oracle: &dyn ScoringOracle,
    session_id: Uuid,
) -> Result<AnalysisResult, AppError> {
    let ticket = sessions.with_mut(session_id, |s| s.begin_analysis())??;
    info!(
        "Analysis started for session {session_id}: {} document(s), category {:?}",
        ticket.documents.len(),
        ticket.category
    );

    let request = build_request(&ticket.documents, ticket.category, ticket.language).await?;

    let text = oracle.score(&request).await.map_err(|e| {
        error!("Scoring oracle call failed for session {session_id}: {e}");
        map_oracle_error(e)
    })?;

    let result = AnalysisResult::from_oracle_text(&text)?;

    let kept = sessions.with_mut(session_id, |s| {
        s.complete_analysis(ticket.epoch, result.clone())
    })?;
    if !kept {
        warn!("Discarding analysis for session {session_id}: session was reset");
        return Err(AppError::Validation(
            "Session was reset while the analysis was running".to_string(),
        ));
    }

    info!(
        "Analysis finished for session {session_id}: score {}",
        result.creditworthiness_score
    );
    Ok(result)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::analysis::result::tests::SAMPLE_RESPONSE;
    use crate::llm_client::GenerateRequest;
    use crate::models::applicant::{ApplicantCategory, Language};
    use crate::models::document::DocumentCategory;
    use crate::session::store::NewUpload;

    /// Fake oracle returning a canned reply and counting calls.
    pub(crate) struct FakeOracle {
        pub calls: AtomicUsize,
        pub reply: Box<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
    }

    impl FakeOracle {
        pub(crate) fn ok(text: &'static str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Box::new(move || Ok(text.to_string())),
            })
        }

        pub(crate) fn failing(make: fn() -> LlmError) -> Arc<Self> {
            Self::replying(move || Err(make()))
        }

        /// Runs `reply` on every call, e.g. to mutate the session mid-analysis.
        pub(crate) fn replying(
            reply: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                reply: Box::new(reply),
            })
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScoringOracle for FakeOracle {
        async fn score(&self, _request: &GenerateRequest) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.reply)()
        }
    }

    fn session_with_files(registry: &SessionRegistry, data: &'static [u8]) -> Uuid {
        let id = registry.create(Language::En).unwrap();
        registry
            .with_mut(id, |s| {
                s.select_category(ApplicantCategory::Salaried).unwrap();
                s.uploads.add_batch(
                    "salary_slip",
                    DocumentCategory::Income,
                    vec![NewUpload {
                        filename: "slip.pdf".to_string(),
                        mime_type: "application/pdf".to_string(),
                        data: Bytes::from_static(data),
                    }],
                );
            })
            .unwrap();
        id
    }

    #[tokio::test]
    async fn test_successful_analysis_stored_on_session() {
        let registry = SessionRegistry::new();
        let oracle = FakeOracle::ok(SAMPLE_RESPONSE);
        let id = session_with_files(&registry, b"%PDF-1.4");

        let result = run_analysis(&registry, oracle.as_ref(), id).await.unwrap();

        assert_eq!(result.creditworthiness_score, 82.0);
        assert_eq!(oracle.call_count(), 1);
        let stored = registry.with(id, |s| s.result.clone()).unwrap();
        assert_eq!(stored, Some(result));
    }

    #[tokio::test]
    async fn test_no_files_fails_before_oracle() {
        let registry = SessionRegistry::new();
        let oracle = FakeOracle::ok(SAMPLE_RESPONSE);
        let id = registry.create(Language::En).unwrap();
        registry
            .with_mut(id, |s| s.select_category(ApplicantCategory::Freelance))
            .unwrap()
            .unwrap();

        let err = run_analysis(&registry, oracle.as_ref(), id).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_file_fails_before_oracle() {
        let registry = SessionRegistry::new();
        let oracle = FakeOracle::ok(SAMPLE_RESPONSE);
        let id = session_with_files(&registry, b"");

        let err = run_analysis(&registry, oracle.as_ref(), id).await.unwrap_err();

        assert!(matches!(err, AppError::EmptyFile(_)));
        assert_eq!(oracle.call_count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_reply_is_oracle_error_and_not_stored() {
        let registry = SessionRegistry::new();
        let oracle = FakeOracle::ok("not json at all");
        let id = session_with_files(&registry, b"%PDF");

        let err = run_analysis(&registry, oracle.as_ref(), id).await.unwrap_err();

        assert!(matches!(err, AppError::Oracle(_)));
        assert!(registry.with(id, |s| s.result.is_none()).unwrap());
    }

    #[tokio::test]
    async fn test_no_pages_maps_to_unreadable_document() {
        let registry = SessionRegistry::new();
        let oracle = FakeOracle::failing(|| LlmError::Api {
            status: 400,
            message: "The document has no pages.".to_string(),
        });
        let id = session_with_files(&registry, b"%PDF");

        let err = run_analysis(&registry, oracle.as_ref(), id).await.unwrap_err();

        assert!(matches!(err, AppError::UnreadableDocument(_)));
        assert_eq!(oracle.call_count(), 1);
    }

    #[tokio::test]
    async fn test_reset_during_oracle_call_discards_result() {
        let registry = SessionRegistry::new();
        let id = session_with_files(&registry, b"%PDF");
        let during_call = registry.clone();
        let oracle = FakeOracle::replying(move || {
            during_call.with_mut(id, |s| s.reset()).unwrap();
            Ok(SAMPLE_RESPONSE.to_string())
        });

        let err = run_analysis(&registry, oracle.as_ref(), id).await.unwrap_err();

        match err {
            AppError::Validation(msg) => assert!(msg.contains("reset")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(oracle.call_count(), 1);
        assert!(registry.with(id, |s| s.result.is_none()).unwrap());
        assert_eq!(registry.with(id, |s| s.epoch).unwrap(), 1);
    }

    #[test]
    fn test_other_failures_map_to_oracle_error() {
        assert!(matches!(
            map_oracle_error(LlmError::EmptyContent),
            AppError::Oracle(_)
        ));
        assert!(matches!(
            map_oracle_error(LlmError::Api {
                status: 503,
                message: "overloaded".to_string()
            }),
            AppError::Oracle(_)
        ));
    }
}
