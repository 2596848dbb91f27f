use healthchat_api::{ApiError, HealthClient, Transport};
use healthchat_types::{AnalysisResult, SymptomCheckRequest};

use crate::conversation::failure_message;
use crate::error::SessionError;

const ANALYZE_FAILURE_FALLBACK: &str = "Failed to analyze symptoms. Please try again.";

/// What happened to an `analyze` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// A request was already in flight
    Ignored,
    /// Rejected locally, no request made
    Rejected(SessionError),
    Analyzed,
    Failed(String),
}

/// Symptom checker state: a duplicate-free list in entry order, the text
/// being typed, and the latest analysis
pub struct SymptomSession<T> {
    client: HealthClient<T>,
    symptoms: Vec<String>,
    draft: String,
    result: Option<AnalysisResult>,
    pending: bool,
    // Set by `reset` while a request is in flight so its answer is dropped
    discard_inflight: bool,
    last_error: Option<String>,
}

impl<T: Transport> SymptomSession<T> {
    pub fn new(client: HealthClient<T>) -> Self {
        Self {
            client,
            symptoms: Vec::new(),
            draft: String::new(),
            result: None,
            pending: false,
            discard_inflight: false,
            last_error: None,
        }
    }

    /// Append a trimmed symptom. Blank input and exact duplicates are
    /// ignored; returns whether the list changed.
    pub fn add_symptom(&mut self, text: &str) -> bool {
        let symptom = text.trim();
        if symptom.is_empty() || self.symptoms.iter().any(|s| s == symptom) {
            return false;
        }
        self.symptoms.push(symptom.to_string());
        true
    }

    /// Remove the entry equal to `value`; returns whether one was found
    pub fn remove_symptom(&mut self, value: &str) -> bool {
        match self.symptoms.iter().position(|s| s == value) {
            Some(index) => {
                self.symptoms.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Add the draft as a symptom; the draft is cleared only if it was added
    pub fn add_draft(&mut self) -> bool {
        let draft = std::mem::take(&mut self.draft);
        if self.add_symptom(&draft) {
            true
        } else {
            self.draft = draft;
            false
        }
    }

    /// Validate and mark a request as in flight.
    ///
    /// `Ok(None)` means a request is already pending. An empty list is
    /// rejected with [`SessionError::NoSymptoms`], which is also recorded as
    /// the visible error.
    pub fn begin_analysis(&mut self) -> Result<Option<SymptomCheckRequest>, SessionError> {
        if self.pending {
            return Ok(None);
        }
        if self.symptoms.is_empty() {
            let err = SessionError::NoSymptoms;
            self.last_error = Some(err.to_string());
            return Err(err);
        }

        self.pending = true;
        self.discard_inflight = false;
        self.last_error = None;
        self.result = None;

        Ok(Some(SymptomCheckRequest {
            symptoms: self.symptoms.clone(),
        }))
    }

    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResult, ApiError>) -> AnalyzeOutcome {
        if !self.pending {
            log::warn!("Ignoring analysis result with no request pending");
            return AnalyzeOutcome::Ignored;
        }
        self.pending = false;

        if std::mem::take(&mut self.discard_inflight) {
            log::debug!("Dropping analysis result after reset");
            return AnalyzeOutcome::Ignored;
        }

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                AnalyzeOutcome::Analyzed
            }
            Err(e) => {
                log::error!("Error analyzing symptoms: {}", e);
                let message = failure_message(&e, ANALYZE_FAILURE_FALLBACK);
                self.last_error = Some(message.clone());
                AnalyzeOutcome::Failed(message)
            }
        }
    }

    /// Analyse the current list and wait for the answer
    pub async fn analyze(&mut self) -> AnalyzeOutcome {
        let request = match self.begin_analysis() {
            Ok(Some(request)) => request,
            Ok(None) => return AnalyzeOutcome::Ignored,
            Err(e) => return AnalyzeOutcome::Rejected(e),
        };
        let outcome = self.client.check_symptoms(&request).await;
        self.finish_analysis(outcome)
    }

    /// Forget symptoms, draft, result and error
    pub fn reset(&mut self) {
        self.symptoms.clear();
        self.draft.clear();
        self.result = None;
        self.last_error = None;
        if self.pending {
            self.discard_inflight = true;
        }
    }

    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn can_analyze(&self) -> bool {
        !self.pending && !self.symptoms.is_empty()
    }

    pub fn can_reset(&self) -> bool {
        !self.symptoms.is_empty() || self.result.is_some()
    }

    pub fn client(&self) -> &HealthClient<T> {
        &self.client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use healthchat_api::Endpoint;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    struct OfflineTransport;

    #[async_trait]
    impl Transport for OfflineTransport {
        async fn post_json(&self, _endpoint: &Endpoint, _body: Value) -> Result<Value, ApiError> {
            Err(ApiError::Network("offline".to_string()))
        }
    }

    fn session() -> SymptomSession<OfflineTransport> {
        SymptomSession::new(HealthClient::new(OfflineTransport))
    }

    fn analysis(text: &str) -> AnalysisResult {
        AnalysisResult {
            analysis_text: text.to_string(),
            disclaimer_text: "Not medical advice.".to_string(),
        }
    }

    #[test]
    fn test_add_symptom_rejects_duplicates() {
        let mut session = session();
        assert!(session.add_symptom("fever"));
        assert!(!session.add_symptom("fever"));
        assert!(!session.add_symptom(" fever "));
        assert_eq!(session.symptoms(), &["fever".to_string()]);
    }

    #[test]
    fn test_add_symptom_trims_and_keeps_case() {
        let mut session = session();
        assert!(session.add_symptom(" cough "));
        assert!(session.add_symptom("Cough"));
        assert!(!session.add_symptom("   "));
        assert_eq!(session.symptoms(), &["cough".to_string(), "Cough".to_string()]);
    }

    #[test]
    fn test_remove_symptom() {
        let mut session = session();
        session.add_symptom("fever");
        session.add_symptom("cough");

        assert!(session.remove_symptom("fever"));
        assert!(!session.remove_symptom("fever"));
        assert_eq!(session.symptoms(), &["cough".to_string()]);
    }

    #[test]
    fn test_add_draft_clears_only_on_success() {
        let mut session = session();
        session.set_draft("  nausea ");
        assert!(session.add_draft());
        assert_eq!(session.draft(), "");

        session.set_draft("nausea");
        assert!(!session.add_draft());
        assert_eq!(session.draft(), "nausea");
    }

    #[test]
    fn test_begin_analysis_requires_symptoms() {
        let mut session = session();
        assert_eq!(session.begin_analysis(), Err(SessionError::NoSymptoms));
        assert_eq!(session.last_error(), Some("Please add at least one symptom"));
        assert!(!session.is_pending());
    }

    #[test]
    fn test_begin_analysis_clears_previous_state() {
        let mut session = session();
        session.add_symptom("headache");
        session.begin_analysis().unwrap();
        session.finish_analysis(Ok(analysis("first")));
        assert!(session.result().is_some());

        let request = session.begin_analysis().unwrap().unwrap();
        assert_eq!(request.symptoms, vec!["headache".to_string()]);
        assert!(session.result().is_none());
        assert!(session.is_pending());
        assert!(!session.can_analyze());
        assert_eq!(session.begin_analysis(), Ok(None));
    }

    #[test]
    fn test_reset_while_pending_drops_late_result() {
        let mut session = session();
        session.add_symptom("headache");
        session.begin_analysis().unwrap();

        session.reset();
        assert_eq!(session.finish_analysis(Ok(analysis("late"))), AnalyzeOutcome::Ignored);
        assert!(session.result().is_none());
        assert!(!session.is_pending());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = session();
        session.add_symptom("rash");
        session.set_draft("itch");
        session.begin_analysis().unwrap();
        session.finish_analysis(Err(ApiError::Network("boom".to_string())));
        assert!(session.can_reset());

        session.reset();
        assert!(session.symptoms().is_empty());
        assert_eq!(session.draft(), "");
        assert!(session.result().is_none());
        assert_eq!(session.last_error(), None);
        assert!(!session.can_reset());
    }
}
