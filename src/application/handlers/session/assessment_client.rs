//! AssessmentClient - owns one session and carries it through submission.
//!
//! The session state machine is synchronous; this wrapper adds the gateway
//! round trip and snapshot persistence at lifecycle boundaries (start,
//! completed submission, reset). Snapshot failures are logged and never
//! block the respondent.

use std::sync::Arc;

use crate::domain::assessment::{AssessmentSession, Phase, SessionError};
use crate::domain::catalog::Question;
use crate::domain::personality::PersonalityAnalysis;
use crate::ports::{AssessmentGateway, GatewayError, SessionStore};

/// Errors returned by client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Session(#[from] SessionError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

struct Snapshots {
    store: Arc<dyn SessionStore>,
    key: String,
}

pub struct AssessmentClient {
    session: AssessmentSession,
    gateway: Arc<dyn AssessmentGateway>,
    snapshots: Option<Snapshots>,
    user_agent: Option<String>,
}

impl AssessmentClient {
    /// A client with a fresh idle session and no persistence.
    pub fn new(gateway: Arc<dyn AssessmentGateway>) -> Self {
        Self {
            session: AssessmentSession::new(),
            gateway,
            snapshots: None,
            user_agent: None,
        }
    }

    /// Resumes the session saved under `key`, or starts fresh if there is none.
    ///
    /// A snapshot taken mid-submission is returned to `Active`; the request it
    /// belonged to is gone. A snapshot that fails validation is discarded like
    /// an unreadable one.
    pub async fn restore(
        gateway: Arc<dyn AssessmentGateway>,
        store: Arc<dyn SessionStore>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let loaded = match store.load(&key).await {
            Ok(Some(session)) => session.validated().map(Some).map_err(|e| e.to_string()),
            Ok(None) => Ok(None),
            Err(err) => Err(err.to_string()),
        };
        let mut session = match loaded {
            Ok(session) => session.unwrap_or_default(),
            Err(reason) => {
                tracing::warn!(error = %reason, key = %key, "Discarding unreadable session snapshot");
                AssessmentSession::new()
            }
        };
        if session.phase() == Phase::Analyzing {
            // Only fails outside Analyzing
            let _ = session.abort_submission();
        }

        Self {
            session,
            gateway,
            snapshots: Some(Snapshots { store, key }),
            user_agent: None,
        }
    }

    /// User agent reported with submissions.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        self.session.current_question()
    }

    pub async fn start(&mut self) -> Result<(), ClientError> {
        self.session.start()?;
        self.save().await;
        Ok(())
    }

    pub fn answer(&mut self, question_id: &str, option_id: &str) -> Result<(), ClientError> {
        Ok(self.session.answer(question_id, option_id)?)
    }

    pub fn advance(&mut self) -> Result<usize, ClientError> {
        Ok(self.session.advance()?)
    }

    pub fn retreat(&mut self) -> bool {
        self.session.retreat()
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.session.set_email(email);
    }

    /// Submits the answers and waits for the analysis.
    ///
    /// On a gateway failure the session returns to `Active` with its answers
    /// intact and the error is returned for display.
    pub async fn submit(
        &mut self,
        email: Option<String>,
    ) -> Result<PersonalityAnalysis, ClientError> {
        // 1. Enter Analyzing; rejects double submits and incomplete sessions
        let mut submission = self.session.begin_submission(email)?;
        submission.metadata.user_agent = self.user_agent.clone();

        // 2. Round trip
        let receipt = match self.gateway.submit(submission).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(error = %err, "Assessment submission failed");
                self.session.abort_submission()?;
                return Err(err.into());
            }
        };

        // 3. Complete and persist
        let analysis = receipt.analysis.clone();
        self.session.complete_submission(receipt)?;
        self.save().await;

        Ok(analysis)
    }

    /// Drops an in-flight submission whose response will never be awaited.
    pub fn cancel_submission(&mut self) -> Result<(), ClientError> {
        Ok(self.session.abort_submission()?)
    }

    pub async fn reset(&mut self) {
        self.session.reset();
        self.save().await;
    }

    async fn save(&self) {
        let Some(snapshots) = &self.snapshots else {
            return;
        };
        if let Err(err) = snapshots.store.save(&snapshots.key, &self.session).await {
            tracing::warn!(error = %err, key = %snapshots.key, "Failed to save session snapshot");
        }
    }
}
