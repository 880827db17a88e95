//! Assessment session aggregate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::catalog::{Question, QuestionCatalog};
use crate::domain::foundation::{AssessmentId, StateMachine, Timestamp};
use crate::domain::personality::PersonalityAnalysis;

use super::{
    Answer, Phase, SessionError, Submission, SubmissionMetadata, SubmissionReceipt,
    SubmittedAnswer,
};

/// One respondent's pass through the questionnaire.
///
/// # Invariants
///
/// - `position` is always within `[0, question_count - 1]`
/// - at most one answer per question id; answers only reference catalog ids
/// - `result` is present iff the phase is `Complete`
/// - every rejected operation leaves the session unchanged
///
/// Deserialization goes through [`AssessmentSession::validated`], so a
/// snapshot that breaks any of these is rejected rather than loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct AssessmentSession {
    position: usize,
    answers: BTreeMap<String, Answer>,
    phase: Phase,
    email: Option<String>,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    result: Option<PersonalityAnalysis>,
    assessment_id: Option<AssessmentId>,
}

/// Wire shape of a stored session, checked before it becomes one.
#[derive(Deserialize)]
struct SessionSnapshot {
    position: usize,
    answers: BTreeMap<String, Answer>,
    phase: Phase,
    email: Option<String>,
    started_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    result: Option<PersonalityAnalysis>,
    assessment_id: Option<AssessmentId>,
}

impl TryFrom<SessionSnapshot> for AssessmentSession {
    type Error = SessionError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self, Self::Error> {
        AssessmentSession {
            position: snapshot.position,
            answers: snapshot.answers,
            phase: snapshot.phase,
            email: snapshot.email,
            started_at: snapshot.started_at,
            completed_at: snapshot.completed_at,
            result: snapshot.result,
            assessment_id: snapshot.assessment_id,
        }
        .validated()
    }
}

impl AssessmentSession {
    /// Creates an idle session.
    pub fn new() -> Self {
        Self::default()
    }

    fn catalog() -> &'static QuestionCatalog {
        QuestionCatalog::standard()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Accessors
    // ════════════════════════════════════════════════════════════════════════════

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn started_at(&self) -> Option<&Timestamp> {
        self.started_at.as_ref()
    }

    pub fn completed_at(&self) -> Option<&Timestamp> {
        self.completed_at.as_ref()
    }

    pub fn result(&self) -> Option<&PersonalityAnalysis> {
        self.result.as_ref()
    }

    /// Opaque record id returned by the last successful submission, if it was stored.
    pub fn assessment_id(&self) -> Option<&AssessmentId> {
        self.assessment_id.as_ref()
    }

    pub fn answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        Self::catalog().question_at(self.position)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Derived queries
    // ════════════════════════════════════════════════════════════════════════════

    fn last_position(&self) -> usize {
        Self::catalog().len().saturating_sub(1)
    }

    fn current_is_answered(&self) -> bool {
        self.current_question()
            .map(|q| self.answers.contains_key(q.id))
            .unwrap_or(false)
    }

    /// True when the current question is answered and there is a next one.
    pub fn can_advance(&self) -> bool {
        self.current_is_answered() && self.position < self.last_position()
    }

    pub fn can_retreat(&self) -> bool {
        self.position > 0
    }

    /// Answered share of the catalog, as a percentage.
    pub fn progress(&self) -> f64 {
        let total = Self::catalog().len();
        if total == 0 {
            return 0.0;
        }
        (self.answers.len() as f64 / total as f64) * 100.0
    }

    /// True iff every catalog question has exactly one answer.
    pub fn is_submittable(&self) -> bool {
        self.answers.len() == Self::catalog().len()
            && Self::catalog().covers_exactly(self.answers.keys().map(String::as_str))
    }

    /// Checks the aggregate invariants against the current catalog.
    ///
    /// # Errors
    ///
    /// - `InvalidSnapshot` naming the first broken invariant
    pub fn validated(self) -> Result<Self, SessionError> {
        let catalog = Self::catalog();
        if self.position > self.last_position() {
            return Err(SessionError::invalid_snapshot(format!(
                "position {} outside 0..={}",
                self.position,
                self.last_position()
            )));
        }
        for (key, answer) in &self.answers {
            if key != &answer.question_id {
                return Err(SessionError::invalid_snapshot(format!(
                    "answer stored under '{}' is for '{}'",
                    key, answer.question_id
                )));
            }
            let question = catalog.question_by_id(key).ok_or_else(|| {
                SessionError::invalid_snapshot(format!("unknown question '{}'", key))
            })?;
            if question.option(&answer.option_id).is_none() {
                return Err(SessionError::invalid_snapshot(format!(
                    "unknown option '{}' for question '{}'",
                    answer.option_id, key
                )));
            }
        }
        if (self.phase == Phase::Complete) != self.result.is_some() {
            return Err(SessionError::invalid_snapshot(format!(
                "{} session {} a result",
                self.phase,
                if self.result.is_some() { "carries" } else { "lacks" }
            )));
        }
        Ok(self)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Operations
    // ════════════════════════════════════════════════════════════════════════════

    /// Starts (or restarts) the questionnaire from the first question.
    ///
    /// # Errors
    ///
    /// - `SubmissionInFlight` while a submission is being analyzed
    pub fn start(&mut self) -> Result<(), SessionError> {
        if self.phase == Phase::Analyzing {
            return Err(SessionError::SubmissionInFlight);
        }
        let phase = self
            .phase
            .transition_to(Phase::Active)
            .map_err(|_| SessionError::invalid_phase("start", self.phase))?;

        self.position = 0;
        self.answers.clear();
        self.phase = phase;
        self.started_at = Some(Timestamp::now());
        self.completed_at = None;
        self.result = None;
        self.assessment_id = None;
        Ok(())
    }

    /// Records (or replaces) the answer for a question. Does not move the cursor.
    pub fn answer(&mut self, question_id: &str, option_id: &str) -> Result<(), SessionError> {
        if self.phase != Phase::Active {
            return Err(SessionError::invalid_phase("answer", self.phase));
        }
        let question = Self::catalog()
            .question_by_id(question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;
        if question.option(option_id).is_none() {
            return Err(SessionError::UnknownOption {
                question_id: question_id.to_string(),
                option_id: option_id.to_string(),
            });
        }

        self.answers
            .insert(question.id.to_string(), Answer::new(question.id, option_id));
        Ok(())
    }

    /// Moves to the next question. Stays put on the last one.
    ///
    /// Returns the new position.
    pub fn advance(&mut self) -> Result<usize, SessionError> {
        if !self.current_is_answered() {
            return Err(SessionError::CurrentQuestionUnanswered);
        }
        self.position = (self.position + 1).min(self.last_position());
        Ok(self.position)
    }

    /// Moves to the previous question. Returns false at the first one.
    pub fn retreat(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = Some(email.into());
    }

    /// Enters `Analyzing` and builds the outgoing submission.
    ///
    /// Answers are emitted in catalog order. A provided email replaces any
    /// captured one.
    ///
    /// # Errors
    ///
    /// - `SubmissionInFlight` if already analyzing
    /// - `InvalidPhase` outside `Active`
    /// - `Incomplete` unless every question is answered
    pub fn begin_submission(&mut self, email: Option<String>) -> Result<Submission, SessionError> {
        match self.phase {
            Phase::Analyzing => return Err(SessionError::SubmissionInFlight),
            Phase::Active => {}
            other => return Err(SessionError::invalid_phase("submit", other)),
        }
        if !self.is_submittable() {
            return Err(SessionError::Incomplete {
                answered: self.answers.len(),
                required: Self::catalog().len(),
            });
        }

        let answers = Self::catalog()
            .all_questions()
            .iter()
            .filter_map(|q| self.answers.get(q.id))
            .map(|a| SubmittedAnswer::new(a.question_id.clone(), a.option_id.clone()))
            .collect();

        if let Some(email) = email {
            self.email = Some(email);
        }
        self.phase = Phase::Analyzing;

        let submission = Submission {
            answers,
            email: self.email.clone(),
            metadata: SubmissionMetadata {
                user_agent: None,
                start_time: self.started_at,
                completion_time: Some(Timestamp::now()),
            },
        };
        Ok(submission)
    }

    /// Stores the result of the in-flight submission and completes the session.
    pub fn complete_submission(&mut self, receipt: SubmissionReceipt) -> Result<(), SessionError> {
        let phase = self
            .phase
            .transition_to(Phase::Complete)
            .map_err(|_| SessionError::invalid_phase("complete submission", self.phase))?;

        self.phase = phase;
        self.result = Some(receipt.analysis);
        self.assessment_id = receipt.assessment_id;
        self.completed_at = Some(Timestamp::now());
        Ok(())
    }

    /// Returns to `Active` after a failed submission. Answers are kept.
    pub fn abort_submission(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Analyzing {
            return Err(SessionError::invalid_phase("abort submission", self.phase));
        }
        self.phase = Phase::Active;
        Ok(())
    }

    /// Discards everything and returns to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::QuestionCatalog;
    use crate::domain::foundation::ErrorCode;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn question_ids() -> Vec<&'static str> {
        QuestionCatalog::standard()
            .all_questions()
            .iter()
            .map(|q| q.id)
            .collect()
    }

    fn started() -> AssessmentSession {
        let mut session = AssessmentSession::new();
        session.start().unwrap();
        session
    }

    fn answer_all_first_options(session: &mut AssessmentSession) {
        for question in QuestionCatalog::standard().all_questions() {
            session.answer(question.id, question.options[0].id).unwrap();
        }
    }

    fn tampered(session: &AssessmentSession, from: &str, to: &str) -> String {
        let yaml = serde_yaml::to_string(session).unwrap();
        assert!(yaml.contains(from), "{} not found in {}", from, yaml);
        yaml.replace(from, to)
    }

    #[test]
    fn snapshot_with_position_past_catalog_is_rejected() {
        let yaml = tampered(&started(), "position: 0", "position: 42");

        let result = serde_yaml::from_str::<AssessmentSession>(&yaml);

        assert!(result.is_err());
        let mut session = started();
        session.position = 42;
        let err = session.validated().unwrap_err();
        assert!(matches!(err, SessionError::InvalidSnapshot(_)));
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[test]
    fn snapshot_with_unknown_option_is_rejected() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        let yaml = tampered(&session, "option_id: q1_a", "option_id: q1_z");

        assert!(serde_yaml::from_str::<AssessmentSession>(&yaml).is_err());
    }

    #[test]
    fn snapshot_with_unknown_question_is_rejected() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        let yaml = tampered(&session, "q1_energy", "q9_gone");

        assert!(serde_yaml::from_str::<AssessmentSession>(&yaml).is_err());
    }

    #[test]
    fn snapshot_with_mismatched_answer_key_is_rejected() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        let yaml = tampered(&session, "question_id: q1_energy", "question_id: q2_information");

        assert!(serde_yaml::from_str::<AssessmentSession>(&yaml).is_err());
    }

    #[test]
    fn complete_snapshot_without_result_is_rejected() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.begin_submission(None).unwrap();
        session.complete_submission(receipt()).unwrap();

        let mut stripped = session.clone();
        stripped.result = None;
        assert!(stripped.validated().is_err());

        let mut active_with_result = session;
        active_with_result.phase = Phase::Active;
        assert!(active_with_result.validated().is_err());
    }

    #[test]
    fn valid_snapshot_round_trips() {
        let mut session = started();
        session.answer("q1_energy", "q1_b").unwrap();

        let yaml = serde_yaml::to_string(&session).unwrap();
        let loaded: AssessmentSession = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(loaded, session);
    }

    fn receipt() -> SubmissionReceipt {
        SubmissionReceipt {
            assessment_id: Some(AssessmentId::new()),
            analysis: PersonalityAnalysis::fallback(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Start / answer
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn new_session_is_idle_and_empty() {
        let session = AssessmentSession::new();
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.position(), 0);
        assert_eq!(session.answered_count(), 0);
        assert!(!session.is_submittable());
    }

    #[test]
    fn start_activates_and_records_start_time() {
        let session = started();
        assert_eq!(session.phase(), Phase::Active);
        assert!(session.started_at().is_some());
        assert_eq!(session.current_question().map(|q| q.id), Some("q1_energy"));
    }

    #[test]
    fn restart_overwrites_progress() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        session.advance().unwrap();

        session.start().unwrap();

        assert_eq!(session.position(), 0);
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn answer_requires_active_phase() {
        let mut session = AssessmentSession::new();
        let err = session.answer("q1_energy", "q1_a").unwrap_err();
        assert!(matches!(err, SessionError::InvalidPhase { phase: Phase::Idle, .. }));
        assert_eq!(session.answered_count(), 0);
    }

    #[test]
    fn answer_rejects_unknown_ids_without_mutation() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        let before = session.clone();

        assert!(matches!(
            session.answer("q9_unknown", "q9_a"),
            Err(SessionError::UnknownQuestion(_))
        ));
        assert!(matches!(
            session.answer("q1_energy", "q2_a"),
            Err(SessionError::UnknownOption { .. })
        ));
        assert_eq!(session, before);
    }

    #[test]
    fn second_answer_replaces_first() {
        let mut session = started();
        session.answer("q3_decisions", "q3_a").unwrap();
        session.answer("q3_decisions", "q3_d").unwrap();

        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.answer_for("q3_decisions").unwrap().option_id, "q3_d");
    }

    #[test]
    fn answer_does_not_move_cursor() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        assert_eq!(session.position(), 0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Navigation
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn advance_without_answer_is_rejected_and_state_unchanged() {
        let mut session = started();
        let before = session.clone();
        assert_eq!(session.advance(), Err(SessionError::CurrentQuestionUnanswered));
        assert_eq!(session, before);
    }

    #[test]
    fn advance_after_answer_moves_forward() {
        let mut session = started();
        session.answer("q1_energy", "q1_b").unwrap();
        assert!(session.can_advance());
        assert_eq!(session.advance(), Ok(1));
        assert_eq!(session.current_question().map(|q| q.id), Some("q2_information"));
    }

    #[test]
    fn advance_clamps_at_last_question() {
        let mut session = started();
        answer_all_first_options(&mut session);
        for _ in 0..10 {
            session.advance().unwrap();
        }
        assert_eq!(session.position(), 5);
        assert!(!session.can_advance());
    }

    #[test]
    fn retreat_from_first_question_is_noop() {
        let mut session = started();
        assert!(!session.can_retreat());
        assert!(!session.retreat());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn retreat_needs_no_answer() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        session.advance().unwrap();
        assert!(session.can_retreat());
        assert!(session.retreat());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn progress_counts_answers_not_position() {
        let mut session = started();
        assert_eq!(session.progress(), 0.0);
        session.answer("q4_structure", "q4_a").unwrap();
        session.answer("q6_stress", "q6_a").unwrap();
        assert!((session.progress() - 100.0 / 3.0).abs() < 1e-9);
        answer_all_first_options(&mut session);
        assert_eq!(session.progress(), 100.0);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Submission lifecycle
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn begin_submission_requires_all_answers() {
        let mut session = started();
        session.answer("q1_energy", "q1_a").unwrap();
        let err = session.begin_submission(None).unwrap_err();
        assert_eq!(err, SessionError::Incomplete { answered: 1, required: 6 });
        assert_eq!(session.phase(), Phase::Active);
    }

    #[test]
    fn begin_submission_emits_answers_in_catalog_order() {
        let mut session = started();
        for question in QuestionCatalog::standard().all_questions().iter().rev() {
            session.answer(question.id, question.options[1].id).unwrap();
        }

        let submission = session.begin_submission(Some("a@b.co".to_string())).unwrap();

        let ids: Vec<&str> = submission.answers.iter().map(|a| a.question_id.as_str()).collect();
        assert_eq!(ids, question_ids());
        assert_eq!(submission.email.as_deref(), Some("a@b.co"));
        assert!(submission.metadata.start_time.is_some());
        assert!(submission.metadata.completion_time.is_some());
        assert_eq!(session.phase(), Phase::Analyzing);
    }

    #[test]
    fn second_submission_while_analyzing_is_rejected() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.begin_submission(None).unwrap();

        assert_eq!(session.begin_submission(None), Err(SessionError::SubmissionInFlight));
        assert_eq!(session.start(), Err(SessionError::SubmissionInFlight));
        assert_eq!(session.phase(), Phase::Analyzing);
    }

    #[test]
    fn answers_are_frozen_while_analyzing() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.begin_submission(None).unwrap();
        assert!(session.answer("q1_energy", "q1_b").is_err());
    }

    #[test]
    fn complete_submission_stores_result_and_id() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.begin_submission(None).unwrap();
        let receipt = receipt();
        let id = receipt.assessment_id;

        session.complete_submission(receipt).unwrap();

        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.assessment_id().copied(), id);
        assert!(session.result().is_some());
        assert!(session.completed_at().is_some());
    }

    #[test]
    fn complete_submission_without_record_id_is_valid() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.begin_submission(None).unwrap();

        session
            .complete_submission(SubmissionReceipt {
                assessment_id: None,
                analysis: PersonalityAnalysis::fallback(),
            })
            .unwrap();

        assert_eq!(session.phase(), Phase::Complete);
        assert!(session.assessment_id().is_none());
    }

    #[test]
    fn complete_submission_outside_analyzing_is_rejected() {
        let mut session = started();
        assert!(session.complete_submission(receipt()).is_err());
        assert!(session.result().is_none());
    }

    #[test]
    fn abort_submission_returns_to_active_with_answers() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.begin_submission(None).unwrap();

        session.abort_submission().unwrap();

        assert_eq!(session.phase(), Phase::Active);
        assert!(session.is_submittable());
    }

    #[test]
    fn reset_after_complete_returns_to_idle() {
        let mut session = started();
        answer_all_first_options(&mut session);
        session.set_email("someone@example.com");
        session.begin_submission(None).unwrap();
        session.complete_submission(receipt()).unwrap();

        session.reset();

        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.position(), 0);
        assert_eq!(session.answered_count(), 0);
        assert!(session.email().is_none());
        assert!(session.result().is_none());
        assert!(!session.is_submittable());
    }

    #[test]
    fn session_snapshot_survives_serde() {
        let mut session = started();
        session.answer("q2_information", "q2_c").unwrap();
        let yaml = serde_yaml::to_string(&session).unwrap();
        let restored: AssessmentSession = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(restored, session);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Properties
    // ════════════════════════════════════════════════════════════════════════════

    /// (question index, option index); indices past the catalog produce unknown ids.
    fn arb_answer() -> impl Strategy<Value = (usize, usize)> {
        (0usize..8, 0usize..5)
    }

    fn ids_for(question: usize, option: usize) -> (String, String) {
        let catalog = QuestionCatalog::standard();
        match catalog.question_at(question) {
            Some(q) => {
                let option_id = q
                    .options
                    .get(option)
                    .map(|o| o.id.to_string())
                    .unwrap_or_else(|| format!("{}_z", q.id));
                (q.id.to_string(), option_id)
            }
            None => (format!("q{}_unknown", question + 1), "x".to_string()),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Submittable iff the answered id set equals the catalog id set.
        #[test]
        fn prop_submittable_iff_full_coverage(answers in prop::collection::vec(arb_answer(), 0..20)) {
            let mut session = started();
            let mut expected: BTreeSet<String> = BTreeSet::new();

            for (q, o) in answers {
                let (question_id, option_id) = ids_for(q, o);
                if session.answer(&question_id, &option_id).is_ok() {
                    expected.insert(question_id);
                }
            }

            let all: BTreeSet<String> = question_ids().into_iter().map(String::from).collect();
            prop_assert_eq!(session.is_submittable(), expected == all);
            prop_assert_eq!(session.answered_count(), expected.len());
        }

        /// Answering the same question twice keeps one answer holding the second option.
        #[test]
        fn prop_answer_replacement(q in 0usize..6, first in 0usize..4, second in 0usize..4) {
            let mut session = started();
            let (question_id, first_option) = ids_for(q, first);
            let (_, second_option) = ids_for(q, second);

            session.answer(&question_id, &first_option).unwrap();
            session.answer(&question_id, &second_option).unwrap();

            prop_assert_eq!(session.answered_count(), 1);
            prop_assert_eq!(&session.answer_for(&question_id).unwrap().option_id, &second_option);
        }

        /// The cursor never leaves the catalog bounds.
        #[test]
        fn prop_position_stays_in_bounds(moves in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut session = started();
            answer_all_first_options(&mut session);

            for forward in moves {
                if forward {
                    let _ = session.advance();
                } else {
                    session.retreat();
                }
                prop_assert!(session.position() <= 5);
            }
        }
    }
}
