//! Assessment session lifecycle.
//!
//! An [`AssessmentSession`] belongs to one respondent. It tracks the cursor
//! over the question catalog, the answers collected so far and the phase of
//! the session. Submitting hands a [`Submission`] to whatever carries it to
//! the analysis service and later accepts the [`SubmissionReceipt`].

mod answer;
mod errors;
mod phase;
mod session;
mod submission;

pub use answer::Answer;
pub use errors::SessionError;
pub use phase::Phase;
pub use session::AssessmentSession;
pub use submission::{Submission, SubmissionMetadata, SubmissionReceipt, SubmittedAnswer};
