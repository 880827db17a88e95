//! Engagement handlers: assessment recording, email capture, event tracking.

mod engagement_recorder;
mod errors;
mod save_email;
mod subscribe_email;
mod track_event;

pub use engagement_recorder::{EngagementRecorder, RecordAssessmentCommand, RecordOutcome};
pub use errors::{EmailError, TrackEventError};
pub use save_email::{SaveEmailCommand, SaveEmailHandler, SaveEmailResult};
pub use subscribe_email::{SubscribeEmailCommand, SubscribeEmailHandler, SubscribeEmailResult};
pub use track_event::{TrackEventCommand, TrackEventHandler, TrackEventResult};

use crate::domain::foundation::AssessmentId;

/// Parses a client-supplied assessment reference. Unparseable ids are dropped.
fn parse_assessment_ref(raw: Option<&str>) -> Option<AssessmentId> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(assessment_id = raw, "Ignoring malformed assessment reference");
            None
        }
    }
}
