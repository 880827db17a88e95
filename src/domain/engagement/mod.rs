//! Engagement records: stored assessments, analytics events and email subscribers.
//!
//! These are write-once values produced by the service and handed to the
//! store. Nothing in the service reads them back.

mod client;
mod email;
mod event;
mod record;
mod subscriber;

pub use client::ClientMetadata;
pub use email::EmailAddress;
pub use event::{EngagementEvent, EventPayload, ASSESSMENT_COMPLETED, EMAIL_SUBSCRIBED};
pub use record::AssessmentRecord;
pub use subscriber::{EmailSubscriber, SubscriberStatus, SubscriptionSource};
