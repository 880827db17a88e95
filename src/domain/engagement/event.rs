//! Analytics events.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{AnalyticsEventId, AssessmentId, Timestamp, ValidationError};

use super::ClientMetadata;

/// Emitted after a submission has been analyzed.
pub const ASSESSMENT_COMPLETED: &str = "assessment_completed";

/// Emitted after an email subscription request.
pub const EMAIL_SUBSCRIBED: &str = "email_subscribed";

/// Event payload: keys mapped to strings, numbers, booleans, or null.
pub type EventPayload = Map<String, Value>;

/// A named engagement signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementEvent {
    pub id: AnalyticsEventId,
    pub event_type: String,
    pub payload: EventPayload,
    pub assessment_id: Option<AssessmentId>,
    pub client: ClientMetadata,
    pub occurred_at: Timestamp,
}

impl EngagementEvent {
    /// # Errors
    ///
    /// - `EmptyField` if `event_type` is blank
    /// - `InvalidFormat` if a payload value is an object or array
    pub fn new(
        event_type: impl Into<String>,
        payload: EventPayload,
        client: ClientMetadata,
    ) -> Result<Self, ValidationError> {
        let event_type = event_type.into().trim().to_string();
        if event_type.is_empty() {
            return Err(ValidationError::empty_field("event_type"));
        }
        if let Some((key, _)) = payload
            .iter()
            .find(|(_, value)| value.is_object() || value.is_array())
        {
            return Err(ValidationError::invalid_format(
                "event_data",
                format!("value of '{}' must be a string, number, boolean, or null", key),
            ));
        }
        Ok(Self {
            id: AnalyticsEventId::new(),
            event_type,
            payload,
            assessment_id: None,
            client,
            occurred_at: Timestamp::now(),
        })
    }

    pub fn with_assessment(mut self, assessment_id: Option<AssessmentId>) -> Self {
        self.assessment_id = assessment_id;
        self
    }

    pub fn occurred_at(mut self, at: Timestamp) -> Self {
        self.occurred_at = at;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_event_type_is_rejected() {
        let result = EngagementEvent::new("  ", EventPayload::new(), ClientMetadata::default());
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn nested_payload_values_are_rejected() {
        for nested in [json!({"inner": 1}), json!([1, 2])] {
            let mut payload = EventPayload::new();
            payload.insert("flag".to_string(), json!(true));
            payload.insert("extra".to_string(), nested);

            let result = EngagementEvent::new("share", payload, ClientMetadata::default());

            assert!(matches!(
                result,
                Err(ValidationError::InvalidFormat { ref field, .. }) if field == "event_data"
            ));
        }
    }

    #[test]
    fn event_type_is_trimmed() {
        let event =
            EngagementEvent::new(" share_clicked ", EventPayload::new(), ClientMetadata::default()).unwrap();
        assert_eq!(event.event_type, "share_clicked");
        assert!(event.assessment_id.is_none());
    }

    #[test]
    fn builders_set_reference_and_time() {
        let mut payload = EventPayload::new();
        payload.insert("platform".to_string(), json!("linkedin"));
        let id = AssessmentId::new();
        let at = Timestamp::parse_rfc3339("2024-01-02T03:04:05Z").unwrap();

        let event = EngagementEvent::new("share", payload, ClientMetadata::default())
            .unwrap()
            .with_assessment(Some(id))
            .occurred_at(at);

        assert_eq!(event.assessment_id, Some(id));
        assert_eq!(event.occurred_at, at);
        assert_eq!(event.payload["platform"], "linkedin");
    }
}
