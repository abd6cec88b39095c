//! Shared data models.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Organizer recorded when the request leaves it blank.
pub const DEFAULT_ORGANIZER: &str = "Anonymous";

/// A persisted event announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub organizer: String,
    pub created_at: String,
}

/// Create event request payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateEventRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub description: Option<String>,
    #[validate(required, length(min = 1))]
    pub date: Option<String>,
    #[validate(required, length(min = 1))]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
}

/// Create event response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEventResponse {
    pub message: String,
    pub event: Event,
}

/// Subscribe request payload.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
}

/// Subscribe response payload.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeResponse {
    pub message: String,
    pub subscription_arn: String,
}

/// Plain message body used for preflight and error responses.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}
