//! Event operations: validate, act, return.
//!
//! These functions know nothing about HTTP. The route table in
//! [`crate::routes`] adapts them to API Gateway requests.

use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::context::AppContext;
use crate::dates;
use crate::models::{CreateEventRequest, Event, SubscribeResponse, DEFAULT_ORGANIZER};
use crate::{Error, Result};

/// Message returned when a create request lacks a required field.
pub const MISSING_FIELDS: &str = "Missing required fields: title, description, date, location";

/// Message returned for a malformed email.
pub const INVALID_EMAIL: &str = "Invalid email address provided";

/// Acknowledgment returned once a subscription is requested.
pub const SUBSCRIPTION_PENDING: &str =
    "Subscription pending. Please check your email to confirm subscription.";

/// SNS subjects must be shorter than 100 characters.
const MAX_SUBJECT_CHARS: usize = 99;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Minimal `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// New opaque event identifier backed by a v4 UUID.
pub fn generate_event_id() -> String {
    format!("evt_{}", Uuid::new_v4().simple())
}

/// Validate, persist and announce a new event.
///
/// The record is written before the notification is published. If the
/// publish fails the record stays in the table.
pub async fn create_event(ctx: &AppContext, request: CreateEventRequest) -> Result<Event> {
    if request.validate().is_err() {
        return Err(Error::Validation(MISSING_FIELDS.to_string()));
    }

    let organizer = request
        .organizer
        .filter(|o| !o.is_empty())
        .unwrap_or_else(|| DEFAULT_ORGANIZER.to_string());

    let event = Event {
        id: generate_event_id(),
        title: request.title.unwrap_or_default(),
        description: request.description.unwrap_or_default(),
        date: request.date.unwrap_or_default(),
        location: request.location.unwrap_or_default(),
        organizer,
        created_at: dates::timestamp(Utc::now()),
    };

    if let Err(e) = ctx.store.put(&event).await {
        error!(error = %e, "Failed to store event");
        return Err(e);
    }

    info!(event_id = %event.id, "Stored event");

    let (subject, message) = compose_notification(&event);
    if let Err(e) = ctx.notifier.publish(&subject, &message).await {
        error!(error = %e, "Failed to publish event notification");
        warn!(
            event_id = %event.id,
            error = %e,
            "Event stored but notification was not published"
        );
        return Err(e);
    }

    info!(event_id = %event.id, "Published event notification");
    Ok(event)
}

/// Subject and body of the announcement sent to subscribers.
pub fn compose_notification(event: &Event) -> (String, String) {
    let subject: String = format!("New Event: {}", event.title)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(MAX_SUBJECT_CHARS)
        .collect();

    let message = format!(
        "New Event: {title}\n\nDate: {date}\nLocation: {location}\n\n{description}\n\nOrganized by: {organizer}\n",
        title = event.title,
        date = dates::format_short(&event.date),
        location = event.location,
        description = event.description,
        organizer = event.organizer,
    );

    (subject, message)
}

/// All events, newest first, optionally limited to dates `>= from_date`.
pub async fn list_events(ctx: &AppContext, from_date: Option<&str>) -> Result<Vec<Event>> {
    let from_date = from_date.filter(|d| !d.is_empty());

    let mut events = ctx.store.scan(from_date).await.map_err(|e| {
        error!(error = %e, "Failed to retrieve events");
        e
    })?;

    events.sort_by(|a, b| dates::newest_first(&a.date, &b.date));
    Ok(events)
}

/// Register an email address with the notification topic.
pub async fn subscribe(ctx: &AppContext, email: Option<&str>) -> Result<SubscribeResponse> {
    let email = match email {
        Some(email) if is_valid_email(email) => email,
        _ => return Err(Error::Validation(INVALID_EMAIL.to_string())),
    };

    let subscription_arn = ctx.notifier.subscribe_email(email).await.map_err(|e| {
        error!(error = %e, "Failed to subscribe user");
        e
    })?;

    info!(subscription = %subscription_arn, "Subscription requested");

    Ok(SubscribeResponse {
        message: SUBSCRIPTION_PENDING.to_string(),
        subscription_arn,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use crate::store::MemoryEventStore;
    use chrono::DateTime;
    use std::sync::Arc;

    fn context() -> (AppContext, Arc<MemoryEventStore>, Arc<MemoryNotifier>) {
        let store = Arc::new(MemoryEventStore::new());
        let notifier = Arc::new(MemoryNotifier::new());
        (AppContext::new(store.clone(), notifier.clone()), store, notifier)
    }

    fn meetup() -> CreateEventRequest {
        CreateEventRequest {
            title: Some("Meetup".to_string()),
            description: Some("Talk".to_string()),
            date: Some("2025-03-01T18:00:00Z".to_string()),
            location: Some("Hall A".to_string()),
            organizer: None,
        }
    }

    fn stored(id: &str, date: &str) -> Event {
        Event {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            date: date.to_string(),
            location: String::new(),
            organizer: DEFAULT_ORGANIZER.to_string(),
            created_at: String::new(),
        }
    }

    #[tokio::test]
    async fn test_create_event_echoes_fields() {
        let (ctx, store, notifier) = context();
        let mut request = meetup();
        request.organizer = Some("Grace".to_string());

        let event = create_event(&ctx, request).await.unwrap();

        assert!(event.id.starts_with("evt_"));
        assert_eq!(event.title, "Meetup");
        assert_eq!(event.description, "Talk");
        assert_eq!(event.date, "2025-03-01T18:00:00Z");
        assert_eq!(event.location, "Hall A");
        assert_eq!(event.organizer, "Grace");
        assert!(DateTime::parse_from_rfc3339(&event.created_at).is_ok());
        assert_eq!(store.events(), vec![event]);
        assert_eq!(notifier.published().len(), 1);
    }

    #[tokio::test]
    async fn test_create_event_defaults_organizer() {
        let (ctx, _, _) = context();
        let event = create_event(&ctx, meetup()).await.unwrap();
        assert_eq!(event.organizer, "Anonymous");

        let mut request = meetup();
        request.organizer = Some(String::new());
        let event = create_event(&ctx, request).await.unwrap();
        assert_eq!(event.organizer, "Anonymous");
    }

    #[tokio::test]
    async fn test_create_event_missing_fields() {
        let cases: [fn(&mut CreateEventRequest); 4] = [
            |r: &mut CreateEventRequest| r.title = None,
            |r: &mut CreateEventRequest| r.description = None,
            |r: &mut CreateEventRequest| r.date = Some(String::new()),
            |r: &mut CreateEventRequest| r.location = None,
        ];

        for strip in cases {
            let (ctx, store, notifier) = context();
            let mut request = meetup();
            strip(&mut request);

            let err = create_event(&ctx, request).await.unwrap_err();
            assert!(matches!(err, Error::Validation(ref m) if m == MISSING_FIELDS));
            assert!(store.events().is_empty());
            assert!(notifier.published().is_empty());
        }
    }

    #[tokio::test]
    async fn test_create_event_twice_gives_distinct_ids() {
        let (ctx, store, _) = context();
        let first = create_event(&ctx, meetup()).await.unwrap();
        let second = create_event(&ctx, meetup()).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.events().len(), 2);
    }

    #[tokio::test]
    async fn test_create_event_store_failure_skips_publish() {
        let (ctx, store, notifier) = context();
        store.fail_puts(true);

        let err = create_event(&ctx, meetup()).await.unwrap_err();
        assert!(matches!(err, Error::Store(_)));
        assert!(notifier.published().is_empty());
    }

    #[tokio::test]
    async fn test_create_event_publish_failure_keeps_record() {
        let (ctx, store, notifier) = context();
        notifier.fail_publish(true);

        let err = create_event(&ctx, meetup()).await.unwrap_err();
        assert!(matches!(err, Error::Notification(_)));
        assert_eq!(store.events().len(), 1);
    }

    #[test]
    fn test_compose_notification() {
        let mut event = stored("evt_1", "2025-03-01T18:00:00Z");
        event.title = "Meetup".to_string();
        event.location = "Hall A".to_string();
        event.description = "Talk".to_string();

        let (subject, message) = compose_notification(&event);
        assert_eq!(subject, "New Event: Meetup");
        assert!(message.contains("Date: 3/1/2025, 6:00:00 PM"));
        assert!(message.contains("Location: Hall A"));
        assert!(message.contains("\n\nTalk\n\n"));
        assert!(message.contains("Organized by: Anonymous"));
    }

    #[test]
    fn test_subject_is_truncated() {
        let mut event = stored("evt_1", "2025-03-01");
        event.title = "x".repeat(300);
        let (subject, _) = compose_notification(&event);
        assert_eq!(subject.chars().count(), 99);
        assert!(subject.starts_with("New Event: xxx"));
    }

    #[tokio::test]
    async fn test_list_events_sorted_newest_first() {
        let store = Arc::new(MemoryEventStore::with_events(vec![
            stored("jan", "2024-01-01"),
            stored("jun", "2024-06-01"),
            stored("dec", "2023-12-01"),
        ]));
        let ctx = AppContext::new(store, Arc::new(MemoryNotifier::new()));

        let ids: Vec<String> = list_events(&ctx, None)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["jun", "jan", "dec"]);

        let ids: Vec<String> = list_events(&ctx, Some("2024-01-01"))
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["jun", "jan"]);
    }

    #[tokio::test]
    async fn test_list_events_empty_filter_ignored() {
        let store = Arc::new(MemoryEventStore::with_events(vec![stored("a", "2023-01-01")]));
        let ctx = AppContext::new(store, Arc::new(MemoryNotifier::new()));
        assert_eq!(list_events(&ctx, Some("")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_events_store_failure() {
        let (ctx, store, _) = context();
        store.fail_scans(true);
        assert!(matches!(list_events(&ctx, None).await, Err(Error::Store(_))));
    }

    #[test]
    fn test_email_pattern() {
        for valid in ["x@y.z", "first.last@example.co.uk", "a+b@c.d", "a@b..c"] {
            assert!(is_valid_email(valid), "{valid} should be accepted");
        }
        for invalid in ["", "plain", "a@b", "a@.c", "a@b.", "a b@c.d", "a@@b.c", "@b.c"] {
            assert!(!is_valid_email(invalid), "{invalid} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_subscribe() {
        let (ctx, _, notifier) = context();
        let response = subscribe(&ctx, Some("x@y.z")).await.unwrap();

        assert_eq!(response.message, SUBSCRIPTION_PENDING);
        assert!(!response.subscription_arn.is_empty());
        assert_eq!(notifier.subscribers(), vec!["x@y.z"]);
    }

    #[tokio::test]
    async fn test_subscribe_rejects_invalid() {
        let (ctx, _, notifier) = context();
        for email in [None, Some("nobody"), Some("a@b")] {
            let err = subscribe(&ctx, email).await.unwrap_err();
            assert_eq!(err.status_code(), 400);
        }
        assert!(notifier.subscribers().is_empty());
    }

    #[tokio::test]
    async fn test_subscribe_service_failure() {
        let (ctx, _, notifier) = context();
        notifier.fail_subscribe(true);
        let err = subscribe(&ctx, Some("x@y.z")).await.unwrap_err();
        assert!(err.is_dependency());
    }
}
