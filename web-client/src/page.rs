//! Page controller: form submission, banners and the event list.
//!
//! Presentation goes through [`Renderer`], so the same controller can drive
//! the HTML renderer, a terminal, or a test double.

use shared::{CreateEventRequest, Event};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use crate::EventsApi;

/// How long a banner stays visible.
pub const BANNER_DELAY: Duration = Duration::from_secs(5);

/// Which banner a message goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Presentation adapter driven by [`PageController`].
pub trait Renderer: Send + Sync + 'static {
    fn show_banner(&self, kind: BannerKind, message: &str);
    fn hide_banner(&self, kind: BannerKind);
    /// Replace the event list with a single line of text.
    fn show_placeholder(&self, message: &str);
    /// Replace the event list with one card per event.
    fn show_events(&self, events: &[Event]);
}

/// What the caller should do with the submitted form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    ClearForm,
    KeepForm,
}

/// Raw values of the create-event form.
#[derive(Debug, Clone, Default)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub date: String,
    pub location: String,
    pub organizer: String,
}

impl EventForm {
    /// Trimmed payload, or `None` when a required field is blank.
    fn to_request(&self) -> Option<CreateEventRequest> {
        let title = self.title.trim();
        let description = self.description.trim();
        let location = self.location.trim();

        if title.is_empty() || description.is_empty() || self.date.is_empty() || location.is_empty() {
            return None;
        }

        Some(CreateEventRequest {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            date: Some(self.date.clone()),
            location: Some(location.to_string()),
            organizer: Some(self.organizer.trim().to_string()),
        })
    }
}

pub struct PageController<R: Renderer> {
    api: EventsApi,
    renderer: Arc<R>,
    banner_delay: Duration,
}

impl<R: Renderer> PageController<R> {
    pub fn new(api: EventsApi, renderer: Arc<R>) -> Self {
        Self {
            api,
            renderer,
            banner_delay: BANNER_DELAY,
        }
    }

    pub fn renderer(&self) -> &Arc<R> {
        &self.renderer
    }

    /// Show a banner and schedule it to hide. Earlier timers are left
    /// running, so an old timer can hide a newer message.
    fn flash(&self, kind: BannerKind, message: &str) {
        self.renderer.show_banner(kind, message);

        let renderer = Arc::clone(&self.renderer);
        let delay = self.banner_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            renderer.hide_banner(kind);
        });
    }

    /// Handle the subscribe form.
    pub async fn submit_subscribe(&self, email: &str) -> SubmitOutcome {
        let email = email.trim();
        if email.is_empty() {
            self.flash(BannerKind::Error, "Please enter your email address.");
            return SubmitOutcome::KeepForm;
        }

        match self.api.subscribe_user(email).await {
            Ok(_) => {
                self.flash(BannerKind::Success, "Successfully subscribed to event notifications!");
                SubmitOutcome::ClearForm
            }
            Err(_) => {
                self.flash(BannerKind::Error, "Failed to subscribe. Please try again later.");
                SubmitOutcome::KeepForm
            }
        }
    }

    /// Handle the create-event form.
    pub async fn submit_event(&self, form: &EventForm) -> SubmitOutcome {
        let Some(request) = form.to_request() else {
            self.flash(BannerKind::Error, "Please fill in all required fields.");
            return SubmitOutcome::KeepForm;
        };

        match self.api.create_event(&request).await {
            Ok(_) => {
                self.flash(BannerKind::Success, "Event created successfully!");
                SubmitOutcome::ClearForm
            }
            Err(_) => {
                self.flash(BannerKind::Error, "Failed to create event. Please try again later.");
                SubmitOutcome::KeepForm
            }
        }
    }

    /// Fetch and render the event list.
    pub async fn load_events(&self) {
        self.renderer.show_placeholder("Loading events...");

        match self.api.get_events(None).await {
            Ok(events) if events.is_empty() => self.renderer.show_placeholder("No events found."),
            Ok(events) => self.renderer.show_events(&events),
            Err(e) => {
                error!(error = %e, "Error loading events");
                self.renderer
                    .show_placeholder("Error loading events. Please try again later.");
            }
        }
    }
}
