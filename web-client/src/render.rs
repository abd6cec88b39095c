//! HTML rendering adapter.

use shared::dates;
use shared::Event;
use std::sync::Mutex;

use crate::page::{BannerKind, Renderer};

#[derive(Debug, Default)]
struct Banner {
    text: String,
    visible: bool,
}

#[derive(Debug, Default)]
struct PageState {
    success: Banner,
    error: Banner,
    events_html: String,
}

impl PageState {
    fn banner_mut(&mut self, kind: BannerKind) -> &mut Banner {
        match kind {
            BannerKind::Success => &mut self.success,
            BannerKind::Error => &mut self.error,
        }
    }
}

/// Keeps the page state in memory and renders it as HTML fragments.
#[derive(Debug, Default)]
pub struct HtmlRenderer {
    state: Mutex<PageState>,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut PageState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }

    /// Text of a banner while it is visible.
    pub fn banner(&self, kind: BannerKind) -> Option<String> {
        self.with_state(|state| {
            let banner = state.banner_mut(kind);
            banner.visible.then(|| banner.text.clone())
        })
    }

    /// Markup for a banner element, hidden with `display: none` when inactive.
    pub fn banner_html(&self, kind: BannerKind) -> String {
        let class = match kind {
            BannerKind::Success => "success-message",
            BannerKind::Error => "error-message",
        };
        self.with_state(|state| {
            let banner = state.banner_mut(kind);
            let display = if banner.visible { "block" } else { "none" };
            format!(
                r#"<div class="{}" style="display: {}">{}</div>"#,
                class,
                display,
                escape(&banner.text)
            )
        })
    }

    /// Current contents of the events container.
    pub fn events_html(&self) -> String {
        self.with_state(|state| state.events_html.clone())
    }
}

impl Renderer for HtmlRenderer {
    fn show_banner(&self, kind: BannerKind, message: &str) {
        self.with_state(|state| {
            let banner = state.banner_mut(kind);
            banner.text = message.to_string();
            banner.visible = true;
        });
    }

    fn hide_banner(&self, kind: BannerKind) {
        self.with_state(|state| state.banner_mut(kind).visible = false);
    }

    fn show_placeholder(&self, message: &str) {
        let html = format!("<p>{}</p>", escape(message));
        self.with_state(|state| state.events_html = html);
    }

    fn show_events(&self, events: &[Event]) {
        let html = events.iter().map(event_card).collect::<String>();
        self.with_state(|state| state.events_html = html);
    }
}

/// One `.event-card` block.
pub fn event_card(event: &Event) -> String {
    format!(
        concat!(
            r#"<div class="event-card">"#,
            r#"<div class="event-card-header"><h3>{title}</h3></div>"#,
            r#"<div class="event-card-body">"#,
            "<p>{description}</p>",
            r#"<p class="event-date">Date: {date}</p>"#,
            "<p>Location: {location}</p>",
            "</div>",
            r#"<div class="event-card-footer"><p>Created by: {organizer}</p></div>"#,
            "</div>"
        ),
        title = escape(&event.title),
        description = escape(&event.description),
        date = escape(&dates::format_long(&event.date)),
        location = escape(&event.location),
        organizer = escape(&event.organizer),
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
