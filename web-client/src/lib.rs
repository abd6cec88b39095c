//! Client side of the event announcement service.
//!
//! [`api::EventsApi`] wraps the three HTTP endpoints, and
//! [`page::PageController`] drives the subscribe form, the create-event
//! form and the event list through a swappable [`page::Renderer`].

pub mod api;
pub mod config;
pub mod error;
pub mod page;
pub mod render;

pub use api::EventsApi;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use page::{BannerKind, EventForm, PageController, Renderer, SubmitOutcome};
pub use render::HtmlRenderer;
