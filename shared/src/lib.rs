//! Shared library for the event announcement Lambda functions.
//!
//! This crate provides the event model, the store and notification clients,
//! the request handlers and the route table used by every Lambda binary.
//!
//! The `aws` feature (on by default) enables the DynamoDB and SNS clients and
//! the Lambda HTTP surface. Without it only the models, dates, handlers and
//! in-memory collaborators are built.

pub mod config;
pub mod context;
pub mod dates;
pub mod error;
pub mod handlers;
#[cfg(feature = "aws")]
pub mod http;
pub mod models;
pub mod notify;
#[cfg(feature = "aws")]
pub mod routes;
pub mod store;

pub use config::Config;
pub use context::AppContext;
pub use error::{Error, Result};
pub use models::{
    CreateEventRequest, CreateEventResponse, Event, MessageBody, SubscribeRequest,
    SubscribeResponse,
};
pub use notify::{MemoryNotifier, Notifier};
pub use store::{EventStore, MemoryEventStore};

#[cfg(feature = "aws")]
pub use notify::SnsNotifier;
#[cfg(feature = "aws")]
pub use routes::Routes;
#[cfg(feature = "aws")]
pub use store::DynamoEventStore;
