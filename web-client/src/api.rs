//! HTTP wrapper around the event endpoints.

use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use shared::{CreateEventRequest, CreateEventResponse, Event, SubscribeRequest, SubscribeResponse};
use tracing::error;

use crate::{ClientConfig, ClientError, Result};

/// Client for the three event endpoints.
#[derive(Clone)]
pub struct EventsApi {
    client: reqwest::Client,
    base_url: String,
}

impl EventsApi {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.api_url.clone(),
        }
    }

    /// Subscribe a user to event notifications.
    pub async fn subscribe_user(&self, email: &str) -> Result<SubscribeResponse> {
        let body = SubscribeRequest {
            email: Some(email.to_string()),
        };
        let request = self.client.post(self.url("/subscribe")).json(&body);
        self.send(request, "subscribing user").await
    }

    /// Fetch events, newest first.
    pub async fn get_events(&self, from_date: Option<&str>) -> Result<Vec<Event>> {
        let mut request = self.client.get(self.url("/events"));
        if let Some(from) = from_date {
            request = request.query(&[("fromDate", from)]);
        }
        self.send(request, "fetching events").await
    }

    /// Create a new event.
    pub async fn create_event(&self, event: &CreateEventRequest) -> Result<CreateEventResponse> {
        let request = self.client.post(self.url("/event")).json(event);
        self.send(request, "creating event").await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        let result = execute(request).await;
        if let Err(e) = &result {
            error!(error = %e, "Error {}", action);
        }
        result
    }
}

async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request
        .header(CONTENT_TYPE, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClientError::Status(status.as_u16()));
    }

    Ok(response.json::<T>().await?)
}
