//! DynamoDB-backed event table.
//!
//! Items are flat string maps keyed by the camelCase field names. Scans follow
//! `LastEvaluatedKey` until the table is exhausted.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;
use tracing::{debug, warn};

use super::EventStore;
use crate::models::{Event, DEFAULT_ORGANIZER};
use crate::{Error, Result};

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed event table.
pub struct DynamoEventStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoEventStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl EventStore for DynamoEventStore {
    async fn put(&self, event: &Event) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(event)))
            .send()
            .await
            .map_err(|e| Error::Store(format!("Failed to put event: {}", DisplayErrorContext(&e))))?;

        Ok(())
    }

    async fn scan(&self, from_date: Option<&str>) -> Result<Vec<Event>> {
        let mut events = Vec::new();
        let mut start_key: Option<Item> = None;
        let mut pages = 0u32;

        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take());

            if let Some(from) = from_date {
                // `date` is a reserved word in DynamoDB expressions
                request = request
                    .filter_expression("#date >= :fromDate")
                    .expression_attribute_names("#date", "date")
                    .expression_attribute_values(":fromDate", AttributeValue::S(from.to_string()));
            }

            let output = request.send().await.map_err(|e| {
                Error::Store(format!("Failed to scan events: {}", DisplayErrorContext(&e)))
            })?;
            pages += 1;

            for item in output.items() {
                match from_item(item) {
                    Some(event) => events.push(event),
                    None => warn!(table = %self.table_name, "Skipping item without id"),
                }
            }

            match output.last_evaluated_key() {
                Some(key) if !key.is_empty() => start_key = Some(key.clone()),
                _ => break,
            }
        }

        debug!(pages, count = events.len(), "Scanned event table");
        Ok(events)
    }
}

fn to_item(event: &Event) -> Item {
    [
        ("id", &event.id),
        ("title", &event.title),
        ("description", &event.description),
        ("date", &event.date),
        ("location", &event.location),
        ("organizer", &event.organizer),
        ("createdAt", &event.created_at),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), AttributeValue::S(value.clone())))
    .collect()
}

fn from_item(item: &Item) -> Option<Event> {
    let text = |key: &str| {
        item.get(key).and_then(|v| v.as_s().ok()).cloned()
    };

    Some(Event {
        id: text("id")?,
        title: text("title").unwrap_or_default(),
        description: text("description").unwrap_or_default(),
        date: text("date").unwrap_or_default(),
        location: text("location").unwrap_or_default(),
        organizer: text("organizer").unwrap_or_else(|| DEFAULT_ORGANIZER.to_string()),
        created_at: text("createdAt").unwrap_or_default(),
    })
}
