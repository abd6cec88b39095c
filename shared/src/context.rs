//! Collaborators injected into every handler.

use std::sync::Arc;

use crate::notify::Notifier;
use crate::store::EventStore;

#[cfg(feature = "aws")]
use crate::{Config, DynamoEventStore, SnsNotifier};
#[cfg(feature = "aws")]
use tracing::info;

/// Store and notification clients shared across invocations.
#[derive(Clone)]
pub struct AppContext {
    pub store: Arc<dyn EventStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(store: Arc<dyn EventStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Build DynamoDB and SNS clients from the ambient AWS configuration.
    #[cfg(feature = "aws")]
    pub async fn from_config(config: &Config) -> Self {
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;

        info!(
            table = %config.events_table,
            topic = %config.topic_arn,
            "Initialized event clients"
        );

        Self {
            store: Arc::new(DynamoEventStore::new(
                aws_sdk_dynamodb::Client::new(&aws_config),
                config.events_table.clone(),
            )),
            notifier: Arc::new(SnsNotifier::new(
                aws_sdk_sns::Client::new(&aws_config),
                config.topic_arn.clone(),
            )),
        }
    }
}
