//! Notification topic access.

use async_trait::async_trait;
#[cfg(feature = "aws")]
use aws_sdk_sns::error::DisplayErrorContext;
#[cfg(feature = "aws")]
use aws_sdk_sns::Client as SnsClient;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::{Error, Result};

/// Handle SNS reports for email subscriptions awaiting confirmation.
pub const PENDING_CONFIRMATION: &str = "pending confirmation";

/// Publish/subscribe operations against the fixed event topic.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a message to every confirmed subscriber.
    async fn publish(&self, subject: &str, message: &str) -> Result<()>;

    /// Register an email endpoint and return the subscription handle.
    async fn subscribe_email(&self, email: &str) -> Result<String>;
}

/// SNS-backed notifier bound to one topic.
#[cfg(feature = "aws")]
pub struct SnsNotifier {
    client: SnsClient,
    topic_arn: String,
}

#[cfg(feature = "aws")]
impl SnsNotifier {
    pub fn new(client: SnsClient, topic_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic_arn: topic_arn.into(),
        }
    }
}

#[cfg(feature = "aws")]
#[async_trait]
impl Notifier for SnsNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<()> {
        self.client
            .publish()
            .topic_arn(&self.topic_arn)
            .subject(subject)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                Error::Notification(format!("Failed to publish to SNS: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }

    async fn subscribe_email(&self, email: &str) -> Result<String> {
        let output = self
            .client
            .subscribe()
            .topic_arn(&self.topic_arn)
            .protocol("email")
            .endpoint(email)
            .send()
            .await
            .map_err(|e| {
                Error::Notification(format!("Failed to subscribe to SNS: {}", DisplayErrorContext(&e)))
            })?;

        Ok(output
            .subscription_arn()
            .unwrap_or(PENDING_CONFIRMATION)
            .to_string())
    }
}

/// A message captured by [`MemoryNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMessage {
    pub subject: String,
    pub message: String,
}

/// Notifier that records calls instead of sending them.
#[derive(Default)]
pub struct MemoryNotifier {
    published: Mutex<Vec<PublishedMessage>>,
    subscribers: Mutex<Vec<String>>,
    fail_publish: AtomicBool,
    fail_subscribe: AtomicBool,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_publish(&self, fail: bool) {
        self.fail_publish.store(fail, Ordering::SeqCst);
    }

    pub fn fail_subscribe(&self, fail: bool) {
        self.fail_subscribe.store(fail, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<PublishedMessage> {
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn subscribers(&self) -> Vec<String> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Notifier for MemoryNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<()> {
        if self.fail_publish.load(Ordering::SeqCst) {
            return Err(Error::Notification("Topic does not exist".to_string()));
        }
        self.published
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(PublishedMessage {
                subject: subject.to_string(),
                message: message.to_string(),
            });
        Ok(())
    }

    async fn subscribe_email(&self, email: &str) -> Result<String> {
        if self.fail_subscribe.load(Ordering::SeqCst) {
            return Err(Error::Notification("Topic does not exist".to_string()));
        }
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(email.to_string());
        Ok(PENDING_CONFIRMATION.to_string())
    }
}
