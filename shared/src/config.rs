//! Configuration management for Lambda functions.

use std::env;

/// Default DynamoDB table holding event records.
pub const DEFAULT_EVENTS_TABLE: &str = "Events";

/// Default SNS topic for event notifications.
pub const DEFAULT_TOPIC_ARN: &str = "arn:aws:sns:us-east-1:123456789012:EventNotifications";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// DynamoDB table name
    pub events_table: String,
    /// ARN of the notification topic
    pub topic_arn: String,
    /// AWS region
    pub aws_region: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            events_table: non_empty("EVENTS_TABLE")
                .unwrap_or_else(|| DEFAULT_EVENTS_TABLE.to_string()),
            topic_arn: non_empty("SNS_TOPIC_ARN").unwrap_or_else(|| DEFAULT_TOPIC_ARN.to_string()),
            aws_region: non_empty("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
        }
    }
}
