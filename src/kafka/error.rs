//! Kafka assignment error types
//!
//! This module defines a custom error type for the assignment subsystem,
//! providing better type safety and more informative error messages than
//! using `Box<dyn std::error::Error>`.
//!
//! None of these errors is process-fatal: each one fails the current
//! rebalance round and the caller retries on the next rebalance trigger.

use thiserror::Error;

use crate::kafka::constants::{
    ERROR_CORRUPT_MESSAGE, ERROR_INCONSISTENT_GROUP_PROTOCOL, ERROR_INVALID_CONFIG,
    ERROR_UNKNOWN_SERVER_ERROR, ERROR_UNKNOWN_TOPIC_OR_PARTITION,
};

/// Errors that can occur while computing or encoding a group assignment
#[derive(Error, Debug)]
pub enum KafkaError {
    /// No members were supplied to the strategy
    #[error("Invalid member count: assignment requires at least one member")]
    InvalidMemberCount,

    /// Duplicate or malformed partition ids in a topic's metadata
    #[error("Invalid partition metadata for topic '{topic}': {message}")]
    InvalidPartitionMetadata { topic: String, message: String },

    /// A payload could not be serialized (e.g. a string too long for its length prefix)
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A payload could not be decoded
    #[error("Corrupt message: {message}")]
    CorruptMessage { message: String },

    /// Strategy name is not registered
    #[error("Unknown assignment strategy: {0}")]
    UnknownStrategy(String),

    /// Members advertised no strategy in common
    #[error("No assignment strategy is supported by every member")]
    NoCommonStrategy,

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from kafka-protocol crate (anyhow::Error)
    #[error("Protocol encoding/decoding error: {0}")]
    ProtocolCodec(#[from] anyhow::Error),
}

impl KafkaError {
    /// Convert this error to a Kafka protocol error code
    pub fn to_kafka_error_code(&self) -> i16 {
        match self {
            KafkaError::CorruptMessage { .. } => ERROR_CORRUPT_MESSAGE,
            KafkaError::NoCommonStrategy | KafkaError::UnknownStrategy(_) => {
                ERROR_INCONSISTENT_GROUP_PROTOCOL
            }
            KafkaError::InvalidPartitionMetadata { .. } => ERROR_UNKNOWN_TOPIC_OR_PARTITION,
            KafkaError::InvalidConfig(_) => ERROR_INVALID_CONFIG,
            KafkaError::InvalidMemberCount
            | KafkaError::Encoding(_)
            | KafkaError::ProtocolCodec(_) => ERROR_UNKNOWN_SERVER_ERROR,
        }
    }

    /// Whether the caller should refresh topic metadata before retrying the round
    pub fn requires_metadata_refresh(&self) -> bool {
        matches!(self, KafkaError::InvalidPartitionMetadata { .. })
    }

    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        KafkaError::CorruptMessage {
            message: message.into(),
        }
    }
}

/// Result type alias for assignment operations
pub type Result<T> = std::result::Result<T, KafkaError>;
