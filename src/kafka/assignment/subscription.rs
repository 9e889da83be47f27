//! MemberSubscription parsing and encoding
//!
//! The MemberSubscription is sent by consumers in the JoinGroup request's
//! protocol metadata. The leader receives every member's copy in the
//! JoinGroup response and uses it to decide which topics to fetch metadata for.
//!
//! # Wire Format (Kafka ConsumerProtocolSubscription)
//!
//! ```text
//! version: i16
//! topics: [String]
//!   - array_length: i32
//!   - for each topic:
//!     - string_length: i16
//!     - string_bytes: [u8]
//! user_data: bytes
//!   - length: i32 (-1 for null)
//!   - data: [u8] (if length >= 0)
//! owned_partitions: [TopicPartition] (v1+ only, for cooperative rebalancing)
//!   - Ignored when present
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::kafka::constants::SUBSCRIPTION_VERSION;
use crate::kafka::error::{KafkaError, Result};
use crate::kafka::protocol::{
    read_array_len, read_bytes, read_i16, read_string, write_array_len, write_bytes, write_string,
};

/// Consumer subscription metadata from JoinGroup
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberSubscription {
    /// Protocol version (0 = basic, 1+ = cooperative features)
    pub version: i16,

    /// List of topic names the consumer wants to subscribe to
    pub topics: Vec<String>,

    /// Optional user-defined data (passed through unchanged)
    pub user_data: Option<Bytes>,
}

impl MemberSubscription {
    /// Create a new subscription with the given topics
    pub fn new(topics: Vec<String>) -> Self {
        Self {
            version: SUBSCRIPTION_VERSION,
            topics,
            user_data: None,
        }
    }

    /// Parse a MemberSubscription from raw bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let mut buf = bytes;

        let version = read_i16(&mut buf, "subscription version")?;

        let topic_count = read_array_len(&mut buf, 2, "topics")?
            .ok_or_else(|| KafkaError::corrupt("Null topics array in MemberSubscription"))?;

        let mut topics = Vec::with_capacity(topic_count);
        for _ in 0..topic_count {
            // Null topic names carry no subscription - skip
            if let Some(topic) = read_string(&mut buf, "topic name")? {
                topics.push(topic);
            }
        }

        let user_data = if buf.remaining() >= 4 {
            read_bytes(&mut buf, "user data")?
        } else {
            None
        };

        Ok(Self {
            version,
            topics,
            user_data,
        })
    }

    /// Encode this subscription to bytes for JoinGroup protocol metadata
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(64);

        buf.put_i16(self.version);

        write_array_len(&mut buf, self.topics.len(), "topics")?;
        for topic in &self.topics {
            write_string(&mut buf, topic, "topic name")?;
        }

        write_bytes(&mut buf, self.user_data.as_deref(), "user data")?;

        Ok(buf.freeze())
    }
}
