//! MemberAssignment parsing and encoding
//!
//! The MemberAssignment is the per-member payload the leader sends to the
//! coordinator inside SyncGroup, which the coordinator hands back to each
//! member verbatim.
//!
//! # Wire Format (Kafka ConsumerProtocolAssignment v0)
//!
//! ```text
//! version: i16
//! topic_partitions: [TopicPartition]
//!   - array_length: i32
//!   - for each topic:
//!     - topic_name:
//!       - string_length: i16
//!       - string_bytes: [u8]
//!     - partitions: [i32]
//!       - array_length: i32
//!       - partition_ids: [i32]
//! user_data: bytes
//!   - length: i32 (-1 for null)
//!   - data: [u8] (if length >= 0)
//! ```
//!
//! The in-memory form is a flat, ordered list of (topic, partition) pairs.
//! Encoding groups consecutive pairs of the same topic into one topic block;
//! decoding flattens the blocks back, so the list order survives a round trip.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::kafka::constants::ASSIGNMENT_VERSION;
use crate::kafka::error::{KafkaError, Result};
use crate::kafka::protocol::{
    read_array_len, read_bytes, read_i16, read_i32, read_string, write_array_len, write_bytes,
    write_string,
};

/// One partition handed to one member
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionAssignment {
    pub topic: String,
    pub partition: i32,
}

impl PartitionAssignment {
    pub fn new(topic: impl Into<String>, partition: i32) -> Self {
        Self {
            topic: topic.into(),
            partition,
        }
    }
}

/// Partition assignment for a consumer member
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberAssignment {
    /// Protocol version
    pub version: i16,

    /// Assigned partitions, in assignment order
    pub partitions: Vec<PartitionAssignment>,

    /// Opaque user data (empty when absent)
    pub user_data: Bytes,
}

impl MemberAssignment {
    /// Create a new empty assignment
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a current-version assignment with the given partitions
    pub fn with_partitions(partitions: Vec<PartitionAssignment>) -> Self {
        Self {
            version: ASSIGNMENT_VERSION,
            partitions,
            user_data: Bytes::new(),
        }
    }

    /// Partition ids assigned for a specific topic, in assignment order
    pub fn partitions_for(&self, topic: &str) -> Vec<i32> {
        self.partitions
            .iter()
            .filter(|p| p.topic == topic)
            .map(|p| p.partition)
            .collect()
    }

    /// Topics in the order they first appear
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = Vec::new();
        for p in &self.partitions {
            if !topics.contains(&p.topic.as_str()) {
                topics.push(&p.topic);
            }
        }
        topics
    }

    /// Check if this assignment is empty (no partitions assigned)
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Total number of partitions assigned
    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Parse a MemberAssignment from raw bytes
    ///
    /// An empty payload is what the coordinator returns to a member that was
    /// given nothing, and parses as the default (empty) assignment. A missing
    /// or null user_data field parses as empty user data.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }

        let mut buf = bytes;

        let version = read_i16(&mut buf, "assignment version")?;

        // Smallest topic block: empty name (2) + partition count (4)
        let topic_count = read_array_len(&mut buf, 6, "topic_partitions")?.ok_or_else(|| {
            KafkaError::corrupt("Null topic_partitions array in MemberAssignment")
        })?;

        let mut partitions = Vec::new();
        for _ in 0..topic_count {
            let topic = read_string(&mut buf, "topic name")?
                .ok_or_else(|| KafkaError::corrupt("Null topic name in MemberAssignment"))?;

            let partition_count = read_array_len(&mut buf, 4, "partitions")?.unwrap_or(0);
            partitions.reserve(partition_count);
            for _ in 0..partition_count {
                let partition = read_i32(&mut buf, "partition id")?;
                partitions.push(PartitionAssignment::new(topic.clone(), partition));
            }
        }

        // Older clients omit user_data entirely
        let user_data = if buf.has_remaining() {
            read_bytes(&mut buf, "user data")?.unwrap_or_default()
        } else {
            Bytes::new()
        };

        Ok(Self {
            version,
            partitions,
            user_data,
        })
    }

    /// Encode this assignment to bytes for wire format
    ///
    /// Fails with `KafkaError::Encoding` when a topic name does not fit its
    /// int16 length prefix.
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(128);

        buf.put_i16(self.version);

        let blocks = self.topic_blocks();
        write_array_len(&mut buf, blocks.len(), "topic_partitions")?;
        for (topic, partitions) in blocks {
            write_string(&mut buf, topic, "topic name")?;
            write_array_len(&mut buf, partitions.len(), "partitions")?;
            for partition in partitions {
                buf.put_i32(partition);
            }
        }

        write_bytes(&mut buf, Some(self.user_data.as_ref()), "user data")?;

        Ok(buf.freeze())
    }

    /// Runs of consecutive entries sharing a topic
    fn topic_blocks(&self) -> Vec<(&str, Vec<i32>)> {
        let mut blocks: Vec<(&str, Vec<i32>)> = Vec::new();
        for p in &self.partitions {
            if let Some((topic, ids)) = blocks.last_mut() {
                if *topic == p.topic {
                    ids.push(p.partition);
                    continue;
                }
            }
            blocks.push((p.topic.as_str(), vec![p.partition]));
        }
        blocks
    }
}
