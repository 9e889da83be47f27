//! Topic and partition metadata snapshot
//!
//! These types mirror the topic section of a Metadata response. A snapshot is
//! taken once per rebalance round and replaced wholesale on the next refresh,
//! so nothing here is mutable after construction from the assignor's point
//! of view.
//!
//! Brokers do not guarantee any ordering of partitions within a topic; the
//! assignor normalizes the order itself via [`TopicMetadata::sorted_partition_ids`].

use kafka_protocol::messages::metadata_response::{
    MetadataResponse, MetadataResponsePartition, MetadataResponseTopic,
};
use tracing::warn;

use crate::kafka::constants::ERROR_NONE;
use crate::kafka::error::{KafkaError, Result};

/// One partition of a topic as reported by the cluster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PartitionMetadataInfo {
    pub error_code: i16,
    pub partition_id: i32,
    /// Broker id of the partition leader (-1 when leaderless)
    pub leader: i32,
    pub replicas: Vec<i32>,
    pub isr: Vec<i32>,
}

impl PartitionMetadataInfo {
    /// Partition with no error and no leader/replica information
    pub fn new(partition_id: i32) -> Self {
        Self {
            partition_id,
            leader: -1,
            ..Default::default()
        }
    }
}

impl From<&MetadataResponsePartition> for PartitionMetadataInfo {
    fn from(partition: &MetadataResponsePartition) -> Self {
        Self {
            error_code: partition.error_code,
            partition_id: partition.partition_index,
            leader: partition.leader_id.0,
            replicas: partition.replica_nodes.iter().map(|id| id.0).collect(),
            isr: partition.isr_nodes.iter().map(|id| id.0).collect(),
        }
    }
}

/// A topic and its partitions as reported by the cluster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopicMetadata {
    pub error_code: i16,
    pub name: String,
    /// Partitions in the order the broker sent them
    pub partitions: Vec<PartitionMetadataInfo>,
}

impl TopicMetadata {
    pub fn new(name: impl Into<String>, partitions: Vec<PartitionMetadataInfo>) -> Self {
        Self {
            error_code: ERROR_NONE,
            name: name.into(),
            partitions,
        }
    }

    /// Topic with partitions `0..partition_count`
    pub fn with_partition_count(name: impl Into<String>, partition_count: i32) -> Self {
        Self::new(
            name,
            (0..partition_count.max(0))
                .map(PartitionMetadataInfo::new)
                .collect(),
        )
    }

    /// Build from one topic of a Metadata response
    ///
    /// Returns `None` for topics the broker reported without a name.
    pub fn from_response_topic(topic: &MetadataResponseTopic) -> Option<Self> {
        let name = topic.name.as_ref()?;
        Some(Self {
            error_code: topic.error_code,
            name: name.0.to_string(),
            partitions: topic
                .partitions
                .iter()
                .map(PartitionMetadataInfo::from)
                .collect(),
        })
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Partition ids in ascending order
    ///
    /// The sort happens on a copy; `self.partitions` keeps the broker's order.
    /// Fails with `InvalidPartitionMetadata` when an id is negative or appears
    /// more than once, which means the metadata source is inconsistent and
    /// must be re-fetched.
    pub fn sorted_partition_ids(&self) -> Result<Vec<i32>> {
        let mut ids: Vec<i32> = self.partitions.iter().map(|p| p.partition_id).collect();
        ids.sort_unstable();

        if let Some(&first) = ids.first() {
            if first < 0 {
                return Err(self.invalid(format!("negative partition id {}", first)));
            }
        }

        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(self.invalid(format!("duplicate partition id {}", pair[0])));
        }

        Ok(ids)
    }

    fn invalid(&self, message: String) -> KafkaError {
        warn!(topic = %self.name, "Rejecting partition metadata: {}", message);
        KafkaError::InvalidPartitionMetadata {
            topic: self.name.clone(),
            message,
        }
    }
}

/// Convert the topics of a Metadata response, preserving response order
///
/// Topics the broker reported with an error (unknown topic, authorization
/// failure, ...) or without a name cannot be assigned and are skipped.
pub fn topics_from_metadata_response(response: &MetadataResponse) -> Vec<TopicMetadata> {
    response
        .topics
        .iter()
        .filter_map(|topic| {
            let metadata = TopicMetadata::from_response_topic(topic);
            match metadata {
                Some(metadata) if metadata.error_code == ERROR_NONE => Some(metadata),
                Some(metadata) => {
                    warn!(
                        topic = %metadata.name,
                        error_code = metadata.error_code,
                        "Skipping topic reported with an error"
                    );
                    None
                }
                None => {
                    warn!("Skipping unnamed topic in metadata response");
                    None
                }
            }
        })
        .collect()
}
