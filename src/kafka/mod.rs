// Kafka consumer-group assignment module
//
// This module contains everything the group leader needs during a rebalance:
// - Topic/partition metadata snapshot
// - Assignment strategies (trait + registry, range allocator)
// - Assignment builder and consumer protocol encoding
// - Conversion from/to kafka-protocol JoinGroup, Metadata and SyncGroup messages
//
// Data flow for one rebalance round:
//
//   JoinGroupResponse ──> [Member]          ┐
//                                           ├──> AssignmentStrategy::assign ──> GroupAssignment
//   MetadataResponse  ──> [TopicMetadata]   ┘                                          │
//                                                                                      v
//                                                                           SyncGroupRequest
//
// Every structure is rebuilt for each round and dropped once the SyncGroup
// request has been handed to the transport. Nothing persists across rounds.

pub mod assignment;
pub mod constants;
pub mod context;
pub mod error;
pub mod group_leader;
pub mod metadata;
pub mod protocol;

// Re-export commonly used types for convenience
pub use assignment::{
    AssignmentStrategy, GroupAssignment, Member, MemberAssignment, PartitionAssignment,
    RangeStrategy, StrategyRegistry,
};
pub use constants::*;
pub use context::RuntimeContext;
pub use error::{KafkaError, Result};
pub use group_leader::GroupLeader;
pub use metadata::{PartitionMetadataInfo, TopicMetadata};
