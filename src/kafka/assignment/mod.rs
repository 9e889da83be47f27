//! Partition Assignment Module
//!
//! This module implements the leader side of consumer-group partition
//! assignment: the strategy the elected leader runs during a rebalance and
//! the encoding of its result for the SyncGroup request.
//!
//! # Architecture
//!
//! 1. The leader receives the member list in its JoinGroup response
//! 2. It fetches metadata for every topic the members subscribed to
//! 3. The selected strategy computes one `MemberAssignment` per member
//! 4. The `GroupAssignment` is sent to the coordinator in SyncGroup, which
//!    hands each member its own payload
//!
//! # Wire Format
//!
//! Kafka uses a custom binary format for subscription and assignment metadata:
//!
//! ```text
//! MemberSubscription (JoinGroup metadata):
//!   version: i16
//!   topics: [String]  // array of subscribed topic names
//!   user_data: bytes  // optional client data
//!
//! MemberAssignment (SyncGroup assignment):
//!   version: i16
//!   topic_partitions: [TopicPartition]  // array of (topic, [partitions])
//!   user_data: bytes  // optional client data
//! ```

pub mod builder;
pub mod group_assignment;
pub mod member;
pub mod member_assignment;
pub mod strategies;
pub mod subscription;

#[cfg(test)]
mod tests;

// Re-export main types
pub use builder::AssignmentBuilder;
pub use group_assignment::{GroupAssignment, MemberAssignmentEntry};
pub use member::{subscribed_topics, Member};
pub use member_assignment::{MemberAssignment, PartitionAssignment};
pub use strategies::{range_counts, AssignmentStrategy, RangeStrategy, StrategyRegistry};
pub use subscription::MemberSubscription;
