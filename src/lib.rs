//! Consumer-group partition assignment for Kafka clients.
//!
//! The group leader elected during a rebalance runs an assignment strategy
//! over the joined members and the cluster's topic metadata, then ships one
//! encoded `MemberAssignment` per member back to the coordinator inside its
//! SyncGroup request. This crate implements that leader-side computation:
//!
//! - [`kafka::metadata`] - topic/partition snapshot taken from a Metadata response
//! - [`kafka::assignment`] - strategy registry, the range allocator, the
//!   assignment builder and the consumer protocol payload codecs
//! - [`kafka::group_leader`] - glue between `kafka-protocol` JoinGroup /
//!   Metadata / SyncGroup messages and the assignment strategies
//!
//! Nothing here performs I/O. Broker connections, request framing and the
//! JoinGroup/SyncGroup exchange belong to the caller.

pub mod config; // Client configuration for the group leader
pub mod kafka; // Assignment strategies, metadata model and wire codecs

pub use config::Config;
pub use kafka::{KafkaError, Result};
