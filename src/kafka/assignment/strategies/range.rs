//! Range Assignment Strategy
//!
//! The Range strategy hands every member one contiguous run of each topic's
//! partition ids.
//!
//! # Algorithm
//!
//! For each topic independently, in the order the topics were supplied:
//! 1. Sort the topic's partitions by partition id (metadata order is arbitrary)
//! 2. Compute per-member counts from the highest member index down:
//!    `counts[i] = remaining / (i + 1)`, then `remaining -= counts[i]`
//! 3. Walk the sorted ids, giving the first `counts[0]` to member 0, the next
//!    `counts[1]` to member 1, and so on
//!
//! Members are taken in the order supplied; nothing is re-sorted by id.
//!
//! # Example
//!
//! With 5 partitions and 3 members:
//! - Member 2: 5 / 3 = 1, remaining 4
//! - Member 1: 4 / 2 = 2, remaining 2
//! - Member 0: 2 / 1 = 2
//! - Assignment: member 0 [0, 1], member 1 [2, 3], member 2 [4]
//!
//! Any remainder always lands on the lowest member indices. Callers that want
//! the extra partitions to rotate across rebalances must rotate the member
//! order themselves.

use tracing::debug;

use super::AssignmentStrategy;
use crate::kafka::assignment::{AssignmentBuilder, GroupAssignment, Member};
use crate::kafka::constants::STRATEGY_RANGE;
use crate::kafka::error::Result;
use crate::kafka::metadata::TopicMetadata;

/// Per-member partition counts for one topic
///
/// (3, 5) => [2, 2, 1]; (5, 10) => [2, 2, 2, 2, 2]
pub fn range_counts(member_count: usize, partition_count: usize) -> Vec<usize> {
    let mut counts = vec![0; member_count];
    let mut remaining = partition_count;
    for i in (0..member_count).rev() {
        counts[i] = remaining / (i + 1);
        remaining -= counts[i];
    }
    counts
}

/// Range partition assignment strategy
#[derive(Debug, Clone, Default)]
pub struct RangeStrategy;

impl RangeStrategy {
    /// Create a new Range strategy
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentStrategy for RangeStrategy {
    fn name(&self) -> &'static str {
        STRATEGY_RANGE
    }

    fn assign(&self, members: &[Member], topics: &[TopicMetadata]) -> Result<GroupAssignment> {
        let mut builder = AssignmentBuilder::new(members)?;

        debug!(
            members = members.len(),
            topics = topics.len(),
            "Range assignment starting"
        );

        for topic in topics {
            let ids = topic.sorted_partition_ids()?;
            let counts = range_counts(builder.member_count(), ids.len());
            builder.add_topic(&topic.name, &ids, &counts)?;
        }

        builder.build()
    }
}
