//! Assignment builder
//!
//! Collects per-topic allocations into one ordered partition list per member
//! and serializes the result into a `GroupAssignment`.
//!
//! Accumulators are keyed by member *index*, never by member id: two entries
//! in the member list always get separate shares even if their ids collide.
//! Topic names on the other hand are unique within a round.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use super::group_assignment::GroupAssignment;
use super::member::Member;
use super::member_assignment::{MemberAssignment, PartitionAssignment};
use crate::kafka::error::{KafkaError, Result};

/// Per-member accumulator for one assignment round
#[derive(Debug)]
pub struct AssignmentBuilder<'a> {
    members: &'a [Member],
    shares: Vec<Vec<PartitionAssignment>>,
    topics: BTreeSet<String>,
}

impl<'a> AssignmentBuilder<'a> {
    /// Start a round for the given members
    ///
    /// Fails with `InvalidMemberCount` when `members` is empty.
    pub fn new(members: &'a [Member]) -> Result<Self> {
        if members.is_empty() {
            return Err(KafkaError::InvalidMemberCount);
        }

        Ok(Self {
            members,
            shares: vec![Vec::new(); members.len()],
            topics: BTreeSet::new(),
        })
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Append one topic's allocation
    ///
    /// `sorted_ids` are the topic's partition ids in ascending order and
    /// `counts[i]` is how many of them member `i` receives; the first
    /// `counts[0]` ids go to member 0, the next `counts[1]` to member 1, and
    /// so on.
    ///
    /// A topic name seen earlier in the round fails with
    /// `InvalidPartitionMetadata`: its partitions would be handed out twice.
    pub fn add_topic(&mut self, topic: &str, sorted_ids: &[i32], counts: &[usize]) -> Result<()> {
        if counts.len() != self.shares.len() {
            return Err(KafkaError::InvalidMemberCount);
        }

        if self.topics.contains(topic) {
            warn!(topic, "Rejecting topic listed more than once");
            return Err(KafkaError::InvalidPartitionMetadata {
                topic: topic.to_string(),
                message: "duplicate topic".to_string(),
            });
        }

        let total: usize = counts.iter().sum();
        if total != sorted_ids.len() {
            return Err(KafkaError::InvalidPartitionMetadata {
                topic: topic.to_string(),
                message: format!(
                    "allocation covers {} partitions, topic has {}",
                    total,
                    sorted_ids.len()
                ),
            });
        }

        self.topics.insert(topic.to_string());

        let mut remaining = sorted_ids;
        for (share, &count) in self.shares.iter_mut().zip(counts) {
            let (taken, rest) = remaining.split_at(count);
            share.extend(
                taken
                    .iter()
                    .map(|&partition| PartitionAssignment::new(topic, partition)),
            );
            remaining = rest;
        }

        debug!(topic, partitions = sorted_ids.len(), ?counts, "Allocated topic");
        Ok(())
    }

    /// Per-member assignments in member order, before serialization
    #[cfg(test)]
    fn member_assignments(&self) -> Vec<MemberAssignment> {
        self.shares
            .iter()
            .map(|share| MemberAssignment::with_partitions(share.clone()))
            .collect()
    }

    /// Serialize every member's share
    ///
    /// Any encoding failure aborts the whole build; a partial group
    /// assignment is never returned.
    pub fn build(self) -> Result<GroupAssignment> {
        let mut group = GroupAssignment::with_capacity(self.members.len());

        for (member, share) in self.members.iter().zip(self.shares) {
            let assignment = MemberAssignment::with_partitions(share);
            let encoded = assignment.encode()?;
            group.push(member.member_id.clone(), encoded);
        }

        Ok(group)
    }
}
