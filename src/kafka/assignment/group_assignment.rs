//! GroupAssignment: the leader's complete output for one rebalance round
//!
//! One entry per group member, in the order the members were supplied to the
//! strategy. Each entry carries the member's already-serialized
//! `MemberAssignment`, which the coordinator treats as opaque bytes.
//!
//! # Wire Format (as embedded in SyncGroupRequest v0-v3)
//!
//! ```text
//! assignments: [MemberAssignment]
//!   - array_length: i32
//!   - for each member:
//!     - member_id: string (i16 length prefix)
//!     - assignment: bytes (i32 length prefix)
//! ```

use bytes::{Bytes, BytesMut};
use kafka_protocol::messages::sync_group_request::SyncGroupRequestAssignment;
use kafka_protocol::protocol::StrBytes;

use super::member_assignment::MemberAssignment;
use crate::kafka::error::{KafkaError, Result};
use crate::kafka::protocol::{
    read_array_len, read_bytes, read_string, write_array_len, write_bytes, write_string,
};

/// One member's serialized share
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberAssignmentEntry {
    pub member_id: String,
    pub assignment: Bytes,
}

impl MemberAssignmentEntry {
    /// Decode the entry's `MemberAssignment`
    pub fn decode(&self) -> Result<MemberAssignment> {
        MemberAssignment::parse(&self.assignment)
    }
}

/// Ordered (member id, assignment bytes) pairs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupAssignment {
    entries: Vec<MemberAssignmentEntry>,
}

impl GroupAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, member_id: impl Into<String>, assignment: Bytes) {
        self.entries.push(MemberAssignmentEntry {
            member_id: member_id.into(),
            assignment,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[MemberAssignmentEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MemberAssignmentEntry> {
        self.entries.iter()
    }

    /// Assignment bytes of the first entry with the given member id
    pub fn get(&self, member_id: &str) -> Option<&Bytes> {
        self.entries
            .iter()
            .find(|entry| entry.member_id == member_id)
            .map(|entry| &entry.assignment)
    }

    /// Encode as the classic SyncGroup assignments array
    pub fn encode(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(
            4 + self
                .entries
                .iter()
                .map(|e| 2 + e.member_id.len() + 4 + e.assignment.len())
                .sum::<usize>(),
        );

        write_array_len(&mut buf, self.entries.len(), "assignments")?;
        for entry in &self.entries {
            write_string(&mut buf, &entry.member_id, "member id")?;
            write_bytes(&mut buf, Some(entry.assignment.as_ref()), "member assignment")?;
        }

        Ok(buf.freeze())
    }

    /// Parse the classic SyncGroup assignments array
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut buf = bytes;

        // Smallest entry: empty member id (2) + assignment length (4)
        let count = read_array_len(&mut buf, 6, "assignments")?.unwrap_or(0);

        let mut group = Self::with_capacity(count);
        for _ in 0..count {
            let member_id = read_string(&mut buf, "member id")?
                .ok_or_else(|| KafkaError::corrupt("Null member id in group assignment"))?;
            let assignment = read_bytes(&mut buf, "member assignment")?.unwrap_or_default();
            group.push(member_id, assignment);
        }

        Ok(group)
    }

    /// Convert into the assignment entries of a kafka-protocol SyncGroupRequest
    pub fn to_sync_group_assignments(&self) -> Vec<SyncGroupRequestAssignment> {
        self.entries
            .iter()
            .map(|entry| {
                let mut assignment = SyncGroupRequestAssignment::default();
                assignment.member_id = StrBytes::from_string(entry.member_id.clone());
                assignment.assignment = entry.assignment.clone();
                assignment
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a GroupAssignment {
    type Item = &'a MemberAssignmentEntry;
    type IntoIter = std::slice::Iter<'a, MemberAssignmentEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BufMut;
    use crate::kafka::assignment::PartitionAssignment;
    use crate::kafka::constants::MAX_STRING_LENGTH;

    fn sample() -> GroupAssignment {
        let a = MemberAssignment::with_partitions(vec![PartitionAssignment::new("t", 0)]);
        let b = MemberAssignment::with_partitions(vec![PartitionAssignment::new("t", 1)]);

        let mut group = GroupAssignment::new();
        group.push("member-b", b.encode().unwrap());
        group.push("member-a", a.encode().unwrap());
        group
    }

    #[test]
    fn test_preserves_insertion_order() {
        let group = sample();
        let ids: Vec<&str> = group.iter().map(|e| e.member_id.as_str()).collect();
        assert_eq!(ids, vec!["member-b", "member-a"]);
    }

    #[test]
    fn test_get_and_decode() {
        let group = sample();
        let bytes = group.get("member-a").unwrap();
        let decoded = MemberAssignment::parse(bytes).unwrap();
        assert_eq!(decoded.partitions_for("t"), vec![0]);

        assert_eq!(group.entries()[0].decode().unwrap().partitions_for("t"), vec![1]);
        assert!(group.get("missing").is_none());
    }

    #[test]
    fn test_encode_layout() {
        let mut group = GroupAssignment::new();
        group.push("m", Bytes::from_static(&[9, 9]));

        let encoded = group.encode().unwrap();

        let mut expected = Vec::new();
        expected.put_i32(1);
        expected.put_i16(1);
        expected.put_slice(b"m");
        expected.put_i32(2);
        expected.put_slice(&[9, 9]);

        assert_eq!(encoded.as_ref(), expected.as_slice());
    }

    #[test]
    fn test_encode_parse_roundtrip() {
        let group = sample();
        let parsed = GroupAssignment::parse(&group.encode().unwrap()).unwrap();
        assert_eq!(group, parsed);
    }

    #[test]
    fn test_member_id_too_long() {
        let mut group = GroupAssignment::new();
        group.push("m".repeat(MAX_STRING_LENGTH + 1), Bytes::new());
        assert!(matches!(group.encode(), Err(KafkaError::Encoding(_))));
    }

    #[test]
    fn test_to_sync_group_assignments() {
        let group = sample();
        let assignments = group.to_sync_group_assignments();

        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].member_id.to_string(), "member-b");
        assert_eq!(assignments[0].assignment, group.entries()[0].assignment);
    }
}
