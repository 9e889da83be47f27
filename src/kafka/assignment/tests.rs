//! Integration tests for the assignment module
//!
//! Unit tests are in each submodule. This file contains cross-module integration tests.

#[cfg(test)]
mod integration_tests {
    use std::collections::BTreeSet;

    use crate::kafka::assignment::{
        subscribed_topics, GroupAssignment, Member, MemberAssignment, MemberSubscription,
        StrategyRegistry,
    };
    use crate::kafka::metadata::{PartitionMetadataInfo, TopicMetadata};

    /// Helper to create members subscribed to the given topics
    fn make_members(members: Vec<(&str, Vec<&str>)>) -> Vec<Member> {
        members
            .into_iter()
            .map(|(id, topics)| {
                let sub = MemberSubscription::new(topics.into_iter().map(String::from).collect());
                Member::with_subscription(id, &sub).unwrap()
            })
            .collect()
    }

    fn make_topic(name: &str, ids: &[i32]) -> TopicMetadata {
        TopicMetadata::new(
            name,
            ids.iter().copied().map(PartitionMetadataInfo::new).collect(),
        )
    }

    fn decode_all(group: &GroupAssignment) -> Vec<MemberAssignment> {
        group.iter().map(|e| e.decode().unwrap()).collect()
    }

    #[test]
    fn test_subscriptions_drive_metadata_then_assignment() {
        let members = make_members(vec![
            ("member-1", vec!["topic-a", "topic-b"]),
            ("member-2", vec!["topic-a"]),
        ]);

        let topics: Vec<TopicMetadata> = subscribed_topics(&members)
            .unwrap()
            .iter()
            .map(|name| TopicMetadata::with_partition_count(name.as_str(), 4))
            .collect();
        assert_eq!(topics.len(), 2);

        let strategy = StrategyRegistry::default().get("range").unwrap();
        let group = strategy.assign(&members, &topics).unwrap();
        let shares = decode_all(&group);

        assert_eq!(shares[0].partitions_for("topic-a"), vec![0, 1]);
        assert_eq!(shares[1].partitions_for("topic-a"), vec![2, 3]);
        assert_eq!(shares[0].partitions_for("topic-b"), vec![0, 1]);
        assert_eq!(shares[1].partitions_for("topic-b"), vec![2, 3]);
    }

    #[test]
    fn test_no_partition_overlap() {
        let members = make_members(vec![
            ("member-1", vec!["topic-a"]),
            ("member-2", vec!["topic-a"]),
            ("member-3", vec!["topic-a"]),
        ]);
        let topics = vec![make_topic("topic-a", &[9, 3, 7, 1, 0, 2, 8, 6, 4, 5])];

        let strategy = StrategyRegistry::default().get("range").unwrap();
        let group = strategy.assign(&members, &topics).unwrap();

        let mut seen = BTreeSet::new();
        for share in decode_all(&group) {
            for p in share.partitions {
                assert!(seen.insert(p.partition), "partition {} assigned twice", p.partition);
            }
        }
        assert_eq!(seen, (0..10).collect::<BTreeSet<i32>>());
    }

    #[test]
    fn test_every_member_present_even_without_partitions() {
        let members = make_members(vec![
            ("member-1", vec!["topic-a"]),
            ("member-2", vec!["topic-a"]),
            ("member-3", vec!["topic-a"]),
        ]);
        let topics = vec![make_topic("topic-a", &[0])];

        let strategy = StrategyRegistry::default().get("range").unwrap();
        let group = strategy.assign(&members, &topics).unwrap();

        let ids: Vec<&str> = group.iter().map(|e| e.member_id.as_str()).collect();
        assert_eq!(ids, vec!["member-1", "member-2", "member-3"]);

        let shares = decode_all(&group);
        assert_eq!(shares[0].partitions_for("topic-a"), vec![0]);
        assert!(shares[1].is_empty());
        assert!(shares[2].is_empty());
    }

    #[test]
    fn test_group_assignment_wire_roundtrip() {
        let members = make_members(vec![("member-1", vec!["t"]), ("member-2", vec!["t"])]);
        let topics = vec![make_topic("t", &[0, 1, 2])];

        let strategy = StrategyRegistry::default().get("range").unwrap();
        let group = strategy.assign(&members, &topics).unwrap();

        let parsed = GroupAssignment::parse(&group.encode().unwrap()).unwrap();
        assert_eq!(parsed, group);
    }

    #[test]
    fn test_assignment_is_deterministic_across_input_orderings() {
        let members = make_members(vec![("m1", vec!["t"]), ("m2", vec!["t"])]);
        let shuffled = vec![make_topic("t", &[5, 1, 4, 0, 3, 2])];
        let sorted = vec![make_topic("t", &[0, 1, 2, 3, 4, 5])];

        let strategy = StrategyRegistry::default().get("range").unwrap();
        let a = strategy.assign(&members, &shuffled).unwrap();
        let b = strategy.assign(&members, &sorted).unwrap();

        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
    }
}
