// End-to-end rebalance scenarios through the public API
//
// Each test resolves the strategy through the registry the way a rebalance
// driver would, runs it, and decodes every member's payload.

#[cfg(test)]
mod assignment_scenarios {
    use kafka_assignor::kafka::assignment::{GroupAssignment, Member, MemberAssignment};
    use kafka_assignor::kafka::metadata::{PartitionMetadataInfo, TopicMetadata};
    use kafka_assignor::kafka::{KafkaError, StrategyRegistry};

    fn members(ids: &[&str]) -> Vec<Member> {
        ids.iter().map(|id| Member::new(*id)).collect()
    }

    fn topic(name: &str, ids: &[i32]) -> TopicMetadata {
        TopicMetadata::new(
            name,
            ids.iter().copied().map(PartitionMetadataInfo::new).collect(),
        )
    }

    fn run(members: &[Member], topics: &[TopicMetadata]) -> Result<GroupAssignment, KafkaError> {
        StrategyRegistry::default()
            .get("range")?
            .assign(members, topics)
    }

    fn share(group: &GroupAssignment, member_id: &str) -> MemberAssignment {
        MemberAssignment::parse(group.get(member_id).unwrap()).unwrap()
    }

    #[test]
    fn test_three_members_five_partitions() {
        let group = run(&members(&["a", "b", "c"]), &[topic("t", &[0, 1, 2, 3, 4])]).unwrap();

        assert_eq!(share(&group, "a").partitions_for("t"), vec![0, 1]);
        assert_eq!(share(&group, "b").partitions_for("t"), vec![2, 3]);
        assert_eq!(share(&group, "c").partitions_for("t"), vec![4]);
    }

    #[test]
    fn test_five_members_ten_partitions() {
        let ids = ["m0", "m1", "m2", "m3", "m4"];
        let group = run(&members(&ids), &[TopicMetadata::with_partition_count("t", 10)]).unwrap();

        for (i, id) in ids.iter().enumerate() {
            let start = 2 * i as i32;
            assert_eq!(share(&group, id).partitions_for("t"), vec![start, start + 1]);
        }
    }

    #[test]
    fn test_single_member_receives_everything() {
        let topics = vec![topic("x", &[3, 1, 0, 2]), topic("y", &[1, 0])];
        let group = run(&members(&["only"]), &topics).unwrap();

        let only = share(&group, "only");
        assert_eq!(only.partitions_for("x"), vec![0, 1, 2, 3]);
        assert_eq!(only.partitions_for("y"), vec![0, 1]);
        assert_eq!(only.partition_count(), 6);
    }

    #[test]
    fn test_two_topics_keep_supplied_order() {
        let topics = vec![topic("A", &[2, 0, 1]), topic("B", &[1, 3, 0, 2])];
        let group = run(&members(&["m0", "m1"]), &topics).unwrap();

        let m0 = share(&group, "m0");
        assert_eq!(m0.topics(), vec!["A", "B"]);
        assert_eq!(m0.partitions_for("A"), vec![0, 1]);
        assert_eq!(m0.partitions_for("B"), vec![0, 1]);

        let m1 = share(&group, "m1");
        assert_eq!(m1.partitions_for("A"), vec![2]);
        assert_eq!(m1.partitions_for("B"), vec![2, 3]);
    }

    #[test]
    fn test_duplicate_partition_id_fails() {
        let result = run(&members(&["m0", "m1"]), &[topic("t", &[0, 1, 2, 2])]);
        assert!(matches!(
            result,
            Err(KafkaError::InvalidPartitionMetadata { .. })
        ));
    }

    #[test]
    fn test_no_members_fails() {
        let result = run(&[], &[topic("t", &[0])]);
        assert!(matches!(result, Err(KafkaError::InvalidMemberCount)));
    }
}
