// Wire-level tests for the consumer protocol payloads
//
// These tests pin the exact bytes of MemberAssignment and GroupAssignment
// and check that the SyncGroup request built by the leader survives a
// kafka-protocol encode/decode cycle with every member's payload intact.

#[cfg(test)]
mod encoding_tests {
    use std::sync::Arc;

    use bytes::{BufMut, Bytes};
    use kafka_assignor::kafka::assignment::{
        AssignmentStrategy, GroupAssignment, Member, MemberAssignment, RangeStrategy,
    };
    use kafka_assignor::kafka::metadata::TopicMetadata;
    use kafka_assignor::kafka::{GroupLeader, KafkaError, RuntimeContext};
    use kafka_assignor::Config;
    use kafka_protocol::messages::join_group_response::{JoinGroupResponse, JoinGroupResponseMember};
    use kafka_protocol::messages::metadata_response::{
        MetadataResponse, MetadataResponsePartition, MetadataResponseTopic,
    };
    use kafka_protocol::messages::sync_group_request::SyncGroupRequest;
    use kafka_protocol::messages::TopicName;
    use kafka_protocol::protocol::{Decodable, StrBytes};

    #[test]
    fn test_member_assignment_bytes_for_two_topics() {
        let members = vec![Member::new("m0"), Member::new("m1")];
        let topics = vec![
            TopicMetadata::with_partition_count("a", 3),
            TopicMetadata::with_partition_count("b", 4),
        ];

        let group = RangeStrategy::new().assign(&members, &topics).unwrap();

        // Member 0: a -> [0, 1], b -> [0, 1]
        let mut expected = Vec::new();
        expected.put_i16(0); // version
        expected.put_i32(2); // two topic blocks
        expected.put_i16(1);
        expected.put_slice(b"a");
        expected.put_i32(2);
        expected.put_i32(0);
        expected.put_i32(1);
        expected.put_i16(1);
        expected.put_slice(b"b");
        expected.put_i32(2);
        expected.put_i32(0);
        expected.put_i32(1);
        expected.put_i32(0); // empty user data

        assert_eq!(group.get("m0").unwrap().as_ref(), expected.as_slice());

        let m1 = MemberAssignment::parse(group.get("m1").unwrap()).unwrap();
        assert_eq!(m1.partitions_for("a"), vec![2]);
        assert_eq!(m1.partitions_for("b"), vec![2, 3]);
    }

    #[test]
    fn test_member_with_no_partitions_encodes_empty_list() {
        let members = vec![Member::new("m0"), Member::new("m1")];
        let topics = vec![TopicMetadata::with_partition_count("a", 1)];

        let group = RangeStrategy::new().assign(&members, &topics).unwrap();

        let mut expected = Vec::new();
        expected.put_i16(0);
        expected.put_i32(0);
        expected.put_i32(0);
        assert_eq!(group.get("m1").unwrap().as_ref(), expected.as_slice());
    }

    #[test]
    fn test_group_assignment_layout() {
        let mut group = GroupAssignment::new();
        group.push("leader", Bytes::from_static(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0]));

        let encoded = group.encode().unwrap();
        assert_eq!(&encoded[..4], &[0, 0, 0, 1]); // one member
        assert_eq!(&encoded[4..6], &[0, 6]); // member id length
        assert_eq!(&encoded[6..12], b"leader");
        assert_eq!(&encoded[12..16], &[0, 0, 0, 10]); // assignment length
        assert_eq!(encoded.len(), 16 + 10);
    }

    #[test]
    fn test_oversized_topic_name_returns_no_assignment() {
        let members = vec![Member::new("m0")];
        let topics = vec![
            TopicMetadata::with_partition_count("fine", 2),
            TopicMetadata::with_partition_count("x".repeat(40_000), 1),
        ];

        let result = RangeStrategy::new().assign(&members, &topics);
        assert!(matches!(result, Err(KafkaError::Encoding(_))));
    }

    #[test]
    fn test_sync_group_request_survives_kafka_protocol_roundtrip() {
        let ctx = RuntimeContext::with_defaults(Config::new("payments")).unwrap();
        let leader = GroupLeader::new(Arc::new(ctx));

        let mut join = JoinGroupResponse::default();
        join.generation_id = 3;
        join.protocol_name = Some(StrBytes::from_string("range".to_string()));
        join.leader = StrBytes::from_string("m0".to_string());
        join.member_id = StrBytes::from_string("m0".to_string());
        for id in ["m0", "m1", "m2"] {
            let mut member = JoinGroupResponseMember::default();
            member.member_id = StrBytes::from_string(id.to_string());
            join.members.push(member);
        }

        let mut metadata = MetadataResponse::default();
        let mut topic = MetadataResponseTopic::default();
        topic.name = Some(TopicName(StrBytes::from_string("orders".to_string())));
        for id in [4, 3, 2, 1, 0] {
            let mut partition = MetadataResponsePartition::default();
            partition.partition_index = id;
            topic.partitions.push(partition);
        }
        metadata.topics.push(topic);

        let request = leader.perform_assignment(&join, &metadata).unwrap();
        let mut encoded = leader.encode_sync_group_request(&request).unwrap().freeze();
        let decoded = SyncGroupRequest::decode(&mut encoded, 5).unwrap();

        assert_eq!(decoded.generation_id, 3);
        assert_eq!(decoded.assignments.len(), 3);

        let expected = [vec![0, 1], vec![2, 3], vec![4]];
        for (entry, partitions) in decoded.assignments.iter().zip(expected) {
            let share = MemberAssignment::parse(&entry.assignment).unwrap();
            assert_eq!(share.partitions_for("orders"), partitions);
        }
    }
}
