//! Group members as seen by the leader
//!
//! The leader learns the member list from its JoinGroup response: each entry
//! carries the member id and the protocol metadata (a serialized
//! `MemberSubscription`) the member sent for the selected strategy.

use bytes::Bytes;
use kafka_protocol::messages::join_group_response::JoinGroupResponseMember;

use super::subscription::MemberSubscription;
use crate::kafka::error::Result;

/// A consumer group participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member id assigned by the coordinator
    pub member_id: String,

    /// Raw subscription metadata for the selected protocol, if any
    pub metadata: Option<Bytes>,
}

impl Member {
    pub fn new(member_id: impl Into<String>) -> Self {
        Self {
            member_id: member_id.into(),
            metadata: None,
        }
    }

    pub fn with_subscription(
        member_id: impl Into<String>,
        subscription: &MemberSubscription,
    ) -> Result<Self> {
        Ok(Self {
            member_id: member_id.into(),
            metadata: Some(subscription.encode()?),
        })
    }

    /// Decode the member's subscription metadata
    ///
    /// Returns `None` when the member sent no metadata.
    pub fn subscription(&self) -> Result<Option<MemberSubscription>> {
        self.metadata
            .as_deref()
            .filter(|bytes| !bytes.is_empty())
            .map(MemberSubscription::parse)
            .transpose()
    }
}

impl From<&JoinGroupResponseMember> for Member {
    fn from(member: &JoinGroupResponseMember) -> Self {
        Self {
            member_id: member.member_id.to_string(),
            metadata: if member.metadata.is_empty() {
                None
            } else {
                Some(member.metadata.clone())
            },
        }
    }
}

/// Sorted, de-duplicated union of every member's subscribed topics
///
/// Tells the leader which topics to request metadata for before assigning.
pub fn subscribed_topics(members: &[Member]) -> Result<Vec<String>> {
    let mut topics = Vec::new();
    for member in members {
        if let Some(subscription) = member.subscription()? {
            topics.extend(subscription.topics);
        }
    }
    topics.sort();
    topics.dedup();
    Ok(topics)
}
