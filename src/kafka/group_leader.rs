//! Leader-side glue between the group protocol and the assignment strategies
//!
//! The JoinGroup/SyncGroup exchange itself is driven by the caller's
//! transport. This module only translates:
//!
//! - `JoinGroupResponse` -> ordered `Member` list (and the topics they want)
//! - `MetadataResponse`  -> `TopicMetadata` snapshot
//! - `GroupAssignment`   -> `SyncGroupRequest` (and its size-prefixed frame)
//!
//! A failed round (any error returned here) must not be followed by a
//! SyncGroup carrying a partial assignment; the caller rejoins and retries on
//! the next rebalance trigger.

use std::sync::Arc;

use bytes::{BufMut, Bytes, BytesMut};
use kafka_protocol::messages::join_group_response::JoinGroupResponse;
use kafka_protocol::messages::metadata_response::MetadataResponse;
use kafka_protocol::messages::sync_group_request::SyncGroupRequest;
use kafka_protocol::messages::{GroupId, RequestHeader};
use kafka_protocol::protocol::{Encodable, StrBytes};
use tracing::{debug, info, warn};

use crate::kafka::assignment::{subscribed_topics, GroupAssignment, Member, MemberSubscription};
use crate::kafka::constants::{
    sync_group_request_header_version, API_KEY_SYNC_GROUP, CONSUMER_PROTOCOL_TYPE,
};
use crate::kafka::context::RuntimeContext;
use crate::kafka::error::{KafkaError, Result};
use crate::kafka::metadata::topics_from_metadata_response;

/// First SyncGroup version with group_instance_id
const SYNC_GROUP_INSTANCE_ID_VERSION: i16 = 3;

/// First SyncGroup version with protocol_type / protocol_name
const SYNC_GROUP_PROTOCOL_VERSION: i16 = 5;

/// Translates group protocol messages for one consumer
pub struct GroupLeader {
    ctx: Arc<RuntimeContext>,
}

impl GroupLeader {
    pub fn new(ctx: Arc<RuntimeContext>) -> Self {
        Self { ctx }
    }

    /// Protocols to advertise in JoinGroup: (strategy name, encoded subscription)
    ///
    /// Every configured strategy carries the same subscription, in preference order.
    pub fn join_group_protocols(&self, topics: &[String]) -> Result<Vec<(String, Bytes)>> {
        let metadata = MemberSubscription::new(topics.to_vec()).encode()?;
        Ok(self
            .ctx
            .config()
            .assignment_strategies
            .iter()
            .map(|name| (name.to_lowercase(), metadata.clone()))
            .collect())
    }

    /// Whether this client was elected leader in the given JoinGroup response
    pub fn is_leader(join: &JoinGroupResponse) -> bool {
        !join.member_id.is_empty() && join.leader == join.member_id
    }

    /// Members listed in a leader's JoinGroup response, in response order
    pub fn members(join: &JoinGroupResponse) -> Vec<Member> {
        join.members.iter().map(Member::from).collect()
    }

    /// Topics the leader must fetch metadata for before assigning
    pub fn topics_to_fetch(join: &JoinGroupResponse) -> Result<Vec<String>> {
        subscribed_topics(&Self::members(join))
    }

    /// Run the selected strategy over the JoinGroup members and the metadata snapshot
    pub fn assign(
        &self,
        join: &JoinGroupResponse,
        metadata: &MetadataResponse,
    ) -> Result<GroupAssignment> {
        let config = self.ctx.config();
        let strategy = self.ctx.registry().select(
            join.protocol_name.as_deref(),
            &config.assignment_strategies,
        )?;

        let members = Self::members(join);
        let topics = topics_from_metadata_response(metadata);

        info!(
            group_id = %config.group_id,
            generation_id = join.generation_id,
            strategy = strategy.name(),
            members = members.len(),
            topics = topics.len(),
            "Computing group assignment"
        );

        let assignment = strategy.assign(&members, &topics).map_err(|e| {
            warn!(group_id = %config.group_id, "Group assignment failed: {}", e);
            e
        })?;

        debug!(entries = assignment.len(), "Group assignment complete");
        Ok(assignment)
    }

    /// SyncGroup request carrying `assignment`
    ///
    /// Followers pass an empty assignment.
    pub fn sync_group_request(
        &self,
        join: &JoinGroupResponse,
        assignment: &GroupAssignment,
    ) -> SyncGroupRequest {
        let config = self.ctx.config();

        let mut request = SyncGroupRequest::default();
        request.group_id = GroupId(StrBytes::from_string(config.group_id.clone()));
        request.generation_id = join.generation_id;
        request.member_id = join.member_id.clone();

        if config.sync_group_version >= SYNC_GROUP_INSTANCE_ID_VERSION {
            request.group_instance_id = config
                .group_instance_id
                .clone()
                .map(StrBytes::from_string);
        } else if config.group_instance_id.is_some() {
            warn!(
                version = config.sync_group_version,
                "SyncGroup version does not support group_instance_id, omitting it"
            );
        }

        if config.sync_group_version >= SYNC_GROUP_PROTOCOL_VERSION {
            request.protocol_type = Some(StrBytes::from_string(CONSUMER_PROTOCOL_TYPE.to_string()));
            request.protocol_name = join.protocol_name.clone();
        }

        request.assignments = assignment.to_sync_group_assignments();
        request
    }

    /// Full leader/follower step for one round
    ///
    /// The leader computes the assignment; followers send an empty one and
    /// wait for the coordinator to hand them their share.
    pub fn perform_assignment(
        &self,
        join: &JoinGroupResponse,
        metadata: &MetadataResponse,
    ) -> Result<SyncGroupRequest> {
        let assignment = if Self::is_leader(join) {
            self.assign(join, metadata)?
        } else {
            debug!(member_id = %join.member_id, "Follower, sending empty assignment");
            GroupAssignment::new()
        };

        Ok(self.sync_group_request(join, &assignment))
    }

    /// Encode a SyncGroup request body at the configured API version
    pub fn encode_sync_group_request(&self, request: &SyncGroupRequest) -> Result<BytesMut> {
        let mut buf = BytesMut::new();
        request.encode(&mut buf, self.ctx.config().sync_group_version)?;
        Ok(buf)
    }

    /// Request header for a SyncGroup call, carrying the configured client id
    pub fn sync_group_request_header(&self, correlation_id: i32) -> RequestHeader {
        let config = self.ctx.config();

        let mut header = RequestHeader::default();
        header.request_api_key = API_KEY_SYNC_GROUP;
        header.request_api_version = config.sync_group_version;
        header.correlation_id = correlation_id;
        header.client_id = Some(StrBytes::from_string(config.client_id.clone()));
        header
    }

    /// Complete SyncGroup frame ready for the socket
    ///
    /// ```text
    /// Size           int32 (bytes that follow)
    /// RequestHeader  v1, or v2 for flexible SyncGroup versions
    /// SyncGroupRequest body
    /// ```
    pub fn encode_sync_group_frame(
        &self,
        correlation_id: i32,
        request: &SyncGroupRequest,
    ) -> Result<BytesMut> {
        let version = self.ctx.config().sync_group_version;
        let header = self.sync_group_request_header(correlation_id);

        let mut buf = BytesMut::new();
        buf.put_i32(0); // size, patched below
        header.encode(&mut buf, sync_group_request_header_version(version))?;
        request.encode(&mut buf, version)?;

        let size = i32::try_from(buf.len() - 4).map_err(|_| {
            KafkaError::Encoding(format!("SyncGroup frame of {} bytes too large", buf.len()))
        })?;
        buf[..4].copy_from_slice(&size.to_be_bytes());

        debug!(correlation_id, size, "Encoded SyncGroup frame");
        Ok(buf)
    }
}
