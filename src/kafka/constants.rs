//! Kafka protocol constants
//!
//! This module centralizes the magic numbers used by the assignment subsystem:
//! consumer protocol versions, protocol/strategy names, wire limits, error codes
//! and configuration defaults/bounds.

// ===== Consumer Protocol =====
// The "consumer" embedded protocol carried inside JoinGroup metadata and
// SyncGroup assignments.
// See: https://kafka.apache.org/protocol.html#The_Messages_JoinGroup

/// Protocol type advertised by consumer group members in JoinGroup
pub const CONSUMER_PROTOCOL_TYPE: &str = "consumer";

/// Version written into every `MemberAssignment` built by this crate
pub const ASSIGNMENT_VERSION: i16 = 0;

/// Version written into `MemberSubscription` payloads built by this crate
pub const SUBSCRIPTION_VERSION: i16 = 0;

/// Protocol name of the range assignment strategy
pub const STRATEGY_RANGE: &str = "range";

// ===== Wire Limits =====

/// Longest string encodable with an int16 length prefix
pub const MAX_STRING_LENGTH: usize = i16::MAX as usize;

/// Length written for a null `bytes` field
pub const NULL_BYTES_LENGTH: i32 = -1;

// ===== API Keys =====

/// API key for SyncGroup requests
///
/// The leader's SyncGroup request carries the encoded group assignment
pub const API_KEY_SYNC_GROUP: i16 = 14;

/// First SyncGroup version using the flexible (compact, tagged) encoding
pub const SYNC_GROUP_FIRST_FLEXIBLE_VERSION: i16 = 4;

/// Request header version for a SyncGroup request at `api_version`
///
/// Flexible versions use header v2 (tagged fields), older ones header v1.
pub fn sync_group_request_header_version(api_version: i16) -> i16 {
    if api_version >= SYNC_GROUP_FIRST_FLEXIBLE_VERSION {
        2
    } else {
        1
    }
}

// ===== Kafka Error Codes =====
// See: https://kafka.apache.org/protocol.html#protocol_error_codes

/// No error
pub const ERROR_NONE: i16 = 0;

/// Unknown server error
pub const ERROR_UNKNOWN_SERVER_ERROR: i16 = -1;

/// Corrupt message (payload could not be decoded)
pub const ERROR_CORRUPT_MESSAGE: i16 = 2;

/// Unknown topic or partition
pub const ERROR_UNKNOWN_TOPIC_OR_PARTITION: i16 = 3;

/// Members do not share a common assignment protocol
pub const ERROR_INCONSISTENT_GROUP_PROTOCOL: i16 = 23;

/// Invalid configuration supplied by the client
pub const ERROR_INVALID_CONFIG: i16 = 40;

// ===== Configuration Defaults =====

/// Client ID used when none is configured
pub const DEFAULT_CLIENT_ID: &str = "kafka-assignor";

/// Strategy preference list used when none is configured
pub const DEFAULT_ASSIGNMENT_STRATEGIES: &[&str] = &[STRATEGY_RANGE];

/// SyncGroup API version used when encoding the leader's request
///
/// v5 is the first version carrying protocol_type and protocol_name
pub const DEFAULT_SYNC_GROUP_VERSION: i16 = 5;

/// Minimum supported SyncGroup API version
pub const MIN_SYNC_GROUP_VERSION: i16 = 0;

/// Maximum supported SyncGroup API version
pub const MAX_SYNC_GROUP_VERSION: i16 = 5;
