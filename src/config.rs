// Configuration module for the group leader
//
// The assignment core has no files, flags or environment variables of its own.
// The settings below describe how the leader negotiates a strategy and how it
// addresses the coordinator, and are handed around explicitly through
// `RuntimeContext` rather than read from process-wide state.

use crate::kafka::constants::{
    DEFAULT_ASSIGNMENT_STRATEGIES, DEFAULT_CLIENT_ID, DEFAULT_SYNC_GROUP_VERSION,
    MAX_SYNC_GROUP_VERSION, MIN_SYNC_GROUP_VERSION,
};
use crate::kafka::error::{KafkaError, Result};

/// Configuration struct holding the group leader settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Client identifier reported to the brokers
    pub client_id: String,
    /// Consumer group this client belongs to
    pub group_id: String,
    /// Static membership instance id (KIP-345), if any
    pub group_instance_id: Option<String>,
    /// Assignment strategies in order of preference (e.g. ["range"])
    pub assignment_strategies: Vec<String>,
    /// SyncGroup API version used when encoding the leader's request
    pub sync_group_version: i16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            group_id: String::new(),
            group_instance_id: None,
            assignment_strategies: DEFAULT_ASSIGNMENT_STRATEGIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sync_group_version: DEFAULT_SYNC_GROUP_VERSION,
        }
    }
}

impl Config {
    /// Create a configuration for the given consumer group with default settings
    pub fn new(group_id: impl Into<String>) -> Self {
        Config {
            group_id: group_id.into(),
            ..Default::default()
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_group_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.group_instance_id = Some(instance_id.into());
        self
    }

    /// Replace the strategy preference list (names are matched case-insensitively)
    pub fn with_assignment_strategies<I, S>(mut self, strategies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.assignment_strategies = strategies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sync_group_version(mut self, version: i16) -> Self {
        self.sync_group_version = version;
        self
    }

    /// Check every setting, returning `InvalidConfig` for the first bad value
    pub fn validate(&self) -> Result<()> {
        if self.group_id.trim().is_empty() {
            return Err(KafkaError::InvalidConfig(
                "group_id must not be empty".to_string(),
            ));
        }

        if self.assignment_strategies.is_empty() {
            return Err(KafkaError::InvalidConfig(
                "assignment_strategies must name at least one strategy".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for name in &self.assignment_strategies {
            let normalized = name.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(KafkaError::InvalidConfig(
                    "assignment strategy names must not be empty".to_string(),
                ));
            }
            if !seen.insert(normalized) {
                return Err(KafkaError::InvalidConfig(format!(
                    "assignment strategy '{}' listed more than once",
                    name
                )));
            }
        }

        if !(MIN_SYNC_GROUP_VERSION..=MAX_SYNC_GROUP_VERSION).contains(&self.sync_group_version) {
            return Err(KafkaError::InvalidConfig(format!(
                "sync_group_version {} outside supported range {}..={}",
                self.sync_group_version, MIN_SYNC_GROUP_VERSION, MAX_SYNC_GROUP_VERSION
            )));
        }

        Ok(())
    }
}
