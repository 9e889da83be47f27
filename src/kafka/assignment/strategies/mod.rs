//! Assignment Strategy Module
//!
//! This module defines the `AssignmentStrategy` trait and the registry that
//! maps protocol-level strategy names to implementations.
//!
//! - **Range**: Assigns contiguous partition ranges to members (built in)
//!
//! Further strategies (round-robin, sticky, ...) plug in by implementing the
//! trait and calling [`StrategyRegistry::register`]; the group leader looks
//! strategies up by the protocol name the coordinator selected, so call sites
//! never change when a strategy is added.

pub mod range;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use super::group_assignment::GroupAssignment;
use super::member::Member;
use crate::kafka::error::{KafkaError, Result};
use crate::kafka::metadata::TopicMetadata;

pub use range::{range_counts, RangeStrategy};

/// Trait for partition assignment strategies
///
/// Implementations must be thread-safe (Send + Sync) so one registry can be
/// shared by every consumer in the process.
pub trait AssignmentStrategy: Send + Sync {
    /// Strategy name (must match protocol name from JoinGroup, e.g., "range")
    fn name(&self) -> &'static str;

    /// Compute the group assignment for one rebalance round
    ///
    /// Must be a pure function of its inputs: the same ordered members and
    /// topics always yield byte-identical output, and neither input is
    /// modified.
    ///
    /// # Errors
    /// * `InvalidMemberCount` - `members` is empty
    /// * `InvalidPartitionMetadata` - a topic has duplicate or negative partition ids
    /// * `Encoding` - a member's assignment could not be serialized
    fn assign(&self, members: &[Member], topics: &[TopicMetadata]) -> Result<GroupAssignment>;
}

/// Protocol name -> strategy lookup
///
/// Names are matched case-insensitively.
#[derive(Clone)]
pub struct StrategyRegistry {
    strategies: BTreeMap<String, Arc<dyn AssignmentStrategy>>,
}

impl Default for StrategyRegistry {
    /// Registry with the built-in strategies
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(RangeStrategy::new()));
        registry
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("strategies", &self.names())
            .finish()
    }
}

impl StrategyRegistry {
    /// Registry without any strategies
    pub fn empty() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Register a strategy under its `name()`, replacing any previous one
    pub fn register(&mut self, strategy: Arc<dyn AssignmentStrategy>) {
        let name = strategy.name().to_lowercase();
        debug!(strategy = %name, "Registering assignment strategy");
        self.strategies.insert(name, strategy);
    }

    /// Look up a strategy by protocol name
    pub fn get(&self, name: &str) -> Result<Arc<dyn AssignmentStrategy>> {
        self.strategies
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| KafkaError::UnknownStrategy(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(&name.to_lowercase())
    }

    /// Registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    /// Resolve the strategy the leader must run
    ///
    /// `selected` is the protocol name the coordinator picked (from the
    /// JoinGroup response). It has to be one of the `preference` names this
    /// client advertised, otherwise the group and the client disagree and the
    /// round fails with `NoCommonStrategy`. Without a selection the first
    /// registered name in `preference` is used.
    pub fn select(
        &self,
        selected: Option<&str>,
        preference: &[String],
    ) -> Result<Arc<dyn AssignmentStrategy>> {
        match selected {
            Some(name) => {
                if !preference.iter().any(|p| p.eq_ignore_ascii_case(name)) {
                    return Err(KafkaError::NoCommonStrategy);
                }
                self.get(name)
            }
            None => preference
                .iter()
                .find(|name| self.contains(name))
                .map(|name| self.get(name))
                .unwrap_or(Err(KafkaError::NoCommonStrategy)),
        }
    }
}
