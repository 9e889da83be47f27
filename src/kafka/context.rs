//! Runtime context for shared configuration and strategies
//!
//! The group leader needs two things besides the per-round inputs: its
//! configuration and the set of assignment strategies it can run. Both live
//! here and the context is passed explicitly to whoever drives a rebalance,
//! so tests and multiple clients in one process never share ambient state.

use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::Config;
use crate::kafka::assignment::StrategyRegistry;
use crate::kafka::error::{KafkaError, Result};

/// Shared configuration plus strategy registry
///
/// Uses Arc<Config> internally so that handing the current configuration to
/// a rebalance round is a single pointer copy. Replacing the configuration
/// acquires the write lock briefly to swap the Arc.
///
/// # Usage
///
/// ```rust,ignore
/// let ctx = Arc::new(RuntimeContext::new(Config::new("payments"), StrategyRegistry::default())?);
///
/// // Each rebalance round takes a snapshot
/// let cfg = ctx.config();
/// let strategy = ctx.registry().get(&cfg.assignment_strategies[0])?;
/// ```
pub struct RuntimeContext {
    config: RwLock<Arc<Config>>,
    registry: Arc<StrategyRegistry>,
}

impl RuntimeContext {
    /// Create a new runtime context, rejecting configs that name unknown strategies
    pub fn new(config: Config, registry: StrategyRegistry) -> Result<Self> {
        check_config(&config, &registry)?;
        Ok(Self {
            config: RwLock::new(Arc::new(config)),
            registry: Arc::new(registry),
        })
    }

    /// Context with the built-in strategies registered
    pub fn with_defaults(config: Config) -> Result<Self> {
        Self::new(config, StrategyRegistry::default())
    }

    /// Get current config (cheap Arc clone - single pointer copy)
    pub fn config(&self) -> Arc<Config> {
        self.config.read().clone()
    }

    pub fn registry(&self) -> Arc<StrategyRegistry> {
        self.registry.clone()
    }

    /// Swap in a new configuration
    ///
    /// Existing config references remain valid (Arc keeps them alive) but
    /// keep pointing at the old values. The current config is left untouched
    /// when the new one fails validation.
    pub fn update_config(&self, config: Config) -> Result<()> {
        check_config(&config, &self.registry)?;
        *self.config.write() = Arc::new(config);
        Ok(())
    }
}

fn check_config(config: &Config, registry: &StrategyRegistry) -> Result<()> {
    config.validate()?;

    if let Some(unknown) = config
        .assignment_strategies
        .iter()
        .find(|name| !registry.contains(name))
    {
        return Err(KafkaError::InvalidConfig(format!(
            "assignment strategy '{}' is not registered",
            unknown
        )));
    }

    Ok(())
}
