use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::notification::DispatchPolicy;

// ============================================================================
// Configuration
// ============================================================================

/// Raised while resolving names handed in by the caller, before any
/// processor is constructed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown order tier: {0}")]
    UnknownTier(String),

    #[error("Invalid payment method: {0}")]
    UnknownPaymentMethod(String),

    #[error("Unknown dispatch policy: {0}")]
    UnknownDispatchPolicy(String),
}

pub const DISPATCH_POLICY_ENV: &str = "ORDER_FLOW_DISPATCH_POLICY";
pub const LOG_FILTER_ENV: &str = "ORDER_FLOW_LOG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// How the notification bus treats a failing subscriber
    pub dispatch_policy: DispatchPolicy,
    /// Fallback `tracing` filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            dispatch_policy: DispatchPolicy::FailFast,
            log_filter: "info,order_flow=debug".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Deliver to every subscriber even when some of them fail.
    pub fn lenient() -> Self {
        Self {
            dispatch_policy: DispatchPolicy::ContinueOnError,
            ..Self::default()
        }
    }

    /// Defaults overlaid with `ORDER_FLOW_DISPATCH_POLICY` and `ORDER_FLOW_LOG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(policy) = lookup(DISPATCH_POLICY_ENV) {
            config.dispatch_policy = DispatchPolicy::from_str(&policy)?;
        }
        if let Some(filter) = lookup(LOG_FILTER_ENV) {
            config.log_filter = filter;
        }

        Ok(config)
    }
}
