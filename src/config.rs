// Store configuration

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::latency::Operation;

// How list_bookings_for_user treats a booking whose destination is gone
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentPolicy {
    // Fail the whole listing with NotFound
    #[default]
    Propagate,
    // Drop the booking from the listing
    Skip,
    // Keep the booking with no destination attached
    MarkUnavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    // Multiplier applied to every operation's base delay
    pub scale: f64,
    // 0.0 gives fixed delays, 0.2 spreads them +/-10% around the base
    pub jitter_factor: f64,
    // Replaces the built-in base delay of the listed operations
    pub base_delays_ms: HashMap<Operation, u64>,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1.0,
            jitter_factor: 0.0,
            base_delays_ms: HashMap::new(),
        }
    }
}

impl LatencyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_base_delay(mut self, operation: Operation, ms: u64) -> Self {
        self.base_delays_ms.insert(operation, ms);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub latency: LatencyConfig,
    pub enrichment_policy: EnrichmentPolicy,
    // Reject reviews and bookings pointing at unknown destinations
    pub enforce_references: bool,
}

impl StoreConfig {
    // No simulated latency; what tests and benchmarks want
    pub fn instant() -> Self {
        Self {
            latency: LatencyConfig::disabled(),
            ..Self::default()
        }
    }

    pub fn with_enrichment_policy(mut self, policy: EnrichmentPolicy) -> Self {
        self.enrichment_policy = policy;
        self
    }

    pub fn with_enforced_references(mut self) -> Self {
        self.enforce_references = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: StoreConfig = serde_json::from_value(serde_json::json!({
            "enrichment_policy": "mark-unavailable",
            "latency": { "scale": 0.5 }
        }))
        .unwrap();

        assert_eq!(config.enrichment_policy, EnrichmentPolicy::MarkUnavailable);
        assert!(config.latency.enabled);
        assert_eq!(config.latency.scale, 0.5);
        assert!(!config.enforce_references);
        assert!(config.latency.base_delays_ms.is_empty());
    }

    #[test]
    fn test_base_delay_overrides_keyed_by_operation_name() {
        let config: LatencyConfig = serde_json::from_value(serde_json::json!({
            "base_delays_ms": {
                "list_reviews_for_destination": 50,
                "login": 0
            }
        }))
        .unwrap();

        assert_eq!(config.base_delays_ms.len(), 2);
        assert_eq!(config.base_delays_ms[&Operation::ListReviews], 50);
        assert_eq!(config.base_delays_ms[&Operation::Login], 0);
    }
}
