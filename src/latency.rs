// Simulated service latency. Every store operation sleeps for its base delay
// (scaled, optionally jittered) before touching the collections.

use std::{
    collections::HashMap,
    fmt,
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::config::LatencyConfig;

// Serialized under the same names `Operation::name` returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ListDestinations,
    GetDestination,
    CreateDestination,
    UpdateDestination,
    DeleteDestination,
    #[serde(rename = "list_reviews_for_destination")]
    ListReviews,
    CreateReview,
    UpdateReview,
    DeleteReview,
    #[serde(rename = "list_bookings_for_user")]
    ListBookings,
    CreateBooking,
    UpdateBooking,
    DeleteBooking,
    Login,
    Register,
}

impl Operation {
    // Built-in delay, used unless the config overrides it
    pub fn base_delay_ms(&self) -> u64 {
        match self {
            Operation::ListReviews => 500,
            Operation::ListDestinations
            | Operation::GetDestination
            | Operation::CreateReview
            | Operation::UpdateReview
            | Operation::DeleteReview
            | Operation::ListBookings => 800,
            Operation::CreateDestination
            | Operation::UpdateDestination
            | Operation::DeleteDestination
            | Operation::CreateBooking
            | Operation::UpdateBooking
            | Operation::DeleteBooking
            | Operation::Login
            | Operation::Register => 1000,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::ListDestinations => "list_destinations",
            Operation::GetDestination => "get_destination",
            Operation::CreateDestination => "create_destination",
            Operation::UpdateDestination => "update_destination",
            Operation::DeleteDestination => "delete_destination",
            Operation::ListReviews => "list_reviews_for_destination",
            Operation::CreateReview => "create_review",
            Operation::UpdateReview => "update_review",
            Operation::DeleteReview => "delete_review",
            Operation::ListBookings => "list_bookings_for_user",
            Operation::CreateBooking => "create_booking",
            Operation::UpdateBooking => "update_booking",
            Operation::DeleteBooking => "delete_booking",
            Operation::Login => "login",
            Operation::Register => "register",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Scale and jitter are stored as f64 bits so they can be tuned at runtime
// through a shared reference. Base delay overrides are fixed at construction.
#[derive(Debug)]
pub struct LatencySimulator {
    enabled: AtomicBool,
    scale_bits: AtomicU64,
    jitter_bits: AtomicU64,
    base_delays_ms: HashMap<Operation, u64>,
}

impl LatencySimulator {
    pub fn new(config: &LatencyConfig) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            scale_bits: AtomicU64::new(config.scale.max(0.0).to_bits()),
            jitter_bits: AtomicU64::new(config.jitter_factor.clamp(0.0, 1.0).to_bits()),
            base_delays_ms: config.base_delays_ms.clone(),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn set_scale(&self, scale: f64) {
        self.scale_bits
            .store(scale.max(0.0).to_bits(), Ordering::SeqCst);
    }

    pub fn set_jitter(&self, jitter_factor: f64) {
        self.jitter_bits
            .store(jitter_factor.clamp(0.0, 1.0).to_bits(), Ordering::SeqCst);
    }

    fn scale(&self) -> f64 {
        f64::from_bits(self.scale_bits.load(Ordering::SeqCst))
    }

    fn jitter(&self) -> f64 {
        f64::from_bits(self.jitter_bits.load(Ordering::SeqCst))
    }

    pub fn base_delay_ms(&self, operation: Operation) -> u64 {
        self.base_delays_ms
            .get(&operation)
            .copied()
            .unwrap_or_else(|| operation.base_delay_ms())
    }

    // Delay the operation would incur right now
    pub fn delay_for(&self, operation: Operation) -> Duration {
        if !self.enabled.load(Ordering::SeqCst) {
            return Duration::ZERO;
        }

        let base_ms = self.base_delay_ms(operation) as f64 * self.scale();
        let jitter_factor = self.jitter();

        // Same shape as a backoff jitter: centred on the base delay
        let jitter = rand::random::<f64>() * jitter_factor * base_ms;
        let delay_ms = base_ms * (1.0 - jitter_factor / 2.0) + jitter;

        Duration::from_millis(delay_ms.max(0.0) as u64)
    }

    pub async fn wait(&self, operation: Operation) {
        let delay = self.delay_for(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for LatencySimulator {
    fn default() -> Self {
        Self::new(&LatencyConfig::default())
    }
}
