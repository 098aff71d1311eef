//! Per-host politeness
//!
//! Every fetch first reserves a slot for its host. Slots for the same host
//! are spaced at least `min_interval` apart; different hosts never wait on
//! each other. Reservation happens under a short lock and the actual wait
//! happens outside it, so concurrent callers queue up in reservation order.

use crate::url::extract_host;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Minimum-interval gate keyed by host
#[derive(Debug)]
pub struct HostThrottle {
    min_interval: Duration,
    next_slot: Mutex<HashMap<String, Instant>>,
}

impl HostThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            next_slot: Mutex::new(HashMap::new()),
        }
    }

    /// Waits until a request to the URL's host is allowed
    pub async fn wait_turn(&self, url: &str) {
        if self.min_interval.is_zero() {
            return;
        }

        let host = extract_host(url).unwrap_or_else(|| url.to_string());
        let slot = self.reserve(&host, Instant::now());

        let now = Instant::now();
        if slot > now {
            tracing::trace!("Waiting {:?} before next request to {}", slot - now, host);
            tokio::time::sleep_until(slot).await;
        }
    }

    /// Returns the instant at which `host` may be requested and books the
    /// following slot
    fn reserve(&self, host: &str, now: Instant) -> Instant {
        let mut slots = self
            .next_slot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let slot = match slots.get(host) {
            Some(next) if *next > now => *next,
            _ => now,
        };
        slots.insert(host.to_string(), slot + self.min_interval);
        slot
    }
}
