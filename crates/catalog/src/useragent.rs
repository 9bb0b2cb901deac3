//! User agent selection strategy.
//!
//! The feed throttles repeat agents, so the client varies them. The strategy
//! is injected: rotation state lives on the provider instance, never in a
//! module global, and tests pin a fixed agent.

use std::sync::atomic::{AtomicUsize, Ordering};

pub trait UserAgentProvider: Send + Sync {
    fn next(&self) -> &str;
}

/// Round-robin over a fixed pool.
pub struct RotatingUserAgents {
    agents: Vec<String>,
    cursor: AtomicUsize,
}

impl RotatingUserAgents {
    /// Panics on an empty pool; config validation rejects that earlier.
    pub fn new(agents: Vec<String>) -> Self {
        assert!(!agents.is_empty(), "user agent pool must not be empty");
        Self { agents, cursor: AtomicUsize::new(0) }
    }
}

impl UserAgentProvider for RotatingUserAgents {
    fn next(&self) -> &str {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.agents.len();
        &self.agents[index]
    }
}

/// Always the same agent. For tests and debugging.
pub struct FixedUserAgent(pub String);

impl UserAgentProvider for FixedUserAgent {
    fn next(&self) -> &str {
        &self.0
    }
}
