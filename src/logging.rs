use std::sync::{Arc, Mutex};

// ============================================================================
// Logging Collaborator
// ============================================================================
//
// Plain-message sink handed to processors, subscribers, lifecycle handling
// and commands. One instance is created by the owner of the service and
// shared by reference; there is no global logger.
//
// ============================================================================

/// Fire-and-forget message sink.
pub trait OrderLog: Send + Sync {
    fn log(&self, message: &str);
}

/// Forwards every message to `tracing` under the audit target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl OrderLog for TracingLog {
    fn log(&self, message: &str) {
        tracing::info!(target: "order_flow::audit", "{}", message);
    }
}

/// Keeps messages in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of recorded messages containing `needle`.
    pub fn count_containing(&self, needle: &str) -> usize {
        self.messages()
            .iter()
            .filter(|message| message.contains(needle))
            .count()
    }

    pub fn clear(&self) {
        match self.messages.lock() {
            Ok(mut guard) => guard.clear(),
            Err(poisoned) => poisoned.into_inner().clear(),
        }
    }
}

impl OrderLog for MemoryLog {
    fn log(&self, message: &str) {
        let mut guard = match self.messages.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(message.to_string());
    }
}
