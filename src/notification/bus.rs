use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::order::Order;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubscriberError {
    #[error("Subscriber {subscriber} failed: {reason}")]
    Failed { subscriber: String, reason: String },

    #[error("Subscriber {0} bookkeeping lock poisoned")]
    Poisoned(String),
}

/// An independent party interested in lifecycle events. No return value,
/// no veto: an error only tells the bus that delivery failed.
pub trait Subscriber: Send + Sync {
    /// Stable name; two subscribers with the same name are considered equal.
    fn name(&self) -> &str;

    fn notify(&self, order: &Order) -> Result<(), SubscriberError>;
}

/// What the bus does when a subscriber fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DispatchPolicy {
    /// Stop at the first failure and hand it back to the caller.
    #[default]
    FailFast,
    /// Log each failure and keep delivering to the rest.
    ContinueOnError,
}

impl FromStr for DispatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fail-fast" => Ok(DispatchPolicy::FailFast),
            "continue-on-error" => Ok(DispatchPolicy::ContinueOnError),
            other => Err(ConfigError::UnknownDispatchPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DispatchFailure {
    pub subscriber: String,
    pub error: SubscriberError,
}

/// Outcome of one fan-out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchReport {
    pub delivered: usize,
    pub failures: Vec<DispatchFailure>,
}

impl DispatchReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Default)]
pub struct NotificationBus {
    subscribers: Vec<Arc<dyn Subscriber>>,
}

impl fmt::Debug for NotificationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotificationBus")
            .field("subscribers", &self.subscriber_names())
            .finish()
    }
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Duplicates are allowed.
    pub fn attach(&mut self, subscriber: Arc<dyn Subscriber>) {
        tracing::debug!(subscriber = subscriber.name(), "Subscriber attached");
        self.subscribers.push(subscriber);
    }

    /// Remove the first subscriber with this name. Returns whether one was removed.
    pub fn detach(&mut self, name: &str) -> bool {
        match self.subscribers.iter().position(|s| s.name() == name) {
            Some(index) => {
                self.subscribers.remove(index);
                tracing::debug!(subscriber = name, "Subscriber detached");
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn subscriber_names(&self) -> Vec<&str> {
        self.subscribers.iter().map(|s| s.name()).collect()
    }

    /// Deliver to every subscriber in attachment order, stopping at the
    /// first failure.
    pub fn notify_all(&self, order: &Order) -> Result<DispatchReport, SubscriberError> {
        self.dispatch(order, DispatchPolicy::FailFast)
    }

    pub fn dispatch(
        &self,
        order: &Order,
        policy: DispatchPolicy,
    ) -> Result<DispatchReport, SubscriberError> {
        let mut report = DispatchReport::default();

        for subscriber in &self.subscribers {
            match subscriber.notify(order) {
                Ok(()) => report.delivered += 1,
                Err(error) => match policy {
                    DispatchPolicy::FailFast => return Err(error),
                    DispatchPolicy::ContinueOnError => {
                        tracing::warn!(
                            order_id = %order.id(),
                            subscriber = subscriber.name(),
                            error = %error,
                            "Subscriber failed, continuing dispatch"
                        );
                        report.failures.push(DispatchFailure {
                            subscriber: subscriber.name().to_string(),
                            error,
                        });
                    }
                },
            }
        }

        tracing::debug!(
            order_id = %order.id(),
            delivered = report.delivered,
            failed = report.failures.len(),
            "Lifecycle notification dispatched"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        name: String,
        calls: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Recording {
        fn new(name: &str, calls: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                calls: calls.clone(),
                fail: false,
            })
        }

        fn failing(name: &str, calls: &Arc<Mutex<Vec<String>>>) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                calls: calls.clone(),
                fail: true,
            })
        }
    }

    impl Subscriber for Recording {
        fn name(&self) -> &str {
            &self.name
        }

        fn notify(&self, _order: &Order) -> Result<(), SubscriberError> {
            self.calls.lock().unwrap().push(self.name.clone());
            if self.fail {
                return Err(SubscriberError::Failed {
                    subscriber: self.name.clone(),
                    reason: "downstream unavailable".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_fan_out_in_attachment_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = NotificationBus::new();
        for name in ["inventory", "email", "audit"] {
            bus.attach(Recording::new(name, &calls));
        }

        let report = bus.notify_all(&Order::new()).unwrap();

        assert_eq!(report.delivered, 3);
        assert!(report.is_complete());
        assert_eq!(*calls.lock().unwrap(), vec!["inventory", "email", "audit"]);
    }

    #[test]
    fn test_detached_subscriber_receives_nothing() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = NotificationBus::new();
        bus.attach(Recording::new("inventory", &calls));
        bus.attach(Recording::new("email", &calls));

        assert!(bus.detach("inventory"));
        bus.notify_all(&Order::new()).unwrap();

        assert_eq!(*calls.lock().unwrap(), vec!["email"]);
    }

    #[test]
    fn test_detach_removes_only_first_duplicate() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = NotificationBus::new();
        bus.attach(Recording::new("email", &calls));
        bus.attach(Recording::new("email", &calls));

        assert!(bus.detach("email"));
        assert_eq!(bus.len(), 1);

        bus.notify_all(&Order::new()).unwrap();
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_detach_absent_is_noop() {
        let mut bus = NotificationBus::new();

        assert!(!bus.detach("missing"));
        assert!(bus.is_empty());
    }

    #[test]
    fn test_fail_fast_stops_at_first_failure() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = NotificationBus::new();
        bus.attach(Recording::new("inventory", &calls));
        bus.attach(Recording::failing("email", &calls));
        bus.attach(Recording::new("audit", &calls));

        let result = bus.notify_all(&Order::new());

        assert!(matches!(
            result,
            Err(SubscriberError::Failed { ref subscriber, .. }) if subscriber == "email"
        ));
        assert_eq!(*calls.lock().unwrap(), vec!["inventory", "email"]);
    }

    #[test]
    fn test_continue_on_error_reaches_everyone() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut bus = NotificationBus::new();
        bus.attach(Recording::failing("inventory", &calls));
        bus.attach(Recording::new("email", &calls));

        let report = bus
            .dispatch(&Order::new(), DispatchPolicy::ContinueOnError)
            .unwrap();

        assert_eq!(report.delivered, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].subscriber, "inventory");
        assert_eq!(*calls.lock().unwrap(), vec!["inventory", "email"]);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("fail-fast".parse::<DispatchPolicy>(), Ok(DispatchPolicy::FailFast));
        assert_eq!(
            "continue-on-error".parse::<DispatchPolicy>(),
            Ok(DispatchPolicy::ContinueOnError)
        );
        assert!("ignore".parse::<DispatchPolicy>().is_err());
    }
}
