use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

use crate::domain::order::StatusTransition;
use crate::fulfillment::{OrderTier, PaymentMethod};

// ============================================================================
// Metrics Module - Prometheus counters for the order flow
// ============================================================================
//
// Covers:
// - Orders handled per tier
// - Payments processed per method
// - Lifecycle transitions
// - Notification fan-out and subscriber failures
// - Command outcomes
//
// Each service owns its registry; nothing is registered globally.
// ============================================================================

pub struct OrderMetrics {
    registry: Registry,

    pub orders_handled: IntCounterVec,
    pub payments_processed: IntCounterVec,
    pub lifecycle_transitions: IntCounterVec,

    pub notifications_delivered: IntCounter,
    pub subscriber_failures: IntCounterVec,

    pub commands_executed: IntCounterVec,
}

impl OrderMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_handled = IntCounterVec::new(
            Opts::new("orders_handled_total", "Orders run through the processing flow"),
            &["tier"],
        )?;
        registry.register(Box::new(orders_handled.clone()))?;

        let payments_processed = IntCounterVec::new(
            Opts::new("payments_processed_total", "Payments processed"),
            &["method"],
        )?;
        registry.register(Box::new(payments_processed.clone()))?;

        let lifecycle_transitions = IntCounterVec::new(
            Opts::new("lifecycle_transitions_total", "Order status transitions"),
            &["from", "to"],
        )?;
        registry.register(Box::new(lifecycle_transitions.clone()))?;

        let notifications_delivered = IntCounter::new(
            "notifications_delivered_total",
            "Lifecycle notifications delivered to subscribers",
        )?;
        registry.register(Box::new(notifications_delivered.clone()))?;

        let subscriber_failures = IntCounterVec::new(
            Opts::new("subscriber_failures_total", "Subscriber notification failures"),
            &["subscriber"],
        )?;
        registry.register(Box::new(subscriber_failures.clone()))?;

        let commands_executed = IntCounterVec::new(
            Opts::new("commands_executed_total", "Order commands executed"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(commands_executed.clone()))?;

        Ok(Self {
            registry,
            orders_handled,
            payments_processed,
            lifecycle_transitions,
            notifications_delivered,
            subscriber_failures,
            commands_executed,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_order_handled(&self, tier: OrderTier) {
        self.orders_handled.with_label_values(&[tier.as_str()]).inc();
    }

    pub fn record_payment(&self, method: PaymentMethod) {
        self.payments_processed.with_label_values(&[method.as_str()]).inc();
    }

    pub fn record_transition(&self, transition: StatusTransition) {
        self.lifecycle_transitions
            .with_label_values(&[transition.from.as_str(), transition.to.as_str()])
            .inc();
    }

    pub fn record_dispatch(&self, delivered: usize, failed_subscribers: &[&str]) {
        self.notifications_delivered.inc_by(delivered as u64);
        for subscriber in failed_subscribers {
            self.subscriber_failures.with_label_values(&[*subscriber]).inc();
        }
    }

    pub fn record_command(&self, command: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.commands_executed.with_label_values(&[command, outcome]).inc();
    }
}
