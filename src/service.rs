use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::config::{ConfigError, ServiceConfig};
use crate::domain::order::{
    CancelOrderCommand, CommandError, Order, OrderCommand, OrderError, OrderId, OrderStatus,
    OrderView, PlaceOrderCommand,
};
use crate::fulfillment::{payment_processor, variant_factory, OrderTier, PaymentMethod};
use crate::logging::OrderLog;
use crate::metrics::OrderMetrics;
use crate::notification::{DispatchReport, NotificationBus, Subscriber, SubscriberError};
use crate::storage::OrderRepository;

// ============================================================================
// Order Service
// ============================================================================
//
// handle_order: build → process → ship → pay → advance → notify
// place_order / cancel_order: view → Order → command → execute
//
// Everything in handle_order runs to completion on the calling thread.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Subscriber(#[from] SubscriberError),

    /// Fail-fast dispatch aborted after the order was already paid. The
    /// paid order travels back in `handled` so the caller can still keep it.
    #[error("Notification dispatch failed for paid order {}: {source}", .handled.order.id())]
    Dispatch {
        handled: Box<HandledOrder>,
        source: SubscriberError,
    },

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Result of one `handle_order` run. The tier is carried here because the
/// Order itself does not remember it.
#[derive(Debug)]
pub struct HandledOrder {
    pub order: Order,
    pub tier: OrderTier,
    pub payment_method: PaymentMethod,
    pub shipping_cost: Decimal,
    pub dispatch: DispatchReport,
}

pub struct OrderService {
    config: ServiceConfig,
    repository: Arc<dyn OrderRepository>,
    log: Arc<dyn OrderLog>,
    bus: NotificationBus,
    metrics: OrderMetrics,
}

impl OrderService {
    pub fn new(
        config: ServiceConfig,
        repository: Arc<dyn OrderRepository>,
        log: Arc<dyn OrderLog>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            config,
            repository,
            log,
            bus: NotificationBus::new(),
            metrics: OrderMetrics::new()?,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn metrics(&self) -> &OrderMetrics {
        &self.metrics
    }

    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.bus.attach(subscriber);
    }

    pub fn unsubscribe(&mut self, name: &str) -> bool {
        self.bus.detach(name)
    }

    /// Parse tier and payment method, then run the order through the flow.
    ///
    /// Both names are resolved before any processor runs, so a bad name
    /// leaves no side effect behind.
    pub fn handle_order(
        &self,
        order: Order,
        tier: &str,
        payment_method: &str,
    ) -> Result<HandledOrder, ServiceError> {
        let tier = OrderTier::from_str(tier)?;
        let payment_method = PaymentMethod::from_str(payment_method)?;
        self.process_order(order, tier, payment_method)
    }

    /// Only a freshly created order can be processed; anything further along
    /// the lifecycle (or cancelled) is rejected before a processor runs.
    pub fn process_order(
        &self,
        mut order: Order,
        tier: OrderTier,
        payment_method: PaymentMethod,
    ) -> Result<HandledOrder, ServiceError> {
        if order.status() != OrderStatus::Created {
            tracing::warn!(
                order_id = %order.id(),
                status = %order.status(),
                "Refusing to process order outside Created"
            );
            return Err(OrderError::InvalidStatusTransition(order.status()).into());
        }

        order.recompute_total();

        tracing::info!(
            order_id = %order.id(),
            tier = %tier,
            payment_method = %payment_method,
            total = %order.total_amount(),
            "Handling order"
        );

        let factory = variant_factory(tier, self.log.clone());
        factory.create_order_processor().process(&order);

        let shipping = factory.create_shipping_processor();
        shipping.ship(&order);
        let shipping_cost = shipping.shipping_cost(&order);

        payment_processor(payment_method, self.log.clone()).process_payment(&order);
        self.metrics.record_payment(payment_method);

        if let Some(transition) = order.handle(self.log.as_ref()) {
            self.metrics.record_transition(transition);
        }
        self.metrics.record_order_handled(tier);

        let dispatch = self.dispatch(&order);
        let mut handled = HandledOrder {
            order,
            tier,
            payment_method,
            shipping_cost,
            dispatch: DispatchReport::default(),
        };

        match dispatch {
            Ok(report) => {
                handled.dispatch = report;
                Ok(handled)
            }
            Err(source) => Err(ServiceError::Dispatch {
                handled: Box::new(handled),
                source,
            }),
        }
    }

    /// Advance the order one lifecycle step and tell the subscribers.
    pub fn advance(&self, order: &mut Order) -> Result<DispatchReport, ServiceError> {
        match order.handle(self.log.as_ref()) {
            Some(transition) => {
                self.metrics.record_transition(transition);
                Ok(self.dispatch(order)?)
            }
            None => Ok(DispatchReport::default()),
        }
    }

    fn dispatch(&self, order: &Order) -> Result<DispatchReport, SubscriberError> {
        let result = self.bus.dispatch(order, self.config.dispatch_policy);
        match &result {
            Ok(report) => {
                let failed: Vec<&str> =
                    report.failures.iter().map(|f| f.subscriber.as_str()).collect();
                self.metrics.record_dispatch(report.delivered, &failed);
            }
            Err(error) => {
                tracing::error!(
                    order_id = %order.id(),
                    error = %error,
                    "Notification dispatch aborted"
                );
            }
        }
        result
    }

    pub async fn place_order(&self, view: OrderView) -> Result<OrderId, ServiceError> {
        let order = view.into_order()?;
        let command = PlaceOrderCommand::new(order, self.repository.clone(), self.log.clone());
        self.execute(Box::new(command)).await
    }

    /// Cancel the order described by `view`.
    ///
    /// A view carries no id, so this always records a new cancelled order; it
    /// cannot reach an order saved earlier by `place_order`. Use
    /// `CancelOrderCommand` with the stored `Order` for that.
    pub async fn cancel_order(&self, view: OrderView) -> Result<OrderId, ServiceError> {
        let order = view.into_order()?;
        let command = CancelOrderCommand::new(order, self.repository.clone(), self.log.clone());
        self.execute(Box::new(command)).await
    }

    /// Run any order command, recording its outcome.
    pub async fn execute(&self, command: Box<dyn OrderCommand>) -> Result<OrderId, ServiceError> {
        let name = command.name();
        let command_id = command.command_id();
        let order_id = command.order().id();
        tracing::debug!(
            command = name,
            command_id = %command_id,
            order_id = %order_id,
            "Executing command"
        );

        match command.execute().await {
            Ok(id) => {
                self.metrics.record_command(name, true);
                Ok(id)
            }
            Err(error) => {
                self.metrics.record_command(name, false);
                tracing::error!(
                    command = name,
                    command_id = %command_id,
                    order_id = %order_id,
                    error = %error,
                    "Command failed"
                );
                Err(error.into())
            }
        }
    }
}
