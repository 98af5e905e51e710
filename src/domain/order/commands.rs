use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::logging::OrderLog;
use crate::storage::OrderRepository;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::OrderId;

// ============================================================================
// Order Commands
// ============================================================================
//
// Each command owns one Order plus the collaborators it needs, and performs
// the whole action on execute: lifecycle guard, persistence call, log line.
// Commands are consumed by execute; there is no undo.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Storage(anyhow::Error),
}

#[async_trait]
pub trait OrderCommand: Send {
    fn name(&self) -> &'static str;

    fn command_id(&self) -> Uuid;

    fn order(&self) -> &Order;

    async fn execute(self: Box<Self>) -> Result<OrderId, CommandError>;
}

pub struct PlaceOrderCommand {
    command_id: Uuid,
    order: Order,
    repository: Arc<dyn OrderRepository>,
    log: Arc<dyn OrderLog>,
}

impl PlaceOrderCommand {
    pub fn new(
        order: Order,
        repository: Arc<dyn OrderRepository>,
        log: Arc<dyn OrderLog>,
    ) -> Self {
        Self {
            command_id: Uuid::new_v4(),
            order,
            repository,
            log,
        }
    }
}

#[async_trait]
impl OrderCommand for PlaceOrderCommand {
    fn name(&self) -> &'static str {
        "place_order"
    }

    fn command_id(&self) -> Uuid {
        self.command_id
    }

    fn order(&self) -> &Order {
        &self.order
    }

    async fn execute(self: Box<Self>) -> Result<OrderId, CommandError> {
        let Self {
            command_id,
            mut order,
            repository,
            log,
        } = *self;

        tracing::debug!(
            command_id = %command_id,
            item_count = order.items().len(),
            total = %order.total_amount(),
            "Placing order"
        );

        let id = repository.create(&order).await.map_err(CommandError::Storage)?;
        order.assign_id(id);

        log.log(&format!("Order {} placed successfully.", id));
        tracing::info!(command_id = %command_id, order_id = %id, "Order placed");

        Ok(id)
    }
}

pub struct CancelOrderCommand {
    command_id: Uuid,
    order: Order,
    repository: Arc<dyn OrderRepository>,
    log: Arc<dyn OrderLog>,
}

impl CancelOrderCommand {
    pub fn new(
        order: Order,
        repository: Arc<dyn OrderRepository>,
        log: Arc<dyn OrderLog>,
    ) -> Self {
        Self {
            command_id: Uuid::new_v4(),
            order,
            repository,
            log,
        }
    }
}

#[async_trait]
impl OrderCommand for CancelOrderCommand {
    fn name(&self) -> &'static str {
        "cancel_order"
    }

    fn command_id(&self) -> Uuid {
        self.command_id
    }

    fn order(&self) -> &Order {
        &self.order
    }

    async fn execute(self: Box<Self>) -> Result<OrderId, CommandError> {
        let Self {
            command_id,
            mut order,
            repository,
            log,
        } = *self;

        let transition = order.cancel()?;
        tracing::debug!(
            command_id = %command_id,
            order_id = %order.id(),
            from = %transition.from,
            "Cancelling order"
        );

        // An order that never reached the store is recorded as cancelled.
        let id = if order.id().is_assigned() {
            repository
                .update_status(order.id(), order.status())
                .await
                .map_err(CommandError::Storage)?;
            order.id()
        } else {
            let id = repository.create(&order).await.map_err(CommandError::Storage)?;
            order.assign_id(id);
            id
        };

        log.log(&format!("Order {} cancelled.", id));
        tracing::info!(command_id = %command_id, order_id = %id, "Order cancelled");

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderBuilder, OrderItem, OrderStatus};
    use crate::logging::MemoryLog;
    use crate::storage::InMemoryOrderRepository;
    use rust_decimal_macros::dec;

    fn sample_order() -> Order {
        OrderBuilder::new()
            .customer("123456")
            .add_item(OrderItem::new(1, 2, dec!(49.50)))
            .compute_total()
            .build()
    }

    #[tokio::test]
    async fn test_place_order_persists_and_logs() {
        let repo = InMemoryOrderRepository::new();
        let log = MemoryLog::new();
        let command: Box<dyn OrderCommand> = Box::new(PlaceOrderCommand::new(
            sample_order(),
            Arc::new(repo.clone()),
            Arc::new(log.clone()),
        ));
        assert_eq!(command.name(), "place_order");
        assert!(!command.order().id().is_assigned());
        assert_eq!(command.order().total_amount(), dec!(99.00));

        let id = command.execute().await.unwrap();

        assert_eq!(id, OrderId(1));
        assert_eq!(log.messages(), vec!["Order 1 placed successfully.".to_string()]);
        let stored = repo.get(id).await.unwrap();
        assert_eq!(stored.order.total_amount(), dec!(99.00));
        assert_eq!(stored.order.status(), OrderStatus::Created);
    }

    #[tokio::test]
    async fn test_cancel_unsaved_order_creates_cancelled_record() {
        let repo = InMemoryOrderRepository::new();
        let log = MemoryLog::new();
        let command = Box::new(CancelOrderCommand::new(
            sample_order(),
            Arc::new(repo.clone()),
            Arc::new(log.clone()),
        ));

        let id = command.execute().await.unwrap();

        assert_eq!(log.messages(), vec![format!("Order {} cancelled.", id)]);
        let stored = repo.get(id).await.unwrap();
        assert_eq!(stored.order.status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_saved_order_updates_status() {
        let repo = InMemoryOrderRepository::new();
        let log = MemoryLog::new();
        let mut order = sample_order();
        let id = repo.create(&order).await.unwrap();
        order.assign_id(id);

        let command = Box::new(CancelOrderCommand::new(
            order,
            Arc::new(repo.clone()),
            Arc::new(log.clone()),
        ));
        assert_eq!(command.order().id(), id);
        let cancelled_id = command.execute().await.unwrap();

        assert_eq!(cancelled_id, id);
        assert_eq!(repo.len().await, 1);
        assert_eq!(repo.get(id).await.unwrap().order.status(), OrderStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_delivered_order_is_rejected_before_persistence() {
        let repo = InMemoryOrderRepository::new();
        let log = MemoryLog::new();
        let mut order = sample_order();
        for _ in 0..3 {
            order.handle(&log);
        }
        log.clear();

        let command = Box::new(CancelOrderCommand::new(
            order,
            Arc::new(repo.clone()),
            Arc::new(log.clone()),
        ));
        let result = command.execute().await;

        assert!(matches!(result, Err(CommandError::Order(OrderError::AlreadyDelivered))));
        assert!(repo.is_empty().await);
        assert!(log.messages().is_empty());
    }
}
