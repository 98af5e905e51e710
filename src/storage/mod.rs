// ============================================================================
// Persistence Collaborator
// ============================================================================
//
// The core only needs to create an order and, for cancellation of an order
// that was already saved, record its new status. Everything else (reads,
// deletes, schema) belongs to the surrounding CRUD layer.
//
// ============================================================================

mod memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::order::{Order, OrderId, OrderStatus};

pub use memory::{InMemoryOrderRepository, StoredOrder};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order and return the identifier assigned to it.
    async fn create(&self, order: &Order) -> Result<OrderId>;

    /// Record a status change for an order that was already created.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()>;
}
