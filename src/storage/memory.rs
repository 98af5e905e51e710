use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::order::{Order, OrderId, OrderStatus};

use super::OrderRepository;

/// Snapshot of an order as the repository saw it, with the id it assigned.
#[derive(Debug, Clone)]
pub struct StoredOrder {
    pub order: Order,
    pub stored_at: DateTime<Utc>,
}

/// Keeps orders in a map, assigning sequential ids starting at 1.
/// Nothing survives a restart.
#[derive(Debug, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, StoredOrder>>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    pub async fn get(&self, id: OrderId) -> Option<StoredOrder> {
        self.orders.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.orders.read().await.is_empty()
    }
}

impl Default for InMemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> Result<OrderId> {
        let id = OrderId(self.next_id.fetch_add(1, Ordering::SeqCst));

        let mut stored = order.clone();
        stored.assign_id(id);

        self.orders.write().await.insert(
            id,
            StoredOrder {
                order: stored,
                stored_at: Utc::now(),
            },
        );

        tracing::debug!(order_id = %id, "Order stored in memory");
        Ok(id)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<()> {
        let mut orders = self.orders.write().await;
        let Some(entry) = orders.get_mut(&id) else {
            bail!("Order does not exist: {}", id);
        };

        entry.order.restore_status(status);
        entry.stored_at = Utc::now();
        Ok(())
    }
}
