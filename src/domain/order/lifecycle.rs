use serde::{Deserialize, Serialize};

use crate::logging::OrderLog;

use super::aggregate::Order;
use super::errors::OrderError;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Lifecycle
// ============================================================================
//
//   Created ──handle──▶ Paid ──handle──▶ Shipped ──handle──▶ Delivered
//      │                 │                  │
//      └──────cancel─────┴──────cancel──────┴──▶ Cancelled
//
// `handle` runs the current status's side effect and moves one step forward.
// Delivered and Cancelled only run their side effect.
//
// ============================================================================

/// A status change that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl Order {
    /// Handle the current status and advance to the next one.
    ///
    /// Returns `None` at a terminal status, leaving the order unchanged.
    pub fn handle(&mut self, log: &dyn OrderLog) -> Option<StatusTransition> {
        let from = self.status;
        log.log(&state_message(self, from));

        let to = from.next()?;
        self.status = to;

        tracing::debug!(order_id = %self.id, from = %from, to = %to, "Order status advanced");
        Some(StatusTransition { from, to })
    }

    /// Move the order to `Cancelled` from any non-terminal status.
    pub fn cancel(&mut self) -> Result<StatusTransition, OrderError> {
        let from = self.status;
        match from {
            OrderStatus::Cancelled => return Err(OrderError::AlreadyCancelled),
            OrderStatus::Delivered => return Err(OrderError::AlreadyDelivered),
            OrderStatus::Created | OrderStatus::Paid | OrderStatus::Shipped => {}
        }

        self.status = OrderStatus::Cancelled;
        tracing::debug!(order_id = %self.id, from = %from, "Order cancelled");
        Ok(StatusTransition {
            from,
            to: OrderStatus::Cancelled,
        })
    }
}

fn state_message(order: &Order, status: OrderStatus) -> String {
    match status {
        OrderStatus::Created => format!("Order {} is in created state.", order.id),
        OrderStatus::Paid => format!("Order {} is paid.", order.id),
        OrderStatus::Shipped => format!("Order {} is shipped.", order.id),
        OrderStatus::Delivered => format!("Order {} is delivered.", order.id),
        OrderStatus::Cancelled => format!("Order {} is cancelled.", order.id),
    }
}
