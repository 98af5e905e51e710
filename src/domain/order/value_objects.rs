use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Identifier assigned by the persistence collaborator.
///
/// Zero means the order has not been saved yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    pub const UNASSIGNED: OrderId = OrderId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single purchased line, already priced by the caller.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OrderItem {
    pub product_id: u64,
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub unit_price: Decimal,
    pub tax_percentage: Decimal,
}

impl OrderItem {
    pub fn new(product_id: u64, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            product_id,
            quantity,
            unit_cost: Decimal::ZERO,
            unit_price,
            tax_percentage: Decimal::ZERO,
        }
    }

    pub fn with_cost(mut self, unit_cost: Decimal) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    pub fn with_tax_percentage(mut self, tax_percentage: Decimal) -> Self {
        self.tax_percentage = tax_percentage;
        self
    }

    /// Price times quantity. Tax is not applied here.
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Lifecycle status, in forward order. `Cancelled` sits outside the
/// forward chain and is reached only through an explicit cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Created,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Next status in the forward chain, `None` at a terminal status.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Created => Some(OrderStatus::Paid),
            OrderStatus::Paid => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_item_creation() {
        let item = OrderItem::new(7, 3, dec!(19.99))
            .with_cost(dec!(12.50))
            .with_tax_percentage(dec!(25));

        assert_eq!(item.product_id, 7);
        assert_eq!(item.quantity, 3);
        assert_eq!(item.unit_cost, dec!(12.50));
        assert_eq!(item.tax_percentage, dec!(25));
    }

    #[test]
    fn test_line_total() {
        let item = OrderItem::new(1, 3, dec!(19.99));
        assert_eq!(item.line_total(), dec!(59.97));
    }

    #[test]
    fn test_order_item_serialization() {
        let item = OrderItem::new(42, 2, dec!(999.00));

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: OrderItem = serde_json::from_str(&json).unwrap();

        assert_eq!(item, deserialized);
    }

    #[test]
    fn test_forward_chain() {
        let mut status = OrderStatus::Created;
        let mut seen = vec![status];
        while let Some(next) = status.next() {
            status = next;
            seen.push(status);
        }

        assert_eq!(
            seen,
            vec![
                OrderStatus::Created,
                OrderStatus::Paid,
                OrderStatus::Shipped,
                OrderStatus::Delivered,
            ]
        );
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_unassigned_order_id() {
        assert!(!OrderId::UNASSIGNED.is_assigned());
        assert!(OrderId(5).is_assigned());
        assert_eq!(OrderId::default(), OrderId::UNASSIGNED);
    }
}
