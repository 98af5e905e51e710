use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::value_objects::{OrderId, OrderItem, OrderStatus};

// ============================================================================
// Order Aggregate
// ============================================================================
//
// Invariants:
// 1. `total_amount` is a cached sum of line totals, refreshed only by
//    `recompute_total`. Any item mutation leaves it stale until then.
// 2. `status` only moves through `handle` (forward chain) and `cancel`
//    (see lifecycle.rs).
//
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    // Identity
    pub(super) id: OrderId,
    pub(super) created_at: DateTime<Utc>,

    pub(super) customer_id: String,
    pub(super) items: Vec<OrderItem>,
    pub(super) total_amount: Decimal,
    pub(super) status: OrderStatus,

    pub(super) shipping_address: String,
    pub(super) billing_address: String,

    pub(super) is_gift: bool,
    pub(super) gift_message: String,
}

impl Default for Order {
    fn default() -> Self {
        Self::new()
    }
}

impl Order {
    pub fn new() -> Self {
        Self {
            id: OrderId::UNASSIGNED,
            created_at: Utc::now(),
            customer_id: String::new(),
            items: Vec::new(),
            total_amount: Decimal::ZERO,
            status: OrderStatus::Created,
            shipping_address: String::new(),
            billing_address: String::new(),
            is_gift: false,
            gift_message: String::new(),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Cached total. Stale after any item mutation until `recompute_total`.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn shipping_address(&self) -> &str {
        &self.shipping_address
    }

    pub fn billing_address(&self) -> &str {
        &self.billing_address
    }

    pub fn is_gift(&self) -> bool {
        self.is_gift
    }

    pub fn gift_message(&self) -> &str {
        &self.gift_message
    }

    /// Set by the persistence path once the collaborator has assigned one.
    pub fn assign_id(&mut self, id: OrderId) {
        self.id = id;
    }

    /// Overwrite the status without lifecycle guards. Only for stores
    /// mirroring a status the lifecycle already decided.
    pub(crate) fn restore_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    pub fn set_customer_id(&mut self, customer_id: impl Into<String>) {
        self.customer_id = customer_id.into();
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Replaces the item at `index`, returning the previous one.
    /// Returns `None` and leaves the order untouched when out of range.
    pub fn replace_item(&mut self, index: usize, item: OrderItem) -> Option<OrderItem> {
        let slot = self.items.get_mut(index)?;
        Some(std::mem::replace(slot, item))
    }

    pub fn set_shipping_address(&mut self, address: impl Into<String>) {
        self.shipping_address = address.into();
    }

    pub fn set_billing_address(&mut self, address: impl Into<String>) {
        self.billing_address = address.into();
    }

    /// A non-gift order always carries an empty message.
    pub fn set_gift_option(&mut self, is_gift: bool, message: Option<String>) {
        self.is_gift = is_gift;
        self.gift_message = if is_gift {
            message.unwrap_or_default()
        } else {
            String::new()
        };
    }

    pub fn recompute_total(&mut self) -> Decimal {
        self.total_amount = self.items.iter().map(OrderItem::line_total).sum();
        self.total_amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new();

        assert!(!order.id().is_assigned());
        assert!(order.items().is_empty());
        assert_eq!(order.total_amount(), Decimal::ZERO);
        assert_eq!(order.status(), OrderStatus::Created);
        assert!(!order.is_gift());
        assert_eq!(order.gift_message(), "");
    }

    #[test]
    fn test_total_is_stale_until_recomputed() {
        let mut order = Order::new();
        order.add_item(OrderItem::new(1, 2, dec!(10.00)));
        assert_eq!(order.total_amount(), Decimal::ZERO);

        assert_eq!(order.recompute_total(), dec!(20.00));

        order.add_item(OrderItem::new(2, 1, dec!(5.50)));
        assert_eq!(order.total_amount(), dec!(20.00));
        assert_eq!(order.recompute_total(), dec!(25.50));
    }

    #[test]
    fn test_total_independent_of_insertion_order() {
        let items = [
            OrderItem::new(1, 3, dec!(4.99)),
            OrderItem::new(2, 1, dec!(1199.00)),
            OrderItem::new(3, 7, dec!(0.10)),
        ];

        let mut forward = Order::new();
        items.iter().cloned().for_each(|item| forward.add_item(item));

        let mut reversed = Order::new();
        items.iter().rev().cloned().for_each(|item| reversed.add_item(item));

        assert_eq!(forward.recompute_total(), reversed.recompute_total());
        assert_eq!(forward.total_amount(), dec!(1214.67));
    }

    #[test]
    fn test_replace_item() {
        let mut order = Order::new();
        order.add_item(OrderItem::new(1, 1, dec!(10)));

        let previous = order.replace_item(0, OrderItem::new(1, 4, dec!(10)));
        assert_eq!(previous.map(|item| item.quantity), Some(1));
        assert_eq!(order.recompute_total(), dec!(40));

        assert!(order.replace_item(3, OrderItem::new(9, 1, dec!(1))).is_none());
        assert_eq!(order.items().len(), 1);
    }

    #[test]
    fn test_order_serializes_for_reporting() {
        let mut order = Order::new();
        order.set_customer_id("123456");
        order.add_item(OrderItem::new(1, 2, dec!(10.00)));
        order.recompute_total();

        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["customer_id"], "123456");
        assert_eq!(json["status"], serde_json::to_value(OrderStatus::Created).unwrap());
        assert_eq!(json["items"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_non_gift_clears_message() {
        let mut order = Order::new();
        order.set_gift_option(true, Some("Happy Birthday!".to_string()));
        assert_eq!(order.gift_message(), "Happy Birthday!");

        order.set_gift_option(false, Some("ignored".to_string()));
        assert!(!order.is_gift());
        assert_eq!(order.gift_message(), "");
    }
}
