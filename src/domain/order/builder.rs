use super::aggregate::Order;
use super::value_objects::OrderItem;

// ============================================================================
// Order Builder
// ============================================================================
//
// Step-wise assembly of a single Order. Steps can be chained in any order;
// `compute_total` only covers the items added before it. No step fails.
//
// ============================================================================

#[derive(Debug, Default)]
pub struct OrderBuilder {
    order: Order,
}

impl OrderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(mut self, item: OrderItem) -> Self {
        self.order.add_item(item);
        self
    }

    pub fn customer(mut self, customer_id: impl Into<String>) -> Self {
        self.order.set_customer_id(customer_id);
        self
    }

    pub fn shipping_address(mut self, address: impl Into<String>) -> Self {
        self.order.set_shipping_address(address);
        self
    }

    pub fn billing_address(mut self, address: impl Into<String>) -> Self {
        self.order.set_billing_address(address);
        self
    }

    pub fn as_gift(mut self, message: impl Into<String>) -> Self {
        self.order.set_gift_option(true, Some(message.into()));
        self
    }

    pub fn not_gift(mut self) -> Self {
        self.order.set_gift_option(false, None);
        self
    }

    /// Overwrite the cached total with the sum of the current items.
    pub fn compute_total(mut self) -> Self {
        self.order.recompute_total();
        self
    }

    pub fn build(self) -> Order {
        self.order
    }
}
