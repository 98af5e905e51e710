use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::aggregate::Order;
use super::builder::OrderBuilder;
use super::errors::OrderError;
use super::value_objects::OrderItem;

// ============================================================================
// Order View - payload handed in by the surrounding service layer
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub product_id: u64,
    pub quantity: u32,
    pub price: Decimal,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default)]
    pub tax_percentage: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    #[serde(default)]
    pub customer_id: String,
    pub items: Vec<OrderItemView>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub shipping_address: String,
    #[serde(default)]
    pub billing_address: String,
    #[serde(default)]
    pub gift_message: Option<String>,
}

impl OrderView {
    fn validate_items(&self) -> Result<(), OrderError> {
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }

        let hundred = Decimal::ONE_HUNDRED;
        for item in &self.items {
            if item.quantity == 0 {
                return Err(OrderError::InvalidQuantity(item.product_id));
            }
            if item.price.is_sign_negative() || item.cost.is_sign_negative() {
                return Err(OrderError::NegativeAmount(item.product_id));
            }
            if item.tax_percentage.is_sign_negative() || item.tax_percentage > hundred {
                return Err(OrderError::InvalidTaxPercentage(item.product_id, item.tax_percentage));
            }
        }

        Ok(())
    }

    /// Validate the payload and assemble it into an Order with a fresh total.
    ///
    /// The recomputed total wins over the declared one.
    pub fn into_order(self) -> Result<Order, OrderError> {
        self.validate_items()?;

        let declared_total = self.total_amount;
        let mut builder = OrderBuilder::new()
            .customer(self.customer_id)
            .shipping_address(self.shipping_address)
            .billing_address(self.billing_address);

        for item in self.items {
            builder = builder.add_item(
                OrderItem::new(item.product_id, item.quantity, item.price)
                    .with_cost(item.cost)
                    .with_tax_percentage(item.tax_percentage),
            );
        }

        if let Some(message) = self.gift_message {
            builder = builder.as_gift(message);
        }

        let order = builder.compute_total().build();
        if order.total_amount() != declared_total {
            tracing::warn!(
                declared = %declared_total,
                computed = %order.total_amount(),
                "Declared order total differs from item sum, using computed total"
            );
        }

        Ok(order)
    }
}
