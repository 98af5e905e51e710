use rust_decimal::Decimal;

use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OrderError {
    #[error("Order is already cancelled")]
    AlreadyCancelled,

    #[error("Order has been delivered and can no longer be cancelled")]
    AlreadyDelivered,

    #[error("Order cannot be processed from status {0}")]
    InvalidStatusTransition(OrderStatus),

    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Invalid quantity for product {0}: must be positive")]
    InvalidQuantity(u64),

    #[error("Invalid tax percentage for product {0}: {1} is outside 0-100")]
    InvalidTaxPercentage(u64, Decimal),

    #[error("Negative amount for product {0}")]
    NegativeAmount(u64),
}
