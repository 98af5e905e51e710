// ============================================================================
// order_flow
// ============================================================================
//
// Assembles orders step by step, selects tier and payment processors,
// advances orders through their lifecycle and fans lifecycle events out to
// subscribers. Persistence and logging are injected collaborators.
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod fulfillment;
pub mod logging;
pub mod metrics;
pub mod notification;
pub mod service;
pub mod storage;

pub use config::{ConfigError, ServiceConfig};
pub use domain::order::{Order, OrderBuilder, OrderId, OrderItem, OrderStatus, OrderView};
pub use fulfillment::{OrderTier, PaymentMethod};
pub use logging::{MemoryLog, OrderLog, TracingLog};
pub use service::{HandledOrder, OrderService, ServiceError};
