// ============================================================================
// Order Domain
// ============================================================================
//
// - Value objects (OrderId, OrderItem, OrderStatus)
// - Aggregate (Order) and its lifecycle transitions
// - Builder (step-wise assembly)
// - View payload accepted from the service layer
// - Commands (PlaceOrderCommand, CancelOrderCommand)
// - Errors (OrderError)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod aggregate;
pub mod lifecycle;
pub mod builder;
pub mod view;
pub mod commands;

pub use value_objects::*;
pub use errors::*;
pub use aggregate::*;
pub use lifecycle::*;
pub use builder::*;
pub use view::*;
pub use commands::*;
