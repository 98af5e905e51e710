// ============================================================================
// Notification Bus - lifecycle event fan-out
// ============================================================================
//
// Subscribers are called synchronously, on the caller's thread, in the
// order they were attached. Delivery is in-process and best-effort.
//
// ============================================================================

mod bus;
mod subscribers;

pub use bus::{
    DispatchFailure, DispatchPolicy, DispatchReport, NotificationBus, Subscriber, SubscriberError,
};
pub use subscribers::{CustomerNotificationSubscriber, InventoryLedger, InventorySubscriber};
