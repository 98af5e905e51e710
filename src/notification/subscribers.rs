use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::order::Order;
use crate::logging::OrderLog;

use super::bus::{Subscriber, SubscriberError};

/// Units reserved per product. Clones share the same counts.
#[derive(Debug, Default, Clone)]
pub struct InventoryLedger {
    reserved: Arc<Mutex<HashMap<u64, u64>>>,
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reserved(&self, product_id: u64) -> u64 {
        match self.reserved.lock() {
            Ok(guard) => guard.get(&product_id).copied().unwrap_or(0),
            Err(poisoned) => poisoned.into_inner().get(&product_id).copied().unwrap_or(0),
        }
    }

    fn reserve_order(&self, order: &Order) -> Result<(), SubscriberError> {
        let mut reserved = self
            .reserved
            .lock()
            .map_err(|_| SubscriberError::Poisoned(InventorySubscriber::NAME.to_string()))?;

        for item in order.items() {
            *reserved.entry(item.product_id).or_insert(0) += u64::from(item.quantity);
        }
        Ok(())
    }
}

/// Books the order's quantities against the inventory ledger.
pub struct InventorySubscriber {
    ledger: InventoryLedger,
    log: Arc<dyn OrderLog>,
}

impl InventorySubscriber {
    pub const NAME: &'static str = "inventory";

    pub fn new(ledger: InventoryLedger, log: Arc<dyn OrderLog>) -> Self {
        Self { ledger, log }
    }
}

impl Subscriber for InventorySubscriber {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn notify(&self, order: &Order) -> Result<(), SubscriberError> {
        self.ledger.reserve_order(order)?;
        self.log
            .log(&format!("Inventory updated for order: {}", order.id()));
        Ok(())
    }
}

/// Tells the customer about the order's new status.
pub struct CustomerNotificationSubscriber {
    log: Arc<dyn OrderLog>,
}

impl CustomerNotificationSubscriber {
    pub const NAME: &'static str = "customer-email";

    pub fn new(log: Arc<dyn OrderLog>) -> Self {
        Self { log }
    }
}

impl Subscriber for CustomerNotificationSubscriber {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn notify(&self, order: &Order) -> Result<(), SubscriberError> {
        self.log.log(&format!(
            "Email sent for order: {} (status: {})",
            order.id(),
            order.status()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderBuilder, OrderItem};
    use crate::logging::MemoryLog;
    use crate::notification::NotificationBus;
    use rust_decimal_macros::dec;

    #[test]
    fn test_inventory_subscriber_reserves_quantities() {
        let log = MemoryLog::new();
        let ledger = InventoryLedger::new();
        let subscriber = InventorySubscriber::new(ledger.clone(), Arc::new(log.clone()));
        let order = OrderBuilder::new()
            .add_item(OrderItem::new(1, 2, dec!(5)))
            .add_item(OrderItem::new(2, 1, dec!(7)))
            .add_item(OrderItem::new(1, 3, dec!(5)))
            .build();

        subscriber.notify(&order).unwrap();

        assert_eq!(ledger.reserved(1), 5);
        assert_eq!(ledger.reserved(2), 1);
        assert_eq!(ledger.reserved(3), 0);
        assert_eq!(log.messages(), vec!["Inventory updated for order: 0".to_string()]);
    }

    #[test]
    fn test_built_in_subscribers_on_bus() {
        let log = MemoryLog::new();
        let shared: Arc<dyn OrderLog> = Arc::new(log.clone());
        let mut bus = NotificationBus::new();
        bus.attach(Arc::new(InventorySubscriber::new(InventoryLedger::new(), shared.clone())));
        bus.attach(Arc::new(CustomerNotificationSubscriber::new(shared)));

        let report = bus.notify_all(&Order::new()).unwrap();

        assert_eq!(report.delivered, 2);
        assert_eq!(bus.subscriber_names(), vec!["inventory", "customer-email"]);
        assert_eq!(
            log.messages(),
            vec![
                "Inventory updated for order: 0".to_string(),
                "Email sent for order: 0 (status: created)".to_string(),
            ]
        );
    }
}
