use std::sync::Arc;

use rust_decimal::Decimal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_flow::domain::order::OrderItemView;
use order_flow::notification::{
    CustomerNotificationSubscriber, InventoryLedger, InventorySubscriber,
};
use order_flow::storage::InMemoryOrderRepository;
use order_flow::{
    OrderBuilder, OrderItem, OrderLog, OrderService, OrderView, ServiceConfig, TracingLog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::info!(dispatch_policy = ?config.dispatch_policy, "Starting order flow demo");

    let log: Arc<dyn OrderLog> = Arc::new(TracingLog);
    let repository = Arc::new(InMemoryOrderRepository::new());
    let ledger = InventoryLedger::new();

    let mut service = OrderService::new(config, repository.clone(), log.clone())?;
    service.subscribe(Arc::new(InventorySubscriber::new(ledger.clone(), log.clone())));
    service.subscribe(Arc::new(CustomerNotificationSubscriber::new(log.clone())));

    // === 1. Build, process, ship, pay, advance, notify ===
    let order = OrderBuilder::new()
        .add_item(
            OrderItem::new(1, 1, Decimal::new(99900, 2))
                .with_cost(Decimal::new(100000, 2))
                .with_tax_percentage(Decimal::from(25)),
        )
        .add_item(
            OrderItem::new(2, 1, Decimal::new(119900, 2))
                .with_cost(Decimal::new(120000, 2))
                .with_tax_percentage(Decimal::from(25)),
        )
        .shipping_address("123 Main St, Anytown, USA")
        .billing_address("456 Elm St, Othertown, USA")
        .as_gift("Happy Birthday!")
        .compute_total()
        .build();

    let handled = service.handle_order(order, "Premium", "CreditCard")?;
    tracing::info!(
        status = %handled.order.status(),
        total = %handled.order.total_amount(),
        shipping_cost = %handled.shipping_cost,
        delivered = handled.dispatch.delivered,
        reserved_product_1 = ledger.reserved(1),
        "✅ Order handled"
    );

    // === 2. Place and cancel through commands ===
    let view = OrderView {
        customer_id: "123456".to_string(),
        items: vec![OrderItemView {
            product_id: 1,
            quantity: 2,
            price: Decimal::new(99900, 2),
            cost: Decimal::new(100000, 2),
            tax_percentage: Decimal::from(25),
        }],
        total_amount: Decimal::new(199800, 2),
        shipping_address: "123 Main St, Anytown, USA".to_string(),
        billing_address: "456 Elm St, Othertown, USA".to_string(),
        gift_message: None,
    };

    let placed = service.place_order(view.clone()).await?;
    let cancelled = service.cancel_order(view).await?;
    let stored = repository.len().await;
    tracing::info!(placed = %placed, cancelled = %cancelled, stored, "✅ Commands executed");

    let families = service.metrics().registry().gather();
    tracing::info!(metric_families = families.len(), "Demo complete");

    Ok(())
}
