use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::order::Order;
use crate::logging::OrderLog;

use super::tier::OrderTier;

// ============================================================================
// Order Variant Factory
// ============================================================================
//
// One factory per tier, each producing a matched order/shipping processor
// pair. A new tier is a new factory type; existing tiers stay untouched.
// There is no fallback variant: tier names are parsed (and rejected) before
// a factory is ever selected.
//
// ============================================================================

pub trait OrderProcessor: Send + Sync {
    fn process(&self, order: &Order);
}

pub trait ShippingProcessor: Send + Sync {
    fn ship(&self, order: &Order);

    /// Flat shipping charge for this method.
    fn shipping_cost(&self, order: &Order) -> Decimal;
}

pub trait VariantFactory: Send + Sync {
    fn tier(&self) -> OrderTier;

    fn create_order_processor(&self) -> Box<dyn OrderProcessor>;

    fn create_shipping_processor(&self) -> Box<dyn ShippingProcessor>;
}

/// Select the factory for an already-parsed tier.
pub fn variant_factory(tier: OrderTier, log: Arc<dyn OrderLog>) -> Box<dyn VariantFactory> {
    match tier {
        OrderTier::Standard => Box::new(StandardVariantFactory::new(log)),
        OrderTier::Premium => Box::new(PremiumVariantFactory::new(log)),
    }
}

// ============================================================================
// Standard tier
// ============================================================================

pub struct StandardVariantFactory {
    log: Arc<dyn OrderLog>,
}

impl StandardVariantFactory {
    pub fn new(log: Arc<dyn OrderLog>) -> Self {
        Self { log }
    }
}

impl VariantFactory for StandardVariantFactory {
    fn tier(&self) -> OrderTier {
        OrderTier::Standard
    }

    fn create_order_processor(&self) -> Box<dyn OrderProcessor> {
        Box::new(StandardOrderProcessor { log: self.log.clone() })
    }

    fn create_shipping_processor(&self) -> Box<dyn ShippingProcessor> {
        Box::new(StandardShipping { log: self.log.clone() })
    }
}

pub struct StandardOrderProcessor {
    log: Arc<dyn OrderLog>,
}

impl OrderProcessor for StandardOrderProcessor {
    fn process(&self, order: &Order) {
        self.log
            .log(&format!("Processing standard order with ID: {}", order.id()));
    }
}

pub struct StandardShipping {
    log: Arc<dyn OrderLog>,
}

impl StandardShipping {
    pub const FLAT_RATE: u32 = 10;
}

impl ShippingProcessor for StandardShipping {
    fn ship(&self, order: &Order) {
        self.log
            .log(&format!("Shipping standard order with ID: {}", order.id()));
    }

    fn shipping_cost(&self, _order: &Order) -> Decimal {
        Decimal::from(Self::FLAT_RATE)
    }
}

// ============================================================================
// Premium tier
// ============================================================================

pub struct PremiumVariantFactory {
    log: Arc<dyn OrderLog>,
}

impl PremiumVariantFactory {
    pub fn new(log: Arc<dyn OrderLog>) -> Self {
        Self { log }
    }
}

impl VariantFactory for PremiumVariantFactory {
    fn tier(&self) -> OrderTier {
        OrderTier::Premium
    }

    fn create_order_processor(&self) -> Box<dyn OrderProcessor> {
        Box::new(PremiumOrderProcessor { log: self.log.clone() })
    }

    fn create_shipping_processor(&self) -> Box<dyn ShippingProcessor> {
        Box::new(ExpressShipping { log: self.log.clone() })
    }
}

pub struct PremiumOrderProcessor {
    log: Arc<dyn OrderLog>,
}

impl OrderProcessor for PremiumOrderProcessor {
    fn process(&self, order: &Order) {
        self.log
            .log(&format!("Processing premium order with ID: {}", order.id()));
    }
}

pub struct ExpressShipping {
    log: Arc<dyn OrderLog>,
}

impl ExpressShipping {
    pub const FLAT_RATE: u32 = 25;
}

impl ShippingProcessor for ExpressShipping {
    fn ship(&self, order: &Order) {
        self.log
            .log(&format!("Express shipping order with ID: {}", order.id()));
    }

    fn shipping_cost(&self, _order: &Order) -> Decimal {
        Decimal::from(Self::FLAT_RATE)
    }
}
