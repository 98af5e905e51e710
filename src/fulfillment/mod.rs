// ============================================================================
// Fulfillment - tier and payment strategy selection
// ============================================================================

pub mod tier;
pub mod variants;
pub mod payment;

pub use tier::OrderTier;
pub use variants::{
    variant_factory, ExpressShipping, OrderProcessor, PremiumOrderProcessor,
    PremiumVariantFactory, ShippingProcessor, StandardOrderProcessor, StandardShipping,
    StandardVariantFactory, VariantFactory,
};
pub use payment::{
    payment_processor, resolve_payment_processor, CreditCardProcessor, PayPalProcessor,
    PaymentMethod, PaymentProcessor,
};
