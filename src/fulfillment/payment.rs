use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::domain::order::Order;
use crate::logging::OrderLog;

// ============================================================================
// Payment Strategy Resolver
// ============================================================================
//
// Maps a payment method name to its processor. Processing is keyed to the
// whole Order; the charged amount is the order's cached total.
// Unknown names are rejected, never defaulted.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    CreditCard,
    PayPal,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "CreditCard",
            PaymentMethod::PayPal => "PayPal",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CreditCard" => Ok(PaymentMethod::CreditCard),
            "PayPal" => Ok(PaymentMethod::PayPal),
            other => Err(ConfigError::UnknownPaymentMethod(other.to_string())),
        }
    }
}

pub trait PaymentProcessor: Send + Sync {
    fn method(&self) -> PaymentMethod;

    fn process_payment(&self, order: &Order);
}

/// Resolve a method name straight to its processor.
pub fn resolve_payment_processor(
    name: &str,
    log: Arc<dyn OrderLog>,
) -> Result<Box<dyn PaymentProcessor>, ConfigError> {
    let method = PaymentMethod::from_str(name)?;
    Ok(payment_processor(method, log))
}

pub fn payment_processor(
    method: PaymentMethod,
    log: Arc<dyn OrderLog>,
) -> Box<dyn PaymentProcessor> {
    match method {
        PaymentMethod::CreditCard => Box::new(CreditCardProcessor { log }),
        PaymentMethod::PayPal => Box::new(PayPalProcessor { log }),
    }
}

pub struct CreditCardProcessor {
    log: Arc<dyn OrderLog>,
}

impl PaymentProcessor for CreditCardProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::CreditCard
    }

    fn process_payment(&self, order: &Order) {
        self.log.log(&format!(
            "Processed credit card payment of {} for order ID: {}",
            order.total_amount(),
            order.id()
        ));
    }
}

pub struct PayPalProcessor {
    log: Arc<dyn OrderLog>,
}

impl PaymentProcessor for PayPalProcessor {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::PayPal
    }

    fn process_payment(&self, order: &Order) {
        self.log.log(&format!(
            "Processed PayPal payment of {} for order ID: {}",
            order.total_amount(),
            order.id()
        ));
    }
}
