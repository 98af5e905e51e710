use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Service tier selecting the order/shipping processor pair.
///
/// Not stored on the Order; callers thread it through every step that needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderTier {
    Standard,
    Premium,
}

impl OrderTier {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderTier::Standard => "Standard",
            OrderTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for OrderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderTier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Standard" => Ok(OrderTier::Standard),
            "Premium" => Ok(OrderTier::Premium),
            other => Err(ConfigError::UnknownTier(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tiers() {
        assert_eq!("Standard".parse::<OrderTier>(), Ok(OrderTier::Standard));
        assert_eq!("Premium".parse::<OrderTier>(), Ok(OrderTier::Premium));
    }

    #[test]
    fn test_parse_unknown_tier() {
        for name in ["Gold", "premium", ""] {
            assert_eq!(
                name.parse::<OrderTier>(),
                Err(ConfigError::UnknownTier(name.to_string()))
            );
        }
    }

    #[test]
    fn test_display_round_trip() {
        for tier in [OrderTier::Standard, OrderTier::Premium] {
            assert_eq!(tier.to_string().parse::<OrderTier>(), Ok(tier));
        }
    }
}
