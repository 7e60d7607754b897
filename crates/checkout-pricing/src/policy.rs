//! Pricing policy: the constants the calculator applies.

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::money::{Currency, BPS_DENOMINATOR};

/// Smallest charge the payment gateway accepts, in cents (R$ 1,00).
pub const MIN_GATEWAY_AMOUNT: i64 = 100;

/// PIX discount in basis points (5%).
pub const PIX_DISCOUNT_BPS: i64 = 500;

/// Card installments that carry no interest.
pub const INTEREST_FREE_INSTALLMENTS: u32 = 3;

/// Monthly interest, compounded once per installment.
pub const MONTHLY_INTEREST_RATE: f64 = 0.0199;

/// Upper bound for card installments.
pub const MAX_INSTALLMENTS: u32 = 12;

/// The rules applied when turning a base amount into a gateway charge.
///
/// `Default` is the production policy. Every field has a serde default, so a
/// config file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Gateway minimum charge, in cents.
    #[serde(default = "default_min_gateway_amount")]
    pub min_gateway_amount_cents: i64,

    /// PIX discount in basis points.
    #[serde(default = "default_pix_discount_bps")]
    pub pix_discount_bps: i64,

    /// Installment count up to which cards are interest-free.
    #[serde(default = "default_interest_free_installments")]
    pub interest_free_installments: u32,

    /// Rate compounded per installment above the free threshold.
    #[serde(default = "default_monthly_interest_rate")]
    pub monthly_interest_rate: f64,

    /// Installments are clamped into `1..=max_installments`.
    #[serde(default = "default_max_installments")]
    pub max_installments: u32,

    /// Display currency.
    #[serde(default)]
    pub currency: Currency,
}

fn default_min_gateway_amount() -> i64 {
    MIN_GATEWAY_AMOUNT
}

fn default_pix_discount_bps() -> i64 {
    PIX_DISCOUNT_BPS
}

fn default_interest_free_installments() -> u32 {
    INTEREST_FREE_INSTALLMENTS
}

fn default_monthly_interest_rate() -> f64 {
    MONTHLY_INTEREST_RATE
}

fn default_max_installments() -> u32 {
    MAX_INSTALLMENTS
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            min_gateway_amount_cents: MIN_GATEWAY_AMOUNT,
            pix_discount_bps: PIX_DISCOUNT_BPS,
            interest_free_installments: INTEREST_FREE_INSTALLMENTS,
            monthly_interest_rate: MONTHLY_INTEREST_RATE,
            max_installments: MAX_INSTALLMENTS,
            currency: Currency::default(),
        }
    }
}

impl PricingPolicy {
    /// Check that the policy values make sense together.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.min_gateway_amount_cents < 0 {
            return Err(PricingError::InvalidPolicy(format!(
                "min_gateway_amount_cents must be >= 0, got {}",
                self.min_gateway_amount_cents
            )));
        }
        if !(0..=BPS_DENOMINATOR).contains(&self.pix_discount_bps) {
            return Err(PricingError::InvalidPolicy(format!(
                "pix_discount_bps must be within 0..={}, got {}",
                BPS_DENOMINATOR, self.pix_discount_bps
            )));
        }
        if !self.monthly_interest_rate.is_finite() || self.monthly_interest_rate < 0.0 {
            return Err(PricingError::InvalidPolicy(format!(
                "monthly_interest_rate must be a finite non-negative number, got {}",
                self.monthly_interest_rate
            )));
        }
        if self.max_installments == 0 {
            return Err(PricingError::InvalidPolicy(
                "max_installments must be at least 1".to_string(),
            ));
        }
        if self.interest_free_installments > self.max_installments {
            return Err(PricingError::InvalidPolicy(format!(
                "interest_free_installments ({}) exceeds max_installments ({})",
                self.interest_free_installments, self.max_installments
            )));
        }
        Ok(())
    }

    /// Clamp an installment count into `1..=max_installments`.
    pub fn clamp_installments(&self, installments: u32) -> u32 {
        installments.clamp(1, self.max_installments.max(1))
    }

    /// Whether a card payment in `installments` carries interest.
    pub fn charges_interest(&self, installments: u32) -> bool {
        installments > self.interest_free_installments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = PricingPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.min_gateway_amount_cents, 100);
        assert_eq!(policy.pix_discount_bps, 500);
        assert_eq!(policy.max_installments, 12);
    }

    #[test]
    fn test_clamp_installments() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.clamp_installments(0), 1);
        assert_eq!(policy.clamp_installments(6), 6);
        assert_eq!(policy.clamp_installments(20), 12);
    }

    #[test]
    fn test_charges_interest() {
        let policy = PricingPolicy::default();
        assert!(!policy.charges_interest(3));
        assert!(policy.charges_interest(4));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            PricingPolicy {
                min_gateway_amount_cents: -1,
                ..Default::default()
            },
            PricingPolicy {
                pix_discount_bps: 10_001,
                ..Default::default()
            },
            PricingPolicy {
                monthly_interest_rate: f64::NAN,
                ..Default::default()
            },
            PricingPolicy {
                monthly_interest_rate: -0.01,
                ..Default::default()
            },
            PricingPolicy {
                max_installments: 0,
                interest_free_installments: 0,
                ..Default::default()
            },
            PricingPolicy {
                interest_free_installments: 13,
                ..Default::default()
            },
        ];

        for policy in bad {
            assert!(
                matches!(policy.validate(), Err(PricingError::InvalidPolicy(_))),
                "expected {policy:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let policy: PricingPolicy = toml::from_str("min_gateway_amount_cents = 500").unwrap();
        assert_eq!(policy.min_gateway_amount_cents, 500);
        assert_eq!(policy.pix_discount_bps, PIX_DISCOUNT_BPS);
        assert_eq!(policy.monthly_interest_rate, MONTHLY_INTEREST_RATE);
        assert_eq!(policy.currency, Currency::BRL);
    }
}
