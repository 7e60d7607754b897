//! Payment methods accepted at checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Instant transfer, single charge, discounted.
    #[default]
    #[serde(rename = "PIX")]
    Pix,
    /// Credit card, optionally split into installments.
    #[serde(rename = "CARD")]
    Card,
}

impl PaymentMethod {
    pub fn code(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Card => "CARD",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Pix => "Pix",
            PaymentMethod::Card => "Credit card",
        }
    }

    /// Whether this method can be split into installments.
    pub fn supports_installments(&self) -> bool {
        matches!(self, PaymentMethod::Card)
    }

    /// Parse a payment method code, case-insensitively.
    pub fn from_code(code: &str) -> Result<Self, PricingError> {
        match code.trim().to_uppercase().as_str() {
            "PIX" => Ok(PaymentMethod::Pix),
            "CARD" | "CREDIT_CARD" => Ok(PaymentMethod::Card),
            _ => Err(PricingError::UnknownPaymentMethod(code.to_string())),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
