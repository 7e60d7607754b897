//! Pricing error types.
//!
//! The calculator itself never fails. These errors come from the edges:
//! parsing user-typed amounts and payment method codes, and loading a
//! pricing policy from configuration.

use thiserror::Error;

/// Errors that can occur around checkout pricing.
#[derive(Error, Debug)]
pub enum PricingError {
    /// Payment method code not recognised.
    #[error("Unknown payment method: {0}")]
    UnknownPaymentMethod(String),

    /// Amount could not be parsed.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Policy values are inconsistent.
    #[error("Invalid pricing policy: {0}")]
    InvalidPolicy(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PricingError {
    fn from(e: serde_json::Error) -> Self {
        PricingError::Serialization(e.to_string())
    }
}
