//! Wire shape of a pricing request coming from a checkout form.
//!
//! Form state is loosely typed: amounts arrive as numbers, numeric strings,
//! empty strings or `null`. Numeric fields therefore deserialize leniently
//! and anything unusable degrades to the calculator's defaults instead of
//! rejecting the request.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::calculator::{PricingCalculator, PricingInput, PricingResult};
use crate::error::PricingError;
use crate::method::PaymentMethod;

/// `{ baseAmountCents, paymentMethod, installments? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    #[serde(default, deserialize_with = "lenient_number")]
    pub base_amount_cents: f64,

    #[serde(deserialize_with = "payment_method_code")]
    pub payment_method: PaymentMethod,

    #[serde(default, deserialize_with = "lenient_optional_number")]
    pub installments: Option<f64>,
}

impl PricingRequest {
    /// Parse a request from JSON.
    pub fn from_json(json: &str) -> Result<Self, PricingError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sanitize into a calculator input.
    pub fn into_input(self) -> PricingInput {
        PricingInput::sanitize(self.base_amount_cents, self.payment_method, self.installments)
    }
}

impl PricingCalculator {
    /// Parse a JSON request and price it.
    ///
    /// Only a missing or unknown payment method, or malformed JSON, is an
    /// error; bad numbers are sanitized.
    pub fn quote_json(&self, json: &str) -> Result<PricingResult, PricingError> {
        let input = PricingRequest::from_json(json)?.into_input();
        Ok(self.calculate(&input))
    }
}

fn value_to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_number(&value))
}

fn lenient_optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(ref s) if s.trim().is_empty() => Ok(None),
        other => Ok(Some(value_to_number(&other))),
    }
}

fn payment_method_code<'de, D>(deserializer: D) -> Result<PaymentMethod, D::Error>
where
    D: Deserializer<'de>,
{
    let code = String::deserialize(deserializer)?;
    PaymentMethod::from_code(&code).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let request = PricingRequest::from_json(
            r#"{"baseAmountCents": 10000, "paymentMethod": "CARD", "installments": 6}"#,
        )
        .unwrap();
        let input = request.into_input();
        assert_eq!(input.base_amount_cents, 10000);
        assert_eq!(input.payment_method, PaymentMethod::Card);
        assert_eq!(input.installments, Some(6));
    }

    #[test]
    fn test_lenient_numbers() {
        let input = PricingRequest::from_json(
            r#"{"baseAmountCents": "2500.9", "paymentMethod": "card", "installments": "2"}"#,
        )
        .unwrap()
        .into_input();
        assert_eq!(input.base_amount_cents, 2500);
        assert_eq!(input.installments, Some(2));

        let input = PricingRequest::from_json(
            r#"{"baseAmountCents": "abc", "paymentMethod": "PIX", "installments": null}"#,
        )
        .unwrap()
        .into_input();
        assert_eq!(input.base_amount_cents, 0);
        assert_eq!(input.installments, None);

        let input = PricingRequest::from_json(r#"{"paymentMethod": "CARD", "installments": {}}"#)
            .unwrap()
            .into_input();
        assert_eq!(input.base_amount_cents, 0);
        assert_eq!(input.installments, Some(1));
    }

    #[test]
    fn test_unknown_method_rejected() {
        let err = PricingRequest::from_json(r#"{"baseAmountCents": 100, "paymentMethod": "BOLETO"}"#)
            .unwrap_err();
        assert!(matches!(err, PricingError::Serialization(_)));
    }

    #[test]
    fn test_quote_json() {
        let calculator = PricingCalculator::default();
        let result = calculator
            .quote_json(r#"{"baseAmountCents": 10000, "paymentMethod": "PIX", "installments": 4}"#)
            .unwrap();
        assert_eq!(result.final_amount, 9500);
        assert_eq!(result.installments, 1);
    }
}
