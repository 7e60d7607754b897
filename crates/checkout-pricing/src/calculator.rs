//! Checkout price calculation.
//!
//! Turns a base amount, a payment method and an installment count into the
//! amount charged at the gateway. The calculation is total: any input,
//! however malformed, produces a result whose `final_amount` is at least the
//! gateway minimum.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::method::PaymentMethod;
use crate::money::{ceil_bps, ceil_div, Currency, Money};
use crate::policy::PricingPolicy;

/// What the customer is about to pay for, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    /// Amount before discounts or interest, in cents. Never negative.
    pub base_amount_cents: i64,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Requested installments. `None` means a single charge.
    pub installments: Option<u32>,
}

impl PricingInput {
    /// Create an input from already-integer values.
    ///
    /// Negative amounts are treated as zero.
    pub fn new(base_amount_cents: i64, payment_method: PaymentMethod, installments: Option<u32>) -> Self {
        Self {
            base_amount_cents: base_amount_cents.max(0),
            payment_method,
            installments,
        }
    }

    /// Shorthand for a PIX payment.
    pub fn pix(base_amount_cents: i64) -> Self {
        Self::new(base_amount_cents, PaymentMethod::Pix, None)
    }

    /// Shorthand for a card payment in `installments`.
    pub fn card(base_amount_cents: i64, installments: u32) -> Self {
        Self::new(base_amount_cents, PaymentMethod::Card, Some(installments))
    }

    /// Build an input from raw numbers as they come out of a form.
    ///
    /// The amount is floored; NaN, infinities and negatives become 0. The
    /// installment count is floored; non-finite values fall back to 1.
    pub fn sanitize(raw_amount: f64, payment_method: PaymentMethod, raw_installments: Option<f64>) -> Self {
        Self {
            base_amount_cents: sanitize_amount(raw_amount),
            payment_method,
            installments: raw_installments.map(sanitize_installments),
        }
    }
}

pub(crate) fn sanitize_amount(raw: f64) -> i64 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0;
    }
    // `as` saturates at i64::MAX
    raw.floor() as i64
}

pub(crate) fn sanitize_installments(raw: f64) -> u32 {
    if !raw.is_finite() || raw < 1.0 {
        return 1;
    }
    raw.floor() as u32
}

/// Breakdown of a checkout charge. Every amount is in cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    /// Base amount after sanitization.
    pub base_amount: i64,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Installments after clamping. Always 1 for PIX.
    pub installments: u32,
    /// True iff card and above the interest-free threshold.
    pub has_interest: bool,
    /// Rate applied per installment; 0 when there is no interest.
    pub interest_rate: f64,
    /// Total owed after interest. Equals the base for PIX.
    pub total_with_interest: i64,
    /// Amount of each installment.
    pub installment_value: i64,
    /// Amount subtracted from the base. Only PIX has one.
    pub discount: i64,
    /// Amount sent to the gateway.
    pub final_amount: i64,
}

impl PricingResult {
    /// Final amount as money.
    pub fn final_money(&self, currency: Currency) -> Money {
        Money::new(self.final_amount, currency)
    }

    /// Installment amount as money.
    pub fn installment_money(&self, currency: Currency) -> Money {
        Money::new(self.installment_value, currency)
    }

    /// Interest added on top of the base, if any.
    pub fn interest_amount(&self) -> i64 {
        (self.total_with_interest - self.base_amount).max(0)
    }

    /// Short label such as `"6x de R$ 18,76 com juros"`.
    pub fn installment_label(&self, currency: Currency) -> String {
        let value = self.installment_money(currency).display();
        match (self.payment_method, self.has_interest) {
            (PaymentMethod::Pix, _) => format!("{} à vista no Pix", self.final_money(currency).display()),
            (PaymentMethod::Card, true) => format!("{}x de {} com juros", self.installments, value),
            (PaymentMethod::Card, false) => format!("{}x de {} sem juros", self.installments, value),
        }
    }
}

/// Applies a [`PricingPolicy`] to checkout inputs.
#[derive(Debug, Clone, Default)]
pub struct PricingCalculator {
    policy: PricingPolicy,
}

impl PricingCalculator {
    /// Create a calculator for a policy.
    pub fn new(policy: PricingPolicy) -> Self {
        Self { policy }
    }

    /// The policy in use.
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Compute the charge for an input.
    pub fn calculate(&self, input: &PricingInput) -> PricingResult {
        let base = input.base_amount_cents.max(0);

        let result = match input.payment_method {
            PaymentMethod::Pix => self.pix(base),
            PaymentMethod::Card => {
                let installments = self.policy.clamp_installments(input.installments.unwrap_or(1));
                self.card(base, installments)
            }
        };

        debug!(
            base_amount = result.base_amount,
            method = %result.payment_method,
            installments = result.installments,
            final_amount = result.final_amount,
            "checkout price calculated"
        );

        result
    }

    fn pix(&self, base: i64) -> PricingResult {
        let minimum = self.policy.min_gateway_amount_cents;
        let raw_discount = ceil_bps(base, self.policy.pix_discount_bps);
        let final_amount = (base - raw_discount).max(minimum);
        let discount = (base - final_amount).max(0);

        if discount < raw_discount {
            debug!(
                base_amount = base,
                raw_discount,
                discount,
                "pix discount reduced to respect gateway minimum"
            );
        }

        PricingResult {
            base_amount: base,
            payment_method: PaymentMethod::Pix,
            installments: 1,
            has_interest: false,
            interest_rate: 0.0,
            total_with_interest: base,
            installment_value: final_amount,
            discount,
            final_amount,
        }
    }

    fn card(&self, base: i64, installments: u32) -> PricingResult {
        let has_interest = self.policy.charges_interest(installments);

        let (interest_rate, total) = if has_interest {
            let rate = self.policy.monthly_interest_rate;
            let exponent = i32::try_from(installments).unwrap_or(i32::MAX);
            let factor = (1.0 + rate).powi(exponent);
            // `as` saturates for amounts beyond i64
            (rate, (base as f64 * factor).ceil() as i64)
        } else {
            (0.0, base)
        };

        PricingResult {
            base_amount: base,
            payment_method: PaymentMethod::Card,
            installments,
            has_interest,
            interest_rate,
            total_with_interest: total,
            installment_value: ceil_div(total, i64::from(installments)),
            discount: 0,
            final_amount: total.max(self.policy.min_gateway_amount_cents),
        }
    }
}

/// Compute the charge for an input under the default policy.
pub fn calculate(input: &PricingInput) -> PricingResult {
    PricingCalculator::default().calculate(input)
}
