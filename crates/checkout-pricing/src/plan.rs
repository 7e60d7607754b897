//! Installment options offered for a card payment.

use serde::{Deserialize, Serialize};

use crate::calculator::{PricingCalculator, PricingInput, PricingResult};
use crate::money::{Currency, Money};

/// One row of the installment selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentOption {
    pub installments: u32,
    pub installment_value: i64,
    pub total: i64,
    pub has_interest: bool,
}

impl InstallmentOption {
    fn from_result(result: &PricingResult) -> Self {
        Self {
            installments: result.installments,
            installment_value: result.installment_value,
            total: result.final_amount,
            has_interest: result.has_interest,
        }
    }

    /// Label such as `"4x de R$ 27,06 com juros"`.
    pub fn label(&self, currency: Currency) -> String {
        let value = Money::new(self.installment_value, currency).display();
        let suffix = if self.has_interest { "com juros" } else { "sem juros" };
        format!("{}x de {} {}", self.installments, value, suffix)
    }
}

impl PricingCalculator {
    /// Every card option from 1 to the policy's maximum installments.
    pub fn installment_plan(&self, base_amount_cents: i64) -> Vec<InstallmentOption> {
        (1..=self.policy().max_installments.max(1))
            .map(|n| {
                let result = self.calculate(&PricingInput::card(base_amount_cents, n));
                InstallmentOption::from_result(&result)
            })
            .collect()
    }
}
