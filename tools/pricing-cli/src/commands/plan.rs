//! Installment table for card payments.

use anyhow::Result;
use checkout_pricing::{Money, PaymentMethod, PricingInput};

use super::{parse_amount, PlanArgs};
use crate::context::Context;
use crate::output::interest_badge;

/// Run the plan command.
pub fn run(args: PlanArgs, ctx: &Context) -> Result<()> {
    let calculator = ctx.calculator()?;
    let currency = calculator.policy().currency;
    let base = parse_amount(&args.amount, args.cents, currency)?;

    let plan = calculator.installment_plan(base);

    if ctx.output.is_json() {
        ctx.output.json(&plan);
        return Ok(());
    }

    let pix = calculator.calculate(&PricingInput::new(base, PaymentMethod::Pix, None));

    ctx.output.header(&format!("Payment options for {}", Money::new(base, currency).display()));
    ctx.output.kv("pix", &pix.installment_label(currency));
    ctx.output.info("");

    let widths = [4, 14, 14, 9];
    ctx.output.table_row(&["", "installment", "total", ""], &widths);
    for option in &plan {
        let installments = format!("{}x", option.installments);
        let value = Money::new(option.installment_value, currency).display();
        let total = Money::new(option.total, currency).display();
        let badge = interest_badge(option.has_interest);
        ctx.output.table_row(
            &[installments.as_str(), value.as_str(), total.as_str(), badge.as_str()],
            &widths,
        );
    }

    Ok(())
}
