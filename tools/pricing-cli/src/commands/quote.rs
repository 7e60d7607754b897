//! Price a single checkout.

use anyhow::Result;
use checkout_pricing::{Money, PaymentMethod, PricingInput, PricingResult};
use tracing::info;

use super::{parse_amount, QuoteArgs};
use crate::context::Context;
use crate::output::format_rate;

/// Run the quote command.
pub fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let calculator = ctx.calculator()?;
    let currency = calculator.policy().currency;
    let base = parse_amount(&args.amount, args.cents, currency)?;

    if !args.method.supports_installments() && args.installments.is_some_and(|n| n > 1) {
        ctx.output.warn("Pix is a single charge; installments ignored");
    }

    let input = PricingInput::new(base, args.method, args.installments);
    let result = calculator.calculate(&input);
    info!(final_amount = result.final_amount, "quote computed");

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    print_result(&result, ctx);
    Ok(())
}

fn print_result(result: &PricingResult, ctx: &Context) {
    let currency = ctx.config.pricing.currency;
    let money = |cents: i64| Money::new(cents, currency).display();

    ctx.output.header(&format!("{} checkout", result.payment_method.display_name()));
    ctx.output.kv("base amount", &money(result.base_amount));

    match result.payment_method {
        PaymentMethod::Pix => {
            ctx.output.kv("discount", &money(result.discount));
        }
        PaymentMethod::Card => {
            ctx.output.kv("installments", &result.installments.to_string());
            if result.has_interest {
                ctx.output.kv("interest rate", &format!("{} a.m.", format_rate(result.interest_rate)));
                ctx.output.kv("interest", &money(result.interest_amount()));
            }
            ctx.output.kv("total", &money(result.total_with_interest));
        }
    }

    ctx.output.kv("charged", &money(result.final_amount));
    ctx.output.success(&result.installment_label(currency));
}
