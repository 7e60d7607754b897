//! Property tests for the checkout calculator over its whole input domain.

use checkout_pricing::prelude::*;
use proptest::prelude::*;

fn any_method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![Just(PaymentMethod::Pix), Just(PaymentMethod::Card)]
}

proptest! {
    #[test]
    fn final_amount_never_below_gateway_minimum(
        base in 0i64..1_000_000_000,
        method in any_method(),
        installments in proptest::option::of(0u32..50),
    ) {
        let result = calculate(&PricingInput::new(base, method, installments));
        prop_assert!(result.final_amount >= MIN_GATEWAY_AMOUNT);
    }

    #[test]
    fn pix_is_single_interest_free_charge(base in 0i64..1_000_000_000, installments in 0u32..50) {
        let result = calculate(&PricingInput::new(base, PaymentMethod::Pix, Some(installments)));
        prop_assert_eq!(result.installments, 1);
        prop_assert!(!result.has_interest);
        prop_assert_eq!(result.interest_rate, 0.0);
        prop_assert_eq!(result.total_with_interest, base);
    }

    #[test]
    fn pix_discount_is_what_was_actually_subtracted(base in 0i64..1_000_000_000) {
        let result = calculate(&PricingInput::pix(base));
        prop_assert!(result.discount >= 0);
        prop_assert!(result.discount <= (base * 5 + 99) / 100);
        if result.final_amount > MIN_GATEWAY_AMOUNT {
            prop_assert_eq!(result.final_amount, base - result.discount);
        } else {
            prop_assert_eq!(result.discount, (base - MIN_GATEWAY_AMOUNT).max(0));
        }
    }

    #[test]
    fn card_without_interest_keeps_base(base in 0i64..1_000_000_000, installments in 1u32..=3) {
        let result = calculate(&PricingInput::card(base, installments));
        let n = i64::from(installments);
        prop_assert!(!result.has_interest);
        prop_assert_eq!(result.total_with_interest, base);
        prop_assert_eq!(result.installment_value, (base + n - 1) / n);
        prop_assert_eq!(result.discount, 0);
    }

    #[test]
    fn card_with_interest_covers_total(base in 0i64..1_000_000_000, installments in 4u32..=12) {
        let result = calculate(&PricingInput::card(base, installments));
        prop_assert!(result.has_interest);
        prop_assert!(result.total_with_interest >= base);
        prop_assert!(result.installment_value * i64::from(installments) >= result.total_with_interest);
    }

    #[test]
    fn installments_are_clamped(base in 0i64..1_000_000_000, installments in 13u32..1000) {
        prop_assert_eq!(
            calculate(&PricingInput::card(base, installments)),
            calculate(&PricingInput::card(base, 12))
        );
        prop_assert_eq!(
            calculate(&PricingInput::card(base, 0)),
            calculate(&PricingInput::card(base, 1))
        );
    }

    #[test]
    fn calculation_is_idempotent(
        base in 0i64..1_000_000_000,
        method in any_method(),
        installments in proptest::option::of(0u32..50),
    ) {
        let input = PricingInput::new(base, method, installments);
        prop_assert_eq!(calculate(&input), calculate(&input));
    }

    #[test]
    fn raw_form_numbers_never_break_the_calculator(
        raw_amount in any::<f64>(),
        raw_installments in proptest::option::of(any::<f64>()),
        method in any_method(),
    ) {
        let input = PricingInput::sanitize(raw_amount, method, raw_installments);
        prop_assert!(input.base_amount_cents >= 0);
        let result = calculate(&input);
        prop_assert!(result.final_amount >= MIN_GATEWAY_AMOUNT);
        prop_assert!((1..=12).contains(&result.installments));
    }
}

#[test]
fn test_documented_examples_through_json() {
    let calculator = PricingCalculator::default();

    let pix = calculator
        .quote_json(r#"{"baseAmountCents": 105, "paymentMethod": "PIX"}"#)
        .unwrap();
    assert_eq!(pix.final_amount, 100);
    assert_eq!(pix.discount, 5);

    let card = calculator
        .quote_json(r#"{"baseAmountCents": 10000, "paymentMethod": "CARD", "installments": 20}"#)
        .unwrap();
    assert_eq!(card.installments, 12);
    assert_eq!(card.total_with_interest, 12668);
}
