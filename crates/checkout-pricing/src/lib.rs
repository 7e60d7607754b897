//! Checkout pricing for PIX and credit card payments.
//!
//! This crate turns a cart's base amount into the amount charged at the
//! payment gateway:
//!
//! - **PIX**: single charge with a 5% discount, never below the gateway minimum
//! - **Card**: 1 to 12 installments, interest-free up to 3, compounded
//!   monthly interest above that
//!
//! All amounts are integer cents and every rounding step rounds up.
//!
//! # Example
//!
//! ```
//! use checkout_pricing::prelude::*;
//!
//! let pix = calculate(&PricingInput::pix(10000));
//! assert_eq!(pix.final_amount, 9500);
//!
//! let card = calculate(&PricingInput::card(10000, 6));
//! assert!(card.has_interest);
//! assert_eq!(card.installment_label(Currency::BRL), "6x de R$ 18,76 com juros");
//! ```

pub mod calculator;
pub mod error;
pub mod method;
pub mod money;
pub mod plan;
pub mod policy;
pub mod request;

pub use calculator::{calculate, PricingCalculator, PricingInput, PricingResult};
pub use error::PricingError;
pub use method::PaymentMethod;
pub use money::{Currency, Money};
pub use plan::InstallmentOption;
pub use policy::{PricingPolicy, MIN_GATEWAY_AMOUNT};
pub use request::PricingRequest;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::calculator::{calculate, PricingCalculator, PricingInput, PricingResult};
    pub use crate::error::PricingError;
    pub use crate::method::PaymentMethod;
    pub use crate::money::{Currency, Money};
    pub use crate::plan::InstallmentOption;
    pub use crate::policy::{PricingPolicy, MIN_GATEWAY_AMOUNT};
    pub use crate::request::PricingRequest;
}
