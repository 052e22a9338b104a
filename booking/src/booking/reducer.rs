//! Reducer for the booking state machine.

use crate::catalog;
use crate::coupons::{CouponError, CouponValidator};
use crate::payment::PaymentGateway;
use crate::pricing;
use crate::types::{Money, OrderPayload, TicketCount};
use cinebook_core::{effect::Effect, reducer::Reducer};
use smallvec::{SmallVec, smallvec};
use std::collections::HashMap;
use std::sync::Arc;

use super::actions::BookingAction;
use super::environment::BookingEnvironment;
use super::types::{BookingState, Field};

/// Basic address-shape check: `local@domain.tld`, no whitespace, exactly
/// one `@`, at least one dot in the domain with text on both sides
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain
            .rsplit_once('.')
            .is_some_and(|(head, tld)| !head.is_empty() && !tld.is_empty())
}

/// Reducer for a booking session
///
/// Keeps the session internally consistent: derived values (surcharge,
/// coupon discount) are recomputed whenever any input affecting price
/// changes, and validation failures stay local and recoverable.
#[derive(Clone, Debug)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compute the validation errors for the current form state
    fn validation_errors(state: &BookingState) -> HashMap<Field, String> {
        let mut errors = HashMap::new();

        let count = state.ticket_count.get();
        if !(TicketCount::MIN..=TicketCount::MAX).contains(&count) {
            errors.insert(
                Field::General,
                "Maximum 2 tickets can be purchased per order.".to_string(),
            );
        }

        if state.customer.name.trim().is_empty() {
            errors.insert(Field::Name, "Name is required".to_string());
        }

        if state.customer.email.is_empty() {
            errors.insert(Field::Email, "Email is required".to_string());
        } else if !is_valid_email(&state.customer.email) {
            errors.insert(
                Field::Email,
                "Please enter a valid email address".to_string(),
            );
        }

        errors
    }

    /// Effect that runs the coupon validator and feeds the outcome back
    fn coupon_effect(
        validator: &Arc<dyn CouponValidator>,
        code: String,
        subtotal: Money,
    ) -> Effect<BookingAction> {
        let validator = Arc::clone(validator);
        Effect::Future(Box::pin(async move {
            let outcome = validator.validate(&code, subtotal).await;
            Some(BookingAction::CouponResolved { outcome })
        }))
    }

    /// Effect that runs the payment collaborator and feeds the outcome back
    fn payment_effect(
        gateway: &Arc<dyn PaymentGateway>,
        order: OrderPayload,
    ) -> Effect<BookingAction> {
        let gateway = Arc::clone(gateway);
        Effect::Future(Box::pin(async move {
            let outcome = gateway.process(&order).await;
            Some(BookingAction::PaymentSettled { outcome })
        }))
    }
}

impl Default for BookingReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per transition
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            BookingAction::SetTicketCount { count } => {
                state.ticket_count = TicketCount::clamped(count);
                state.recompute_surcharge();

                // A valid coupon's absolute discount depends on the
                // subtotal, so it is re-validated against the new one.
                if state.coupon.is_valid && !state.coupon.code.trim().is_empty() {
                    state.coupon.is_applying = true;
                    state.coupon.message = None;
                    return smallvec![Self::coupon_effect(
                        &env.coupons,
                        state.coupon.code.trim().to_owned(),
                        state.subtotal(),
                    )];
                }

                SmallVec::new()
            }

            BookingAction::SetSeatTier { tier } => {
                // Unknown ids leave the selection untouched
                if catalog::seat_tier(tier).is_some() {
                    state.seat_tier_id = tier;
                    state.recompute_surcharge();
                }
                SmallVec::new()
            }

            BookingAction::SetCouponCode { code } => {
                state.coupon.code = code;
                state.coupon.message = None;
                SmallVec::new()
            }

            BookingAction::SubmitCoupon => {
                // At most one validation in flight per session
                if state.coupon.is_applying {
                    return SmallVec::new();
                }

                let code = state.coupon.code.trim().to_owned();
                if code.is_empty() {
                    state.coupon.reject(CouponError::EmptyCode.to_string());
                    return SmallVec::new();
                }

                state.coupon.is_applying = true;
                state.coupon.message = None;
                smallvec![Self::coupon_effect(&env.coupons, code, state.subtotal())]
            }

            BookingAction::CouponResolved { outcome } => {
                state.coupon.is_applying = false;

                match outcome {
                    Ok(applied) => {
                        // Re-derive against the live subtotal in case the
                        // ticket count changed while the validation was in
                        // flight.
                        let discount = catalog::coupon(&applied.code).map_or(
                            applied.discount,
                            |coupon| pricing::coupon_discount(coupon.kind, state.subtotal()),
                        );
                        state.coupon.is_valid = true;
                        state.coupon.discount = discount;
                        state.coupon.message = Some(format!(
                            "{} - You saved ₹{}!",
                            applied.description,
                            discount.rupees()
                        ));
                    }
                    Err(error) => {
                        state.coupon.reject(error.to_string());
                    }
                }

                SmallVec::new()
            }

            BookingAction::SetCustomerField { field, value } => {
                match field {
                    super::actions::CustomerField::Name => state.customer.name = value,
                    super::actions::CustomerField::Email => state.customer.email = value,
                }
                state.validation.clear(field.into());
                SmallVec::new()
            }

            BookingAction::Validate => {
                state.validation.replace(Self::validation_errors(state));
                SmallVec::new()
            }

            BookingAction::Submit => {
                if state.ui.is_processing {
                    return SmallVec::new();
                }

                let errors = Self::validation_errors(state);
                if !errors.is_empty() {
                    state.validation.replace(errors);
                    return SmallVec::new();
                }

                state.validation.replace(HashMap::new());
                state.ui.is_processing = true;

                let order = state.order_payload();
                smallvec![Self::payment_effect(&env.payments, order)]
            }

            BookingAction::PaymentSettled { outcome } => {
                state.ui.is_processing = false;

                match outcome {
                    Ok(receipt) => {
                        state.validation.clear(Field::General);
                        state.ui.show_confirmation = true;
                        state.receipt = Some(receipt);
                    }
                    Err(error) => {
                        state.validation.set(Field::General, error.to_string());
                    }
                }

                SmallVec::new()
            }
        }
    }
}
