//! Unit tests for the booking reducer.
//!
//! These verify the complete transition contract:
//! - ticket count clamping and surcharge recomputation
//! - seat tier selection (including unknown ids)
//! - coupon entry, submission, settlement, and auto re-validation
//! - customer field edits and form validation
//! - submission and payment settlement

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code

use super::*;
use crate::coupons::{AppliedCoupon, CatalogCouponValidator, CouponError};
use crate::payment::{MockUpiGateway, PaymentError, PaymentId, Receipt, UpiPayee};
use crate::types::{EventId, EventType, Money, ScreeningEvent, SeatTierId};
use cinebook_core::environment::Clock;
use cinebook_core::reducer::Reducer;
use cinebook_testing::{ReducerTest, assertions, test_clock};
use std::sync::Arc;
use std::time::Duration;

use super::actions::{BookingAction, CustomerField};
use super::types::Field;

/// Environment with a fixed clock and instant collaborators.
fn test_env() -> BookingEnvironment {
    let clock = Arc::new(test_clock());
    BookingEnvironment::new(
        clock.clone(),
        Arc::new(CatalogCouponValidator::instant()),
        MockUpiGateway::shared(
            UpiPayee {
                vpa: "cinebook@ibl".to_string(),
                name: "Cinebook Screenings".to_string(),
            },
            Duration::ZERO,
            120,
            clock,
        ),
    )
}

fn drive_in_event() -> ScreeningEvent {
    ScreeningEvent {
        id: EventId::new(405),
        title: "Drive-in Cinema: Dune".to_string(),
        event_type: EventType::DriveIn,
        date: "August 6, 2026".to_string(),
        time: "7:45 PM".to_string(),
        location: "Faridabad Drive-in Theatre".to_string(),
        capacity: "120 cars".to_string(),
        city: "Delhi NCR".to_string(),
        movie_name: "Dune".to_string(),
    }
}

fn open_air_event() -> ScreeningEvent {
    ScreeningEvent {
        id: EventId::new(906),
        title: "Open Air Screening: The Matrix".to_string(),
        event_type: EventType::OpenAir,
        date: "August 6, 2026".to_string(),
        time: "8:00 PM".to_string(),
        location: "Lodhi Garden, Delhi".to_string(),
        capacity: "200 people".to_string(),
        city: "Delhi NCR".to_string(),
        movie_name: "The Matrix".to_string(),
    }
}

fn applied(code: &str, discount: u64) -> AppliedCoupon {
    AppliedCoupon {
        code: code.to_string(),
        discount: Money::from_rupees(discount),
        description: format!("{code} offer"),
    }
}

// ============================================================================
// Defaults and pricing derivation
// ============================================================================

#[test]
fn new_session_defaults_to_one_regular_ticket() {
    let state = BookingState::new(open_air_event());

    assert_eq!(state.ticket_count.get(), 1);
    assert_eq!(state.seat_tier_id, SeatTierId::new('C'));
    assert!(state.premium_surcharge.is_zero());
    assert!(!state.coupon.is_valid);

    let totals = state.totals();
    assert_eq!(totals.subtotal, Money::from_rupees(799));
    assert_eq!(totals.final_price, Money::from_rupees(799));
}

#[test]
fn drive_in_session_uses_higher_base_price() {
    let state = BookingState::new(drive_in_event());
    assert_eq!(state.totals().subtotal, Money::from_rupees(899));
}

// ============================================================================
// Ticket count
// ============================================================================

#[test]
fn ticket_count_is_clamped_at_both_ends() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    reducer.reduce(&mut state, BookingAction::SetTicketCount { count: 3 }, &env);
    assert_eq!(state.ticket_count.get(), 2);

    reducer.reduce(&mut state, BookingAction::SetTicketCount { count: 0 }, &env);
    assert_eq!(state.ticket_count.get(), 1);
}

#[test]
fn ticket_count_change_recomputes_surcharge() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    reducer.reduce(
        &mut state,
        BookingAction::SetSeatTier {
            tier: SeatTierId::new('I'),
        },
        &env,
    );
    assert_eq!(state.premium_surcharge, Money::from_rupees(600));

    reducer.reduce(&mut state, BookingAction::SetTicketCount { count: 2 }, &env);
    assert_eq!(state.premium_surcharge, Money::from_rupees(1200));
}

#[test]
fn ticket_count_change_revalidates_applied_coupon() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    state.coupon.code = "WELCOME10".to_string();
    reducer.reduce(
        &mut state,
        BookingAction::CouponResolved {
            outcome: Ok(applied("WELCOME10", 80)),
        },
        &env,
    );
    assert!(state.coupon.is_valid);

    let effects = reducer.reduce(&mut state, BookingAction::SetTicketCount { count: 2 }, &env);

    assert!(state.coupon.is_applying);
    assertions::assert_has_future_effect(&effects);
}

#[test]
fn ticket_count_change_without_coupon_emits_no_effects() {
    ReducerTest::new(BookingReducer::new())
        .with_env(test_env())
        .given_state(BookingState::new(open_air_event()))
        .when_action(BookingAction::SetTicketCount { count: 2 })
        .then_state(|state| {
            assert_eq!(state.ticket_count.get(), 2);
        })
        .then_effects(|effects| {
            assertions::assert_no_effects(effects);
        })
        .run();
}

// ============================================================================
// Seat tiers
// ============================================================================

#[test]
fn selecting_premium_tier_applies_surcharge() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    reducer.reduce(
        &mut state,
        BookingAction::SetSeatTier {
            tier: SeatTierId::new('A'),
        },
        &env,
    );

    assert_eq!(state.seat_tier_id, SeatTierId::new('A'));
    assert_eq!(state.premium_surcharge, Money::from_rupees(400));
    assert_eq!(state.totals().final_price, Money::from_rupees(1199));
}

#[test]
fn unknown_tier_id_leaves_selection_unchanged() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    reducer.reduce(
        &mut state,
        BookingAction::SetSeatTier {
            tier: SeatTierId::new('Z'),
        },
        &env,
    );

    assert_eq!(state.seat_tier_id, SeatTierId::new('C'));
    assert!(state.premium_surcharge.is_zero());
}

// ============================================================================
// Coupons
// ============================================================================

#[test]
fn typing_a_code_clears_the_previous_message() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.message = Some("old message".to_string());

    reducer.reduce(
        &mut state,
        BookingAction::SetCouponCode {
            code: "FLAT100".to_string(),
        },
        &env,
    );

    assert_eq!(state.coupon.code, "FLAT100");
    assert!(state.coupon.message.is_none());
}

#[test]
fn submitting_an_empty_code_is_an_inline_error() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.code = "   ".to_string();

    let effects = reducer.reduce(&mut state, BookingAction::SubmitCoupon, &env);

    assert!(!state.coupon.is_applying);
    assert!(!state.coupon.is_valid);
    assert_eq!(
        state.coupon.message.as_deref(),
        Some("Please enter a coupon code")
    );
    assertions::assert_no_effects(&effects);
}

#[test]
fn submitting_a_code_marks_applying_and_emits_validation() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.code = "flat100".to_string();

    let effects = reducer.reduce(&mut state, BookingAction::SubmitCoupon, &env);

    assert!(state.coupon.is_applying);
    assert!(state.coupon.message.is_none());
    assertions::assert_effects_count(&effects, 1);
    assertions::assert_has_future_effect(&effects);
}

#[test]
fn second_submit_while_applying_is_ignored() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.code = "FLAT100".to_string();

    let first = reducer.reduce(&mut state, BookingAction::SubmitCoupon, &env);
    assertions::assert_has_future_effect(&first);

    let second = reducer.reduce(&mut state, BookingAction::SubmitCoupon, &env);
    assertions::assert_no_effects(&second);
}

#[test]
fn successful_resolution_applies_the_discount() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.code = "WELCOME10".to_string();
    state.coupon.is_applying = true;

    reducer.reduce(
        &mut state,
        BookingAction::CouponResolved {
            outcome: Ok(applied("WELCOME10", 80)),
        },
        &env,
    );

    assert!(!state.coupon.is_applying);
    assert!(state.coupon.is_valid);
    assert_eq!(state.coupon.discount, Money::from_rupees(80));
    assert!(state.coupon.message.as_deref().unwrap().contains("₹80"));
    assert_eq!(state.totals().final_price, Money::from_rupees(719));
}

#[test]
fn failed_resolution_resets_the_discount() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.code = "BADCODE".to_string();
    state.coupon.is_applying = true;
    state.coupon.discount = Money::from_rupees(80);
    state.coupon.is_valid = true;

    reducer.reduce(
        &mut state,
        BookingAction::CouponResolved {
            outcome: Err(CouponError::UnknownCode),
        },
        &env,
    );

    assert!(!state.coupon.is_applying);
    assert!(!state.coupon.is_valid);
    assert!(state.coupon.discount.is_zero());
    assert_eq!(
        state.coupon.message.as_deref(),
        Some("Invalid coupon code. Please check and try again.")
    );
    assert_eq!(state.totals().final_price, Money::from_rupees(799));
}

#[test]
fn stale_resolution_is_recomputed_against_the_live_subtotal() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.coupon.code = "WELCOME10".to_string();
    state.coupon.is_applying = true;
    state.ticket_count = crate::types::TicketCount::clamped(2);

    // The settle carries the discount for one ticket, but two are selected
    reducer.reduce(
        &mut state,
        BookingAction::CouponResolved {
            outcome: Ok(applied("WELCOME10", 80)),
        },
        &env,
    );

    // round(1598 * 10%) = 160
    assert_eq!(state.coupon.discount, Money::from_rupees(160));
}

// ============================================================================
// Customer fields and validation
// ============================================================================

#[test]
fn editing_a_field_clears_its_error() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    reducer.reduce(&mut state, BookingAction::Validate, &env);
    assert_eq!(state.validation.error(Field::Name), Some("Name is required"));

    reducer.reduce(
        &mut state,
        BookingAction::SetCustomerField {
            field: CustomerField::Name,
            value: "Asha Rao".to_string(),
        },
        &env,
    );

    assert_eq!(state.customer.name, "Asha Rao");
    assert!(state.validation.error(Field::Name).is_none());
}

#[test]
fn validate_flags_missing_and_malformed_fields() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.customer.email = "not-an-email".to_string();

    reducer.reduce(&mut state, BookingAction::Validate, &env);

    assert!(!state.validation.is_valid());
    assert_eq!(state.validation.error(Field::Name), Some("Name is required"));
    assert_eq!(
        state.validation.error(Field::Email),
        Some("Please enter a valid email address")
    );
}

#[test]
fn validate_passes_for_a_complete_form() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.customer.name = "Asha Rao".to_string();
    state.customer.email = "asha@example.com".to_string();

    reducer.reduce(&mut state, BookingAction::Validate, &env);

    assert!(state.validation.is_valid());
}

#[test]
fn email_shape_rule_matches_expected_cases() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@sub.domain.in"));
    assert!(!is_valid_email(""));
    assert!(!is_valid_email("plainaddress"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a@.co"));
    assert!(!is_valid_email("a@b."));
    assert!(!is_valid_email("a b@c.co"));
    assert!(!is_valid_email("a@b@c.co"));
}

// ============================================================================
// Submission and payment
// ============================================================================

#[test]
fn submit_with_errors_surfaces_them_and_stays_put() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());

    let effects = reducer.reduce(&mut state, BookingAction::Submit, &env);

    assert!(!state.ui.is_processing);
    assert!(!state.validation.is_valid());
    assertions::assert_no_effects(&effects);
}

#[test]
fn submit_with_a_valid_form_starts_processing() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.customer.name = "Asha Rao".to_string();
    state.customer.email = "asha@example.com".to_string();

    let effects = reducer.reduce(&mut state, BookingAction::Submit, &env);

    assert!(state.ui.is_processing);
    assert!(state.validation.is_valid());
    assertions::assert_effects_count(&effects, 1);
    assertions::assert_has_future_effect(&effects);
}

#[test]
fn submit_while_processing_is_ignored() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.customer.name = "Asha Rao".to_string();
    state.customer.email = "asha@example.com".to_string();
    state.ui.is_processing = true;

    let effects = reducer.reduce(&mut state, BookingAction::Submit, &env);

    assertions::assert_no_effects(&effects);
}

#[test]
fn settled_payment_raises_the_confirmation() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.ui.is_processing = true;

    let receipt = Receipt {
        payment_id: PaymentId::new(),
        transaction_id: "upi_txn_test".to_string(),
        amount: Money::from_rupees(799),
        paid_at: env.clock.now(),
    };

    reducer.reduce(
        &mut state,
        BookingAction::PaymentSettled {
            outcome: Ok(receipt),
        },
        &env,
    );

    assert!(!state.ui.is_processing);
    assert!(state.ui.show_confirmation);
    assert_eq!(
        state.receipt.as_ref().map(|r| r.amount),
        Some(Money::from_rupees(799))
    );
}

#[test]
fn failed_payment_surfaces_a_retryable_error() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(open_air_event());
    state.ui.is_processing = true;

    reducer.reduce(
        &mut state,
        BookingAction::PaymentSettled {
            outcome: Err(PaymentError::VerificationFailed),
        },
        &env,
    );

    assert!(!state.ui.is_processing);
    assert!(!state.ui.show_confirmation);
    assert!(state.validation.error(Field::General).is_some());
}

// ============================================================================
// Order payload
// ============================================================================

#[test]
fn order_payload_freezes_the_complete_contract() {
    let reducer = BookingReducer::new();
    let env = test_env();
    let mut state = BookingState::new(drive_in_event());
    state.customer.name = "Asha Rao".to_string();
    state.customer.email = "asha@example.com".to_string();
    state.coupon.code = "FLAT100".to_string();

    reducer.reduce(&mut state, BookingAction::SetTicketCount { count: 2 }, &env);
    reducer.reduce(
        &mut state,
        BookingAction::SetSeatTier {
            tier: SeatTierId::new('I'),
        },
        &env,
    );
    reducer.reduce(
        &mut state,
        BookingAction::CouponResolved {
            outcome: Ok(applied("FLAT100", 100)),
        },
        &env,
    );

    let payload = state.order_payload();

    assert_eq!(payload.event_title, "Drive-in Cinema: Dune");
    assert_eq!(payload.event_id, EventId::new(405));
    assert_eq!(payload.subtotal, Money::from_rupees(1798));
    assert_eq!(payload.discount, Money::from_rupees(100));
    assert_eq!(payload.premium_surcharge, Money::from_rupees(1200));
    assert_eq!(payload.final_price, Money::from_rupees(2898));
    assert_eq!(payload.tickets, 2);
    assert_eq!(payload.seat_preference, SeatTierId::new('I'));
    assert_eq!(payload.coupon_code, "FLAT100");
    assert_eq!(payload.date, "August 6, 2026");
    assert_eq!(payload.time, "7:45 PM");
}
