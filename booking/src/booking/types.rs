//! State types for a booking session.

use crate::catalog;
use crate::payment::Receipt;
use crate::pricing;
use crate::types::{
    CustomerInfo, Money, OrderPayload, OrderTotals, ScreeningEvent, SeatTier, SeatTierId,
    TicketCount,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Form fields validation errors are keyed by
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Customer name field
    Name,
    /// Customer email field
    Email,
    /// Errors not tied to a single field
    General,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => f.write_str("name"),
            Self::Email => f.write_str("email"),
            Self::General => f.write_str("general"),
        }
    }
}

/// Coupon portion of the booking session
///
/// `discount` only counts while `is_valid` is true; every rejection resets it
/// to zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponState {
    /// Code as typed by the customer
    pub code: String,
    /// Discount granted by the applied coupon
    pub discount: Money,
    /// Whether the most recent validation succeeded
    pub is_valid: bool,
    /// Message shown in the coupon area (offer description or error)
    pub message: Option<String>,
    /// True while a validation is in flight; the apply control is disabled
    pub is_applying: bool,
}

impl CouponState {
    /// Drop the applied discount and mark the coupon invalid
    pub fn reject(&mut self, message: String) {
        self.discount = Money::ZERO;
        self.is_valid = false;
        self.message = Some(message);
        self.is_applying = false;
    }
}

/// Per-field validation errors
///
/// Empty means the form is submit-eligible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationState {
    errors: HashMap<Field, String>,
}

impl ValidationState {
    /// Whether the form has no validation errors
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Error message for a field, if any
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Record an error for a field
    pub fn set(&mut self, field: Field, message: String) {
        self.errors.insert(field, message);
    }

    /// Clear a field's error
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Replace all errors at once
    pub fn replace(&mut self, errors: HashMap<Field, String>) {
        self.errors = errors;
    }

    /// Number of outstanding errors
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether there are no outstanding errors
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// UI-facing flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiFlags {
    /// True while the submitted order is being processed
    pub is_processing: bool,
    /// True once the payment settled and the confirmation should show
    pub show_confirmation: bool,
}

/// The mutable state of one booking session
///
/// Created on entry to the booking flow, mutated only through reducer
/// transitions, discarded on navigation away or successful submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookingState {
    /// The screening event being booked (read-only snapshot)
    pub event: ScreeningEvent,
    /// Tickets in the order, always within the per-order limit
    pub ticket_count: TicketCount,
    /// Selected seat row, always a known tier
    pub seat_tier_id: SeatTierId,
    /// Seat surcharge for the current tier × count (derived, kept in sync)
    pub premium_surcharge: Money,
    /// Customer details
    pub customer: CustomerInfo,
    /// Coupon state
    pub coupon: CouponState,
    /// Validation errors
    pub validation: ValidationState,
    /// UI flags
    pub ui: UiFlags,
    /// Receipt of the settled payment, once submission completed
    pub receipt: Option<Receipt>,
}

impl BookingState {
    /// Start a session for a screening event
    ///
    /// Defaults: one ticket, the first regular row, no coupon.
    #[must_use]
    pub fn new(event: ScreeningEvent) -> Self {
        Self {
            event,
            ticket_count: TicketCount::default(),
            seat_tier_id: catalog::default_seat_tier().id,
            premium_surcharge: Money::ZERO,
            customer: CustomerInfo::default(),
            coupon: CouponState::default(),
            validation: ValidationState::default(),
            ui: UiFlags::default(),
            receipt: None,
        }
    }

    /// Base price per ticket, from the event type
    #[must_use]
    pub const fn base_price(&self) -> Money {
        self.event.base_price()
    }

    /// Pre-surcharge subtotal for the current ticket count
    #[must_use]
    pub const fn subtotal(&self) -> Money {
        pricing::subtotal(self.base_price(), self.ticket_count)
    }

    /// The currently selected seat tier
    ///
    /// `seat_tier_id` only ever holds known ids, so the fallback to the
    /// default tier is unreachable in practice.
    #[must_use]
    pub fn seat_tier(&self) -> &'static SeatTier {
        catalog::seat_tier(self.seat_tier_id).unwrap_or_else(catalog::default_seat_tier)
    }

    /// Discount that currently counts toward the total
    #[must_use]
    pub const fn applied_discount(&self) -> Money {
        if self.coupon.is_valid {
            self.coupon.discount
        } else {
            Money::ZERO
        }
    }

    /// Re-derive the stored surcharge from the current tier and count
    pub fn recompute_surcharge(&mut self) {
        self.premium_surcharge = pricing::seat_surcharge(self.seat_tier(), self.ticket_count);
    }

    /// Derive the full order summary from the current inputs
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        pricing::compute_order_total(
            self.base_price(),
            self.ticket_count,
            self.seat_tier(),
            self.applied_discount(),
        )
    }

    /// Freeze the session into the payload the payment collaborator consumes
    #[must_use]
    pub fn order_payload(&self) -> OrderPayload {
        let totals = self.totals();
        OrderPayload {
            event_title: self.event.title.clone(),
            event_id: self.event.id,
            subtotal: totals.subtotal,
            discount: totals.discount,
            final_price: totals.final_price,
            date: self.event.date.clone(),
            time: self.event.time.clone(),
            tickets: self.ticket_count.get(),
            seat_preference: self.seat_tier_id,
            premium_surcharge: totals.surcharge,
            coupon_code: self.coupon.code.trim().to_owned(),
        }
    }
}
