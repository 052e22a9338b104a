//! Actions for the booking state machine.
//!
//! Each user interaction maps to one action; the two `*Resolved`/`*Settled`
//! variants are fed back by effects when async collaborators settle. Every
//! action is one atomic transition - no transition observes a
//! partially-updated state.

use crate::coupons::CouponResult;
use crate::payment::{PaymentError, Receipt};
use crate::types::SeatTierId;
use serde::{Deserialize, Serialize};

use super::types::Field;

/// A customer-editable form field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerField {
    /// Full name
    Name,
    /// Email address
    Email,
}

impl From<CustomerField> for Field {
    fn from(field: CustomerField) -> Self {
        match field {
            CustomerField::Name => Self::Name,
            CustomerField::Email => Self::Email,
        }
    }
}

/// Transitions of a booking session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum BookingAction {
    /// Change the number of tickets
    ///
    /// Out-of-range counts are clamped to the per-order limit. If a coupon
    /// is currently valid it is re-validated against the new subtotal.
    SetTicketCount {
        /// Requested ticket count
        count: u32,
    },

    /// Select a seat tier
    ///
    /// Unknown tier ids leave the selection unchanged.
    SetSeatTier {
        /// Row to select
        tier: SeatTierId,
    },

    /// Update the coupon code text
    ///
    /// Clears any previous coupon message; validation waits for an explicit
    /// [`BookingAction::SubmitCoupon`].
    SetCouponCode {
        /// Raw text as typed
        code: String,
    },

    /// Submit the entered coupon code for validation
    SubmitCoupon,

    /// A coupon validation settled (fed back by the validation effect)
    CouponResolved {
        /// Validation outcome
        outcome: CouponResult,
    },

    /// Edit a customer info field
    ///
    /// Optimistically clears that field's validation error; it is
    /// re-checked at submit.
    SetCustomerField {
        /// Field being edited
        field: CustomerField,
        /// New value
        value: String,
    },

    /// Recompute the validation errors without submitting
    Validate,

    /// Submit the booking
    ///
    /// No-op (with errors surfaced) unless validation passes; otherwise the
    /// frozen order payload is handed to the payment collaborator.
    Submit,

    /// The payment collaborator settled (fed back by the payment effect)
    PaymentSettled {
        /// Payment outcome
        outcome: Result<Receipt, PaymentError>,
    },
}
