//! The pricing engine: pure derivations over booking inputs.
//!
//! Every function here is a pure function of its arguments - no hidden state,
//! no I/O. Callers re-invoke these on every input change rather than caching
//! results; the booking reducer relies on that to keep the order summary
//! consistent.

use crate::types::{CouponKind, Money, OrderTotals, SeatTier, TicketCount};

/// Pre-surcharge subtotal: base price × ticket count
#[must_use]
pub const fn subtotal(base_price: Money, tickets: TicketCount) -> Money {
    base_price.saturating_multiply(tickets.get())
}

/// Seat surcharge: per-ticket surcharge × ticket count
///
/// Zero for regular rows.
#[must_use]
pub const fn seat_surcharge(tier: &SeatTier, tickets: TicketCount) -> Money {
    tier.surcharge_per_ticket.saturating_multiply(tickets.get())
}

/// Discount a coupon yields against a pre-surcharge subtotal
///
/// Percentage coupons round half-up; fixed coupons are capped at the
/// subtotal. Either way the discount never exceeds the subtotal.
#[must_use]
pub const fn coupon_discount(kind: CouponKind, subtotal: Money) -> Money {
    match kind {
        CouponKind::Percentage(pct) => {
            let discounted = (subtotal.rupees() * pct as u64 + 50) / 100;
            Money::from_rupees(discounted).min(subtotal)
        }
        CouponKind::Fixed(amount) => amount.min(subtotal),
    }
}

/// Derive the complete order totals
///
/// `discount` is whatever the coupon state currently carries (zero without a
/// valid coupon); it is re-capped at the subtotal here so a stale discount
/// can never push the final price below zero:
///
/// `final_price = max(0, subtotal + surcharge - discount)`
#[must_use]
pub const fn compute_order_total(
    base_price: Money,
    tickets: TicketCount,
    tier: &SeatTier,
    discount: Money,
) -> OrderTotals {
    let subtotal = subtotal(base_price, tickets);
    let surcharge = seat_surcharge(tier, tickets);
    let discount = discount.min(subtotal);
    let final_price = subtotal.saturating_add(surcharge).saturating_sub(discount);

    OrderTotals {
        subtotal,
        surcharge,
        discount,
        final_price,
    }
}
