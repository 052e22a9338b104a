//! Domain types for the cinebook booking engine.
//!
//! This module contains the value objects and entities shared by the pricing
//! engine, the booking state machine, and the external collaborators
//! (schedule cache, payment gateway).

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identifiers
// ============================================================================

/// Unique identifier for a screening event
///
/// Events come from a fixed catalog with small numeric ids, so this wraps an
/// integer rather than a UUID.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(u32);

impl EventId {
    /// Create an `EventId` from its raw value
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a seat tier - the row letter shown to the customer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatTierId(char);

impl SeatTierId {
    /// Create a `SeatTierId` from its row letter
    #[must_use]
    pub const fn new(row: char) -> Self {
        Self(row)
    }

    /// Get the row letter
    #[must_use]
    pub const fn row(&self) -> char {
        self.0
    }
}

impl fmt::Display for SeatTierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Money Value Object (whole rupees - every listed price is integral)
// ============================================================================

/// Represents an amount in whole rupees
///
/// All catalog prices, surcharges, and coupon values are integral rupee
/// amounts, so the representation avoids fractional units entirely.
/// Subtraction saturates at zero, which is exactly the clamping the final
/// price requires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money(u64);

impl Money {
    /// Zero rupees
    pub const ZERO: Self = Self(0);

    /// Creates a `Money` value from whole rupees
    #[must_use]
    pub const fn from_rupees(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Returns the amount in whole rupees
    #[must_use]
    pub const fn rupees(&self) -> u64 {
        self.0
    }

    /// Checks if the amount is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Adds two money amounts with overflow checking
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Adds two money amounts, saturating at `u64::MAX`
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts two money amounts, saturating at zero
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiplies money by a quantity with overflow checking
    #[must_use]
    pub const fn checked_multiply(self, quantity: u32) -> Option<Self> {
        match self.0.checked_mul(quantity as u64) {
            Some(result) => Some(Self(result)),
            None => None,
        }
    }

    /// Multiplies money by a quantity, saturating at `u64::MAX`
    #[must_use]
    pub const fn saturating_multiply(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    /// Returns the smaller of two amounts
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.0 <= other.0 { self } else { other }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

// ============================================================================
// Ticket Count
// ============================================================================

/// Number of tickets in an order, clamped to the per-order limit
///
/// The business rule is a hard maximum of two tickets per order; requests
/// outside `1..=2` are clamped at construction, so a `TicketCount` is valid
/// by definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TicketCount(u32);

impl TicketCount {
    /// Minimum tickets per order
    pub const MIN: u32 = 1;

    /// Maximum tickets per order
    pub const MAX: u32 = 2;

    /// Create a ticket count, clamping the input into `MIN..=MAX`
    #[must_use]
    pub const fn clamped(count: u32) -> Self {
        if count < Self::MIN {
            Self(Self::MIN)
        } else if count > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(count)
        }
    }

    /// Get the count
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl Default for TicketCount {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for TicketCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Screening Events
// ============================================================================

/// Kind of screening, which determines the base ticket price
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    /// Drive-in cinema screening
    #[serde(rename = "Drive-in")]
    DriveIn,
    /// Open air screening
    #[serde(rename = "Open Air")]
    OpenAir,
    /// Private screening
    #[serde(rename = "Private Screening")]
    PrivateScreening,
    /// Special event
    #[serde(rename = "Special Event")]
    SpecialEvent,
}

impl EventType {
    /// Base price per ticket for this kind of screening
    ///
    /// Drive-in screenings are ₹899 per ticket; every other kind is ₹799.
    #[must_use]
    pub const fn base_price(&self) -> Money {
        match self {
            Self::DriveIn => Money::from_rupees(899),
            Self::OpenAir | Self::PrivateScreening | Self::SpecialEvent => Money::from_rupees(799),
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DriveIn => "Drive-in",
            Self::OpenAir => "Open Air",
            Self::PrivateScreening => "Private Screening",
            Self::SpecialEvent => "Special Event",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A screening event, owned by the schedule collaborator
///
/// The booking core reads `event_type` to select the base price; every other
/// field passes through unmodified to the order payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreeningEvent {
    /// Event identifier
    pub id: EventId,
    /// Display title
    pub title: String,
    /// Kind of screening (selects the base price)
    pub event_type: EventType,
    /// Formatted show date, e.g. `August 6, 2026`
    pub date: String,
    /// Show time, e.g. `8:00 pm`
    pub time: String,
    /// Venue
    pub location: String,
    /// Capacity as displayed, e.g. `120 cars`
    pub capacity: String,
    /// City the venue is in
    pub city: String,
    /// Name of the movie being screened
    pub movie_name: String,
}

impl ScreeningEvent {
    /// Base price per ticket, derived from the event type
    #[must_use]
    pub const fn base_price(&self) -> Money {
        self.event_type.base_price()
    }
}

// ============================================================================
// Seat Tiers (reference data)
// ============================================================================

/// A seating row with its per-ticket surcharge
///
/// Immutable reference data - see [`crate::catalog::SEAT_TIERS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SeatTier {
    /// Row identifier
    pub id: SeatTierId,
    /// Display label, e.g. `I Row (VIP Premium)`
    pub label: &'static str,
    /// Whether this row carries a surcharge
    pub premium: bool,
    /// Surcharge per ticket (zero for regular rows)
    pub surcharge_per_ticket: Money,
}

// ============================================================================
// Coupons (reference data)
// ============================================================================

/// How a coupon discounts the pre-surcharge subtotal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouponKind {
    /// Percentage off the subtotal
    Percentage(u32),
    /// Fixed amount off, capped at the subtotal
    Fixed(Money),
}

/// A coupon code with its discount rule
///
/// Immutable reference data - see [`crate::catalog::COUPONS`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Coupon {
    /// Canonical (uppercase) code
    pub code: &'static str,
    /// Discount rule
    pub kind: CouponKind,
    /// Customer-facing description
    pub description: &'static str,
}

// ============================================================================
// Customers and Orders
// ============================================================================

/// Customer details collected in the booking form
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Full name, required non-empty
    pub name: String,
    /// Email address the tickets are sent to
    pub email: String,
}

/// Totals derived by the pricing engine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Base price × ticket count, before surcharge and discount
    pub subtotal: Money,
    /// Seat tier surcharge × ticket count
    pub surcharge: Money,
    /// Applied coupon discount (zero without a valid coupon)
    pub discount: Money,
    /// `subtotal + surcharge - discount`, clamped at zero
    pub final_price: Money,
}

/// The frozen order contract handed to the payment collaborator
///
/// Every field is populated when `Submit` succeeds; the payment step treats
/// this as read-only input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPayload {
    /// Event title
    pub event_title: String,
    /// Event identifier
    pub event_id: EventId,
    /// Pre-surcharge subtotal
    pub subtotal: Money,
    /// Applied discount
    pub discount: Money,
    /// Amount payable
    pub final_price: Money,
    /// Show date
    pub date: String,
    /// Show time
    pub time: String,
    /// Number of tickets
    pub tickets: u32,
    /// Selected seat row
    pub seat_preference: SeatTierId,
    /// Total premium surcharge
    pub premium_surcharge: Money,
    /// Coupon code as entered (empty when none was applied)
    pub coupon_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_saturating_sub_clamps_at_zero() {
        let small = Money::from_rupees(50);
        let big = Money::from_rupees(100);
        assert_eq!(small.saturating_sub(big), Money::ZERO);
        assert_eq!(big.saturating_sub(small), Money::from_rupees(50));
    }

    #[test]
    fn money_min_picks_smaller_amount() {
        let a = Money::from_rupees(100);
        let b = Money::from_rupees(799);
        assert_eq!(a.min(b), a);
        assert_eq!(b.min(a), a);
    }

    #[test]
    fn money_display_uses_rupee_sign() {
        assert_eq!(Money::from_rupees(2898).to_string(), "₹2898");
    }

    #[test]
    fn ticket_count_clamps_to_order_limit() {
        assert_eq!(TicketCount::clamped(0).get(), 1);
        assert_eq!(TicketCount::clamped(1).get(), 1);
        assert_eq!(TicketCount::clamped(2).get(), 2);
        assert_eq!(TicketCount::clamped(3).get(), 2);
        assert_eq!(TicketCount::clamped(u32::MAX).get(), 2);
    }

    #[test]
    fn drive_in_base_price_is_higher() {
        assert_eq!(EventType::DriveIn.base_price(), Money::from_rupees(899));
        assert_eq!(EventType::OpenAir.base_price(), Money::from_rupees(799));
        assert_eq!(EventType::SpecialEvent.base_price(), Money::from_rupees(799));
        assert_eq!(
            EventType::PrivateScreening.base_price(),
            Money::from_rupees(799)
        );
    }
}
