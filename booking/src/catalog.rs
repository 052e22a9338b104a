//! Fixed reference catalogs: seat tiers and coupon codes.
//!
//! Both catalogs are immutable and shared by every booking session; they are
//! never mutated at runtime.

use crate::types::{Coupon, CouponKind, Money, SeatTier, SeatTierId};

/// The ten seating rows, in display order
///
/// The first entry is the default selection. Rows C-F are regular fare,
/// A/B/G/H carry the premium-corner surcharge, I/J are VIP.
pub const SEAT_TIERS: [SeatTier; 10] = [
    SeatTier {
        id: SeatTierId::new('C'),
        label: "C Row (Regular) - Default",
        premium: false,
        surcharge_per_ticket: Money::ZERO,
    },
    SeatTier {
        id: SeatTierId::new('D'),
        label: "D Row (Regular)",
        premium: false,
        surcharge_per_ticket: Money::ZERO,
    },
    SeatTier {
        id: SeatTierId::new('E'),
        label: "E Row (Regular)",
        premium: false,
        surcharge_per_ticket: Money::ZERO,
    },
    SeatTier {
        id: SeatTierId::new('F'),
        label: "F Row (Regular)",
        premium: false,
        surcharge_per_ticket: Money::ZERO,
    },
    SeatTier {
        id: SeatTierId::new('A'),
        label: "A Row (Premium Corner)",
        premium: true,
        surcharge_per_ticket: Money::from_rupees(400),
    },
    SeatTier {
        id: SeatTierId::new('B'),
        label: "B Row (Premium Corner)",
        premium: true,
        surcharge_per_ticket: Money::from_rupees(400),
    },
    SeatTier {
        id: SeatTierId::new('G'),
        label: "G Row (Premium Corner)",
        premium: true,
        surcharge_per_ticket: Money::from_rupees(400),
    },
    SeatTier {
        id: SeatTierId::new('H'),
        label: "H Row (Premium Corner)",
        premium: true,
        surcharge_per_ticket: Money::from_rupees(400),
    },
    SeatTier {
        id: SeatTierId::new('I'),
        label: "I Row (VIP Premium)",
        premium: true,
        surcharge_per_ticket: Money::from_rupees(600),
    },
    SeatTier {
        id: SeatTierId::new('J'),
        label: "J Row (VIP Premium)",
        premium: true,
        surcharge_per_ticket: Money::from_rupees(600),
    },
];

/// The five accepted coupon codes
pub const COUPONS: [Coupon; 5] = [
    Coupon {
        code: "WELCOME10",
        kind: CouponKind::Percentage(10),
        description: "10% off on your booking",
    },
    Coupon {
        code: "SAVE20",
        kind: CouponKind::Percentage(20),
        description: "20% off on your booking",
    },
    Coupon {
        code: "FLAT100",
        kind: CouponKind::Fixed(Money::from_rupees(100)),
        description: "₹100 off on your booking",
    },
    Coupon {
        code: "NEWUSER",
        kind: CouponKind::Percentage(15),
        description: "15% off for new users",
    },
    Coupon {
        code: "MOVIE50",
        kind: CouponKind::Fixed(Money::from_rupees(50)),
        description: "₹50 off on movie tickets",
    },
];

/// Look up a seat tier by row id
#[must_use]
pub fn seat_tier(id: SeatTierId) -> Option<&'static SeatTier> {
    SEAT_TIERS.iter().find(|tier| tier.id == id)
}

/// The default seat tier - the first regular row
#[must_use]
pub const fn default_seat_tier() -> &'static SeatTier {
    &SEAT_TIERS[0]
}

/// Look up a coupon by code
///
/// Lookup is case-insensitive; surrounding whitespace is ignored.
#[must_use]
pub fn coupon(code: &str) -> Option<&'static Coupon> {
    let code = code.trim();
    COUPONS.iter().find(|c| c.code.eq_ignore_ascii_case(code))
}
