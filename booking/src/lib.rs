//! Cinebook - a movie-event discovery and ticket booking engine
//!
//! This crate implements the pricing and booking-state core of a movie-event
//! ticketing flow using the cinebook reducer architecture:
//!
//! ```text
//! Schedule Cache ──seeds──▶ BookingState
//!                                │
//! UI events ──▶ BookingAction ──▶ BookingReducer ──▶ Effects
//!                                │                      │
//!                       Pricing Engine           Coupon Validator
//!                     (pure derivations)         Payment Gateway
//! ```
//!
//! # Key Invariants
//!
//! ## 1. Derived values are never stale
//!
//! Seat surcharge and coupon discount are functions of the current inputs.
//! Every transition that changes a price-affecting input recomputes them,
//! and the pricing engine is re-invoked (never cached) for the order
//! summary:
//!
//! ```text
//! surcharge   = tier.surcharge_per_ticket × ticket_count
//! discount    = percentage: round(subtotal × pct / 100)
//!               fixed:      min(value, subtotal)
//! final_price = max(0, subtotal + surcharge − discount)
//! ```
//!
//! ## 2. Transitions are atomic
//!
//! Each user interaction is one reducer invocation; no transition observes a
//! partially-updated state. The only operation with an observable pending
//! interval is coupon validation, and at most one is in flight per session.
//!
//! ## 3. Collaborators are capabilities
//!
//! Coupon validation and payment sit behind traits returning `Result`, so
//! the always-succeeds mock gateway can be replaced by a real processor
//! without touching the booking core.
//!
//! # Usage
//!
//! See the [`booking`] module for the state machine and `src/bin/demo.rs`
//! for a full walkthrough of the flow.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod booking;
pub mod catalog;
pub mod config;
pub mod coupons;
pub mod payment;
pub mod pricing;
pub mod schedule;
pub mod types;

pub use booking::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, BookingStore, CustomerField,
    Field,
};
pub use config::Config;
pub use schedule::{RefreshPolicy, ScheduleCache};
pub use types::*;
