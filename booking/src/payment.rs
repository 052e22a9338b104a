//! Simulated UPI payment collaborator.
//!
//! The booking core hands a frozen [`OrderPayload`] to a [`PaymentGateway`]
//! capability returning `Result<Receipt, PaymentError>`; that seam is where a
//! real processor integration would plug in. The shipped implementation
//! generates a UPI deep link and a time-limited QR code, then confirms the
//! payment after a short simulated delay - it never talks to a real gateway.

use crate::types::{Money, OrderPayload};
use chrono::{DateTime, Utc};
use cinebook_core::environment::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Merchant category code sent in the UPI intent
const MERCHANT_CATEGORY: &str = "5499";

/// Payment gateway result
pub type GatewayResult<T> = Result<T, PaymentError>;

/// Unique identifier for a payment
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random `PaymentId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Payment failure, opaque to the booking core
///
/// The booking flow only ever shows these with a retry option; nothing in
/// this crate retries automatically.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PaymentError {
    /// The payment could not be verified
    #[error("Payment verification failed. Please check your payment and try again.")]
    VerificationFailed,

    /// The QR code expired before the payment was made
    #[error("QR Code expired. Please close and reopen UPI payment.")]
    QrExpired,

    /// Anything else the gateway reports
    #[error("Payment error: {message}")]
    Other {
        /// Gateway-provided message
        message: String,
    },
}

/// Contact details collected before handing off to the payment app
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentContact {
    /// Email address for the receipt
    pub email: String,
    /// Ten-digit Indian mobile number (+91 implied)
    pub phone: String,
}

/// Why contact details were rejected
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ContactError {
    /// Email missing or malformed
    #[error("Please enter a valid email")]
    InvalidEmail,

    /// Phone missing or not ten digits
    #[error("Please enter a valid 10-digit phone number")]
    InvalidPhone,
}

impl PaymentContact {
    /// Validate and construct contact details
    ///
    /// # Errors
    ///
    /// Returns [`ContactError`] when the email is malformed or the phone is
    /// not exactly ten digits.
    pub fn new(email: impl Into<String>, phone: impl Into<String>) -> Result<Self, ContactError> {
        let email = email.into();
        let phone = phone.into();

        if !crate::booking::is_valid_email(&email) {
            return Err(ContactError::InvalidEmail);
        }

        if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(ContactError::InvalidPhone);
        }

        Ok(Self { email, phone })
    }
}

/// The merchant receiving UPI payments
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpiPayee {
    /// Virtual payment address, e.g. `cinebook@ibl`
    pub vpa: String,
    /// Display name shown in the payment app
    pub name: String,
}

/// Build a `upi://pay` deep link for the given amount
///
/// Amounts are rendered with two decimal places and every parameter is
/// percent-encoded, matching what payment apps expect.
#[must_use]
pub fn upi_link(payee: &UpiPayee, amount: Money, note: &str) -> String {
    let amount = format!("{}.00", amount.rupees());
    format!(
        "upi://pay?pa={}&pn={}&am={}&cu=INR&tn={}&mc={}",
        percent_encode(&payee.vpa),
        percent_encode(&payee.name),
        percent_encode(&amount),
        percent_encode(note),
        percent_encode(MERCHANT_CATEGORY),
    )
}

/// Percent-encode everything outside the RFC 3986 unreserved set
fn percent_encode(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                encoded.push('%');
                encoded.push_str(&format!("{byte:02X}"));
            }
        }
    }
    encoded
}

/// A scan-to-pay QR code with a fixed time to live
///
/// Expired codes are never silently extended - the caller must issue a
/// fresh one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCode {
    /// The UPI deep link the code encodes
    pub upi_link: String,
    /// Rendered image URL
    pub image_url: String,
    /// When the code was issued
    pub issued_at: DateTime<Utc>,
    /// Seconds the code stays valid
    pub ttl_secs: u64,
}

impl QrCode {
    /// Default time to live: two minutes
    pub const DEFAULT_TTL_SECS: u64 = 120;

    /// Issue a QR code for a UPI link
    #[must_use]
    pub fn issue(upi_link: String, issued_at: DateTime<Utc>, ttl_secs: u64) -> Self {
        let image_url = format!(
            "https://api.qrserver.com/v1/create-qr-code/?size=220x220&data={}",
            percent_encode(&upi_link)
        );
        Self {
            upi_link,
            image_url,
            issued_at,
            ttl_secs,
        }
    }

    /// When the code stops being valid
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = i64::try_from(self.ttl_secs).unwrap_or(i64::MAX);
        self.issued_at + chrono::Duration::seconds(ttl)
    }

    /// Whether the code has expired at `now`
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    /// Seconds of validity remaining at `now` (zero once expired)
    #[must_use]
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u64 {
        let remaining = self.expires_at().signed_duration_since(now).num_seconds();
        u64::try_from(remaining).unwrap_or(0)
    }
}

/// A settled payment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Payment ID (internal)
    pub payment_id: PaymentId,
    /// Gateway transaction ID
    pub transaction_id: String,
    /// Amount charged
    pub amount: Money,
    /// When the payment settled
    pub paid_at: DateTime<Utc>,
}

/// Payment gateway capability
///
/// Abstraction over the payment step so the booking flow composes with a
/// real processor later; the booking reducer only ever sees the `Result`.
pub trait PaymentGateway: Send + Sync {
    /// Process a payment for a frozen order
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError`] if the payment fails.
    fn process(&self, order: &OrderPayload) -> Pin<Box<dyn Future<Output = GatewayResult<Receipt>> + Send>>;
}

/// Mock UPI gateway (always succeeds for development)
///
/// Simulates the confirmation interval a real gateway would have, then
/// reports success unconditionally. Replace behind [`PaymentGateway`] for
/// production.
#[derive(Clone)]
pub struct MockUpiGateway {
    payee: UpiPayee,
    settle_delay: Duration,
    qr_ttl_secs: u64,
    clock: Arc<dyn Clock>,
}

impl MockUpiGateway {
    /// Creates a new mock gateway
    #[must_use]
    pub fn new(payee: UpiPayee, settle_delay: Duration, qr_ttl_secs: u64, clock: Arc<dyn Clock>) -> Self {
        Self {
            payee,
            settle_delay,
            qr_ttl_secs,
            clock,
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(
        payee: UpiPayee,
        settle_delay: Duration,
        qr_ttl_secs: u64,
        clock: Arc<dyn Clock>,
    ) -> Arc<dyn PaymentGateway> {
        Arc::new(Self::new(payee, settle_delay, qr_ttl_secs, clock))
    }

    /// Issue the deep link and QR code for an amount payable
    #[must_use]
    pub fn payment_request(&self, amount: Money) -> (String, QrCode) {
        let link = upi_link(&self.payee, amount, "Event Payment");
        let qr = QrCode::issue(link.clone(), self.clock.now(), self.qr_ttl_secs);
        (link, qr)
    }
}

impl PaymentGateway for MockUpiGateway {
    fn process(&self, order: &OrderPayload) -> Pin<Box<dyn Future<Output = GatewayResult<Receipt>> + Send>> {
        let amount = order.final_price;
        let event_title = order.event_title.clone();
        let settle_delay = self.settle_delay;
        let clock = Arc::clone(&self.clock);

        Box::pin(async move {
            // Simulate the confirmation interval
            if !settle_delay.is_zero() {
                tokio::time::sleep(settle_delay).await;
            }

            let payment_id = PaymentId::new();
            let transaction_id = format!("upi_txn_{}", Uuid::new_v4());

            tracing::info!(
                payment_id = %payment_id,
                transaction_id = %transaction_id,
                amount = amount.rupees(),
                event = %event_title,
                "mock UPI payment settled"
            );

            Ok(Receipt {
                payment_id,
                transaction_id,
                amount,
                paid_at: clock.now(),
            })
        })
    }
}
