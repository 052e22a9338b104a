//! Coupon validation capability.
//!
//! Validation is modeled as an async capability so the booking reducer can
//! treat it as an effect: the production implementation simulates gateway
//! latency before consulting the fixed catalog, while tests inject an
//! instant validator.

use crate::catalog;
use crate::pricing;
use crate::types::Money;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result of a coupon validation
pub type CouponResult = Result<AppliedCoupon, CouponError>;

/// A successfully validated coupon with its discount against the subtotal
/// it was validated for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedCoupon {
    /// Canonical (uppercase) coupon code
    pub code: String,
    /// Discount amount against the validated subtotal
    pub discount: Money,
    /// Customer-facing description of the offer
    pub description: String,
}

/// Why a coupon was rejected
///
/// All coupon errors are local and recoverable; they surface in the coupon
/// message area and never block submission.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum CouponError {
    /// The code field was empty or whitespace
    #[error("Please enter a coupon code")]
    EmptyCode,

    /// The code is not in the catalog
    #[error("Invalid coupon code. Please check and try again.")]
    UnknownCode,
}

/// Coupon validation capability
///
/// Validates a code against the current pre-surcharge subtotal. The discount
/// is a function of the subtotal, so callers must re-validate whenever the
/// subtotal changes while a coupon is applied.
pub trait CouponValidator: Send + Sync {
    /// Validate a code against a subtotal
    ///
    /// # Errors
    ///
    /// Returns [`CouponError`] when the code is empty or unknown.
    fn validate(
        &self,
        code: &str,
        subtotal: Money,
    ) -> Pin<Box<dyn Future<Output = CouponResult> + Send>>;
}

/// Catalog-backed validator with simulated gateway latency
///
/// The delay exists purely so the applying state is observable, matching the
/// pending interval a real validation service would have.
#[derive(Clone, Debug)]
pub struct CatalogCouponValidator {
    delay: Duration,
}

impl CatalogCouponValidator {
    /// Create a validator with the given simulated latency
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a validator that settles immediately (for tests and demos)
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            delay: Duration::ZERO,
        }
    }

    /// Creates an Arc-wrapped instance for sharing
    #[must_use]
    pub fn shared(delay: Duration) -> Arc<dyn CouponValidator> {
        Arc::new(Self::new(delay))
    }
}

impl Default for CatalogCouponValidator {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl CouponValidator for CatalogCouponValidator {
    fn validate(
        &self,
        code: &str,
        subtotal: Money,
    ) -> Pin<Box<dyn Future<Output = CouponResult> + Send>> {
        let code = code.trim().to_owned();
        let delay = self.delay;

        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            if code.is_empty() {
                return Err(CouponError::EmptyCode);
            }

            let Some(coupon) = catalog::coupon(&code) else {
                tracing::debug!(code = %code, "coupon rejected: unknown code");
                return Err(CouponError::UnknownCode);
            };

            let discount = pricing::coupon_discount(coupon.kind, subtotal);

            tracing::debug!(
                code = coupon.code,
                subtotal = subtotal.rupees(),
                discount = discount.rupees(),
                "coupon validated"
            );

            Ok(AppliedCoupon {
                code: coupon.code.to_owned(),
                discount,
                description: coupon.description.to_owned(),
            })
        })
    }
}
