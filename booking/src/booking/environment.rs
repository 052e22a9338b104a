//! Environment dependencies for the booking reducer.

use crate::config::Config;
use crate::coupons::{CatalogCouponValidator, CouponValidator};
use crate::payment::{MockUpiGateway, PaymentGateway, UpiPayee};
use cinebook_core::environment::{Clock, SystemClock};
use std::sync::Arc;
use std::time::Duration;

/// Injected dependencies for the booking reducer
///
/// All collaborators sit behind traits so tests can swap in instant or
/// failing implementations.
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for timestamps
    pub clock: Arc<dyn Clock>,
    /// Coupon validation capability
    pub coupons: Arc<dyn CouponValidator>,
    /// Payment capability
    pub payments: Arc<dyn PaymentGateway>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        coupons: Arc<dyn CouponValidator>,
        payments: Arc<dyn PaymentGateway>,
    ) -> Self {
        Self {
            clock,
            coupons,
            payments,
        }
    }

    /// Production wiring: system clock, catalog validator, mock UPI gateway
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let coupons = CatalogCouponValidator::shared(Duration::from_millis(
            config.coupons.apply_delay_ms,
        ));
        let payments = MockUpiGateway::shared(
            UpiPayee {
                vpa: config.payment.payee_vpa.clone(),
                name: config.payment.payee_name.clone(),
            },
            Duration::from_millis(config.payment.settle_delay_ms),
            config.payment.qr_ttl_secs,
            Arc::clone(&clock),
        );
        Self::new(clock, coupons, payments)
    }
}
