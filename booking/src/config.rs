//! Configuration management for the booking application.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// UPI payment configuration
    pub payment: PaymentConfig,
    /// Coupon validation configuration
    pub coupons: CouponConfig,
    /// Logging configuration
    pub log: LogConfig,
}

/// UPI payment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    /// Virtual payment address payments are collected on
    pub payee_vpa: String,
    /// Merchant display name shown in payment apps
    pub payee_name: String,
    /// Simulated settle delay in milliseconds
    pub settle_delay_ms: u64,
    /// QR code time to live in seconds
    pub qr_ttl_secs: u64,
}

/// Coupon validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponConfig {
    /// Simulated validation latency in milliseconds
    pub apply_delay_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            payment: PaymentConfig {
                payee_vpa: env::var("UPI_PAYEE_VPA")
                    .unwrap_or_else(|_| "cinebook@ibl".to_string()),
                payee_name: env::var("UPI_PAYEE_NAME")
                    .unwrap_or_else(|_| "Cinebook Screenings".to_string()),
                settle_delay_ms: env::var("PAYMENT_SETTLE_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3000),
                qr_ttl_secs: env::var("PAYMENT_QR_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(120),
            },
            coupons: CouponConfig {
                apply_delay_ms: env::var("COUPON_APPLY_DELAY_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(500),
            },
            log: LogConfig {
                level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            },
        }
    }
}
