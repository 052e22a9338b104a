//! Booking Flow Demo
//!
//! Interactive demonstration of the booking engine showing:
//! - Daily schedule generation with the IST refresh policy
//! - Ticket count, seat tier, and coupon transitions
//! - Derived order totals staying consistent across changes
//! - Submission through the simulated UPI payment flow
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin demo
//! ```

use anyhow::Context;
use cinebook::booking::{BookingAction, BookingStore, CustomerField};
use cinebook::payment::{MockUpiGateway, UpiPayee};
use cinebook::{BookingEnvironment, Config, ScheduleCache};
use cinebook_core::environment::SystemClock;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cinebook=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("\n🎬 ============================================");
    println!("   Cinebook - Booking Flow Demo");
    println!("============================================\n");

    // Load configuration
    let config = Config::from_env();
    let clock = Arc::new(SystemClock);

    // Step 1: Daily schedule
    println!("1️⃣  Loading today's schedule...");

    let schedule = ScheduleCache::new(clock.clone());
    let events = schedule.events().await;

    for event in &events {
        println!(
            "   {:>4}  {:<40} {}  {}",
            event.id.get(),
            event.title,
            event.date,
            event.time
        );
    }

    let event = events
        .iter()
        .find(|event| event.movie_name == "Dune")
        .context("lineup always contains the Dune drive-in")?
        .clone();

    println!(
        "\n   ✓ Selected: {} ({} per ticket)\n",
        event.title,
        event.base_price()
    );

    // Step 2: Booking session
    println!("2️⃣  Starting a booking session...");

    let env = BookingEnvironment::from_config(&config);
    let store = BookingStore::new(event, env);

    store.dispatch(BookingAction::SetTicketCount { count: 2 }).await;
    store
        .dispatch(BookingAction::SetSeatTier {
            tier: cinebook::SeatTierId::new('I'),
        })
        .await;

    let totals = store.totals().await;
    println!("   Tickets: 2 × VIP row I");
    println!("   Subtotal: {}", totals.subtotal);
    println!("   Premium seats: +{}\n", totals.surcharge);

    // Step 3: Coupon
    println!("3️⃣  Applying coupon FLAT100...");

    store
        .dispatch(BookingAction::SetCouponCode {
            code: "FLAT100".to_string(),
        })
        .await;
    store.dispatch(BookingAction::SubmitCoupon).await;

    let state = store.state().await;
    if let Some(message) = &state.coupon.message {
        println!("   {message}");
    }

    let totals = store.totals().await;
    println!("   Amount payable: {}\n", totals.final_price);

    // Step 4: Customer info and submission
    println!("4️⃣  Submitting the booking...");

    store
        .dispatch(BookingAction::SetCustomerField {
            field: CustomerField::Name,
            value: "Asha Rao".to_string(),
        })
        .await;
    store
        .dispatch(BookingAction::SetCustomerField {
            field: CustomerField::Email,
            value: "asha@example.com".to_string(),
        })
        .await;

    // Show the UPI handoff the payment page would render
    let gateway = MockUpiGateway::new(
        UpiPayee {
            vpa: config.payment.payee_vpa.clone(),
            name: config.payment.payee_name.clone(),
        },
        Duration::from_millis(config.payment.settle_delay_ms),
        config.payment.qr_ttl_secs,
        clock,
    );
    let (link, qr) = gateway.payment_request(totals.final_price);
    println!("   UPI link: {link}");
    println!("   QR image: {} (valid {}s)", qr.image_url, qr.ttl_secs);

    let payload = store.state().await.order_payload();
    println!(
        "   Order payload: {}",
        serde_json::to_string_pretty(&payload)?
    );

    store.dispatch(BookingAction::Submit).await;

    // Step 5: Confirmation
    let state = store.state().await;
    let receipt = state
        .receipt
        .context("mock gateway always settles the payment")?;

    println!("\n5️⃣  Booking confirmed!");
    println!("   Transaction: {}", receipt.transaction_id);
    println!("   Paid: {} at {}", receipt.amount, receipt.paid_at);
    println!("\n✓ Demo complete\n");

    Ok(())
}
