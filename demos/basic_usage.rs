// ============================================================================
// Basic Usage Example
// ============================================================================

use cash_positions::currency::iso4217::{EUR, JPY, USD};
use cash_positions::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() -> Result<(), MoneyError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Cash Positions Example ===\n");

    // Static currencies: mixing USD and EUR does not compile
    let price = Position::new(Cash::new(USD), Decimal::new(1999, 2))?;
    let tax = price * Decimal::new(8, 2);
    println!("Price {} + tax {} = {}", price, tax, price + tax);

    let yen = 1500i64 * Cash::new(JPY);
    println!("Yen carry no minor digits: {}", yen);

    let split = Position::new(Cash::new(EUR), 100)? / 3i64;
    println!("EUR 100 split three ways: {} each", split);

    // Runtime currencies: mismatches are reported as errors
    let usd = Position::new(Cash::of("USD")?, 10)?;
    let eur = Position::new(Cash::of("EUR")?, 10)?;
    match usd.checked_add(&eur) {
        Ok(total) => println!("Unexpected total: {}", total),
        Err(err) => println!("\nRefused: {}", err),
    }

    // A private registry with an extra currency
    println!("\n=== Custom Registry ===");
    let registry = CurrencyRegistryBuilder::new()
        .without_iso_4217()
        .with_tag::<USD>()
        .with_currency(("BTC", 8u8, "XBT", "Bitcoin"))
        .build(Arc::new(LoggingEventHandler))?;

    for identifier in registry.identifiers() {
        println!("  {}", registry.lookup(&identifier)?);
    }

    let btc = Cash::in_registry(&registry, "BTC")?;
    let sats = Position::new(btc, Decimal::new(123_456_789, 9))?;
    println!("  holding {}", sats);

    // Moving between the two representations
    let dynamic = price.into_dynamic()?;
    let back: Position<Cash<USD>> = dynamic.clone().downcast()?;
    println!("\nRound trip {} -> {} -> {}", price, dynamic, back);

    Ok(())
}
