//! # Demo Data Generator
//!
//! Populates the database with demo customers and point histories for
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p aurum-db --bin seed
//!
//! # Specify database path
//! cargo run -p aurum-db --bin seed -- --db ./data/loyalty.db
//! ```
//!
//! ## Generated Data
//! The reward catalog is seeded by migration; this binary adds a handful
//! of demo customers whose ledgers exercise every entry kind:
//! - earns across several simulated orders
//! - a redemption where affordable
//! - a manual adjustment (including one account pushed negative)

use std::env;

use aurum_core::EntryKind;
use aurum_db::repository::ledger::RedeemOutcome;
use aurum_db::{Database, DbConfig};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Demo customers: (email, display name, earn deltas per order).
const DEMO_CUSTOMERS: &[(&str, &str, &[i64])] = &[
    ("maria.lopez@example.com", "Maria Lopez", &[1000, 450, 220]),
    ("james.chen@example.com", "James Chen", &[90, 60]),
    ("priya.patel@example.com", "Priya Patel", &[5200, 1800]),
    ("tomas.novak@example.com", "Tomas Novak", &[300]),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./loyalty_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Aurum Loyalty Demo Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./loyalty_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Aurum Loyalty Demo Data Generator");
    println!("====================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database (runs migrations, which also seed the catalog)
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing customers
    let existing = db.customers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} customers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating demo customers...");

    let free_shipping = db
        .rewards()
        .get_by_name("FreeShipping")
        .await?
        .ok_or("catalog seed missing FreeShipping")?;

    for (email, name, earns) in DEMO_CUSTOMERS {
        let customer = db.customers().upsert(email, name).await?;

        for (order, delta) in earns.iter().enumerate() {
            let reason = format!("Order #{:04}", 1001 + order);
            db.ledger()
                .append(&customer.id, EntryKind::Earn, *delta, Some(&reason))
                .await?;
        }

        // Redeem where affordable so histories show negative entries too
        match db.ledger().redeem(&customer.id, &free_shipping).await? {
            RedeemOutcome::Posted(_) => {}
            RedeemOutcome::InsufficientBalance { balance } => {
                println!("  {} skipped redemption (balance {})", email, balance);
            }
        }

        let balance = db.ledger().balance(&customer.id).await?;
        println!("  {} → balance {}", email, balance);
    }

    // One account with a fraud reversal pushing the balance negative
    let flagged = db
        .customers()
        .upsert("flagged@example.com", "Flagged Account")
        .await?;
    db.ledger()
        .append(&flagged.id, EntryKind::Earn, 150, Some("Order #9001"))
        .await?;
    db.ledger()
        .append(
            &flagged.id,
            EntryKind::ManualAdjust,
            -750,
            Some("fraud reversal: chargeback on Order #9001"),
        )
        .await?;
    let balance = db.ledger().balance(&flagged.id).await?;
    println!("  flagged@example.com → balance {}", balance);

    let customers = db.customers().count().await?;
    let entries = db.ledger().count().await?;

    println!();
    println!("✓ Seed complete: {} customers, {} ledger entries", customers, entries);

    Ok(())
}
