//! # Seed Data Tool
//!
//! Populates the catalog with sample products for development, then walks
//! the read API (listing, search, categories) so a fresh checkout can be
//! inspected end to end.
//!
//! ## Usage
//! ```bash
//! # Seed the default store (platform data directory)
//! cargo run -p stockbook-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockbook-db --bin seed -- --db ./stockbook_dev.db
//! ```
//!
//! Seeding is skipped when the catalog already has rows, so the tool is
//! safe to re-run; delete the database file to start over.

use std::env;
use std::time::Instant;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockbook_core::validation::validate_product;
use stockbook_core::{Money, Product};
use stockbook_db::{ConnectionManager, DbConfig};

/// Sample catalog: (name, description, price in cents, quantity, category).
const SAMPLE_PRODUCTS: &[(&str, Option<&str>, i64, i64, &str)] = &[
    ("Ballpoint Pen", Some("Blue ink, medium tip"), 150, 120, "Office"),
    ("Legal Pad", Some("50 sheets, ruled"), 349, 60, "Office"),
    ("Stapler", Some("Full strip, metal body"), 899, 35, "Office"),
    ("Sticky Notes", Some("3x3 inch, yellow, 100 sheets"), 249, 80, "Office"),
    ("Claw Hammer", Some("16 oz fiberglass handle"), 1499, 18, "Tools"),
    ("Tape Measure", None, 799, 25, "Tools"),
    ("Screwdriver Set", Some("6 piece, phillips and flat"), 1299, 22, "Tools"),
    ("Ground Coffee", Some("Medium roast, 340 g"), 1099, 40, "Food"),
    ("Dark Chocolate Bar", None, 329, 75, "Food"),
    ("Green Tea Box", Some("20 bags"), 459, 50, "Food"),
    ("Glass Cleaner", None, 389, 30, "Cleaning"),
    ("Paper Towels", Some("2 rolls"), 549, 45, "Cleaning"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockbook Seed Data Tool");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: platform data dir)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = match db_path {
        Some(path) => DbConfig::new(path),
        None => DbConfig::new(DbConfig::default_database_path()?),
    };

    println!("🌱 Stockbook Seed Data Tool");
    println!("===========================");
    println!("Database: {}", config.database_path.display());
    println!();

    let manager = ConnectionManager::new(config);

    // A dead store is not fatal: every operation below reports its benign
    // result and the run still completes.
    match manager.initialize().await {
        Ok(()) => println!("✓ Connected, schema ready"),
        Err(e) => {
            warn!(error = %e, "Store initialization failed, continuing without a connection");
            println!("⚠ Store unavailable: {}", e);
        }
    }

    let repo = manager.products();

    // Seed only an empty catalog
    let existing = repo.count().await.unwrap_or(0);
    if existing > 0 {
        println!("⚠ Catalog already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!();
        println!("Seeding products...");

        let start = Instant::now();
        let mut inserted = 0;

        for &(name, description, price_cents, quantity, category) in SAMPLE_PRODUCTS {
            let product = Product::new(
                name,
                description.map(str::to_string),
                Money::from_cents(price_cents),
                quantity,
                category,
            );

            if let Err(e) = validate_product(&product) {
                eprintln!("  Skipping {}: {}", name, e);
                continue;
            }

            if repo.insert(&product).await {
                inserted += 1;
            } else {
                eprintln!("  Failed to insert {}", name);
            }
        }

        println!("✓ Seeded {} products in {:?}", inserted, start.elapsed());
    }

    // Walk the read API so the run doubles as a smoke check
    println!();
    println!("Catalog:");
    for product in repo.list_all().await {
        println!(
            "  #{:<4} {:<24} {:>8}  qty {:<4} [{}]",
            product.id.unwrap_or(0),
            product.name,
            product.price().to_string(),
            product.quantity,
            product.category,
        );
    }

    let hits = repo.search_by_name("pen").await;
    println!();
    println!("Search 'pen': {} results", hits.len());

    let categories = repo.list_categories().await;
    println!("Categories: {}", categories.join(", "));

    manager.close().await;
    info!("Seed run finished");

    Ok(())
}

/// Console logging for the tool; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stockbook_db=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
