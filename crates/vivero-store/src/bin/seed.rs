//! # Seed Data Generator
//!
//! Populates a data directory with sample inventory and the default
//! admin account for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./data (default)
//! cargo run -p vivero-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p vivero-store --bin seed -- --data-dir ./mi_vivero
//! ```
//!
//! Seeds every category: priced plants, plus tools, products and pots.
//! Quantities straddle the low-stock threshold so the status column
//! shows both classifications out of the box.

use std::env;

use tracing_subscriber::EnvFilter;

use vivero_core::{Category, InventoryCollection, Money};
use vivero_store::{NewItem, Store, StoreConfig};

/// Sample plants: name, quantity, unit price in cents, description.
const PLANTS: &[(&str, i64, i64, &str)] = &[
    ("Rosa", 25, 500, "rosal de exterior"),
    ("Tulipán", 8, 350, "bulbo de temporada"),
    ("Orquídea", 5, 1250, "interior, luz indirecta"),
    ("Lavanda", 40, 425, "aromática"),
    ("Cactus", 60, 275, "suculenta, riego escaso"),
    ("Helecho", 12, 600, "sombra, riego frecuente"),
];

/// Sample unpriced stock: name, quantity, description.
const TOOLS: &[(&str, i64, &str)] = &[
    ("Pala", 15, "mango de madera"),
    ("Tijeras de podar", 9, "acero inoxidable"),
    ("Regadera", 20, "5 litros"),
];

const PRODUCTS: &[(&str, i64, &str)] = &[
    ("Sustrato universal", 30, "saco 20L"),
    ("Fertilizante líquido", 10, "botella 1L"),
    ("Antiplagas", 6, "pulverizador 500ml"),
];

const POTS: &[(&str, i64, &str)] = &[
    ("Macetero barro 20cm", 35, "barro cocido"),
    ("Macetero plástico 15cm", 50, "varios colores"),
    ("Macetero colgante", 7, "con cadena"),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut data_dir = String::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vivero POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <PATH>  Data directory (default: ./data)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Vivero POS Seed Data Generator");
    println!("=================================");
    println!("Data directory: {}", data_dir);
    println!();

    let store = Store::open(StoreConfig::new(&data_dir))?;
    let inventory = store.inventory();

    for category in Category::ALL {
        let existing = inventory.load(category)?;
        if !existing.is_empty() {
            println!(
                "⚠ {} already has {} items, skipping",
                category.file_name(),
                existing.len()
            );
            continue;
        }

        let mut collection = InventoryCollection::empty(category);
        match category {
            Category::Plants => {
                for (index, (name, quantity, cents, description)) in PLANTS.iter().enumerate() {
                    inventory.add_item(&mut collection, sample(category, index, name, *quantity, Some(Money::from_cents(*cents)), description))?;
                }
            }
            Category::Tools => seed_unpriced(&inventory, &mut collection, TOOLS)?,
            Category::Products => seed_unpriced(&inventory, &mut collection, PRODUCTS)?,
            Category::Pots => seed_unpriced(&inventory, &mut collection, POTS)?,
        }
        println!("✓ Seeded {} ({} items)", category.file_name(), collection.len());
    }

    // Touching the user file seeds the default admin when absent.
    let users = store.users().load()?;
    println!("✓ {} user account(s) on file", users.len());

    println!();
    println!("✓ Seed complete!");
    Ok(())
}

fn seed_unpriced(
    inventory: &vivero_store::InventoryRepository,
    collection: &mut InventoryCollection,
    rows: &[(&str, i64, &str)],
) -> Result<(), Box<dyn std::error::Error>> {
    let category = collection.category;
    for (index, (name, quantity, description)) in rows.iter().enumerate() {
        inventory.add_item(collection, sample(category, index, name, *quantity, None, description))?;
    }
    Ok(())
}

/// Builds a sample candidate with a category-prefixed id.
fn sample(
    category: Category,
    index: usize,
    name: &str,
    quantity: i64,
    unit_price: Option<Money>,
    description: &str,
) -> NewItem {
    let prefix = match category {
        Category::Plants => "P",
        Category::Tools => "H",
        Category::Products => "PR",
        Category::Pots => "M",
    };
    NewItem {
        id: format!("{}-{:03}", prefix, index + 1),
        name: name.to_string(),
        quantity,
        description: description.to_string(),
        unit_price,
    }
}
