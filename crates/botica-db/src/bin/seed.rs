//! # Seed Data Generator
//!
//! Populates the database with pharmacy categories, suppliers and products
//! for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p botica-db --bin seed
//!
//! # Specify database path
//! cargo run -p botica-db --bin seed -- --db ./data/botica.db
//! ```
//!
//! A few products start below their minimum stock and one above its
//! maximum, so `/inventario?nivel=bajo`, `/inventario?nivel=alto` and
//! `/inventario/faltantes` return something out of the box.

use anyhow::Context;
use botica_core::{Money, NewSupplier, ProductDraft, ProductStatus};
use botica_db::{Database, DbConfig};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::env;

const CATEGORIES: &[&str] = &[
    "Analgésicos",
    "Antibióticos",
    "Antialérgicos",
    "Vitaminas",
    "Hormonas",
    "Material de curación",
    "Cuidado personal",
];

/// (name, email, phone)
const SUPPLIERS: &[(&str, &str, &str)] = &[
    ("Droguería Central", "ventas@drogueriacentral.pe", "01-4411234"),
    ("Albis", "pedidos@albis.pe", "01-6152000"),
    ("Química Suiza", "cotizaciones@quimicasuiza.pe", "01-2114000"),
];

struct SeedProduct {
    code: &'static str,
    name: &'static str,
    category: &'static str,
    supplier: usize,
    unit: &'static str,
    location: &'static str,
    stock: (i64, i64, Option<i64>),
    purchase_cents: i64,
    sale_cents: i64,
    expires: Option<(i32, u32, u32)>,
}

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        code: "PARA-500",
        name: "Paracetamol 500mg",
        category: "Analgésicos",
        supplier: 0,
        unit: "tablet",
        location: "A1",
        stock: (240, 100, Some(1000)),
        purchase_cents: 5,
        sale_cents: 20,
        expires: Some((2027, 6, 30)),
    },
    SeedProduct {
        code: "IBU-400",
        name: "Ibuprofeno 400mg",
        category: "Analgésicos",
        supplier: 0,
        unit: "tablet",
        location: "A1",
        stock: (40, 80, Some(600)),
        purchase_cents: 8,
        sale_cents: 30,
        expires: Some((2026, 12, 31)),
    },
    SeedProduct {
        code: "AMOX-500",
        name: "Amoxicilina 500mg",
        category: "Antibióticos",
        supplier: 1,
        unit: "capsule",
        location: "A2",
        stock: (12, 50, Some(300)),
        purchase_cents: 25,
        sale_cents: 80,
        expires: Some((2026, 9, 30)),
    },
    SeedProduct {
        code: "AZI-500",
        name: "Azitromicina 500mg",
        category: "Antibióticos",
        supplier: 1,
        unit: "box",
        location: "A2",
        stock: (18, 10, Some(40)),
        purchase_cents: 1200,
        sale_cents: 2500,
        expires: Some((2027, 1, 31)),
    },
    SeedProduct {
        code: "LORA-10",
        name: "Loratadina 10mg",
        category: "Antialérgicos",
        supplier: 2,
        unit: "tablet",
        location: "B1",
        stock: (900, 100, Some(500)),
        purchase_cents: 6,
        sale_cents: 25,
        expires: Some((2027, 3, 31)),
    },
    SeedProduct {
        code: "VITC-1G",
        name: "Vitamina C 1g efervescente",
        category: "Vitaminas",
        supplier: 2,
        unit: "package",
        location: "B2",
        stock: (35, 20, None),
        purchase_cents: 650,
        sale_cents: 1290,
        expires: Some((2026, 11, 30)),
    },
    SeedProduct {
        code: "INSU-NPH",
        name: "Insulina NPH 100UI/ml",
        category: "Hormonas",
        supplier: 1,
        unit: "bottle",
        location: "REFRIGERATOR",
        stock: (3, 6, Some(20)),
        purchase_cents: 3800,
        sale_cents: 5200,
        expires: Some((2026, 5, 31)),
    },
    SeedProduct {
        code: "ALC-70",
        name: "Alcohol 70% 1L",
        category: "Material de curación",
        supplier: 0,
        unit: "liter",
        location: "WAREHOUSE",
        stock: (24, 12, Some(60)),
        purchase_cents: 550,
        sale_cents: 990,
        expires: None,
    },
    SeedProduct {
        code: "GASA-10",
        name: "Gasas estériles 10x10",
        category: "Material de curación",
        supplier: 0,
        unit: "package",
        location: "C1",
        stock: (0, 15, None),
        purchase_cents: 120,
        sale_cents: 300,
        expires: None,
    },
    SeedProduct {
        code: "PROT-50",
        name: "Protector solar FPS 50",
        category: "Cuidado personal",
        supplier: 2,
        unit: "bottle",
        location: "C2",
        stock: (14, 5, Some(30)),
        purchase_cents: 2800,
        sale_cents: 4590,
        expires: Some((2027, 8, 31)),
    },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./botica.db");

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
                println!("Botica Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./botica.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Botica Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening {}", db_path))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let mut category_ids = HashMap::new();
    for name in CATEGORIES {
        let id = db.categories().insert(name).await?;
        category_ids.insert(*name, id);
    }
    println!("✓ {} categories", category_ids.len());

    let mut supplier_ids = Vec::with_capacity(SUPPLIERS.len());
    for (name, email, phone) in SUPPLIERS {
        let id = db
            .suppliers()
            .insert(&NewSupplier {
                name: name.to_string(),
                email: Some(email.to_string()),
                phone: Some(phone.to_string()),
            })
            .await?;
        supplier_ids.push(id);
    }
    println!("✓ {} suppliers", supplier_ids.len());

    let mut generated = 0;
    for seed in PRODUCTS {
        let (current, minimum, maximum) = seed.stock;
        let draft = ProductDraft {
            code: Some(seed.code.to_string()),
            name: seed.name.to_string(),
            description: String::new(),
            current_stock: current,
            minimum_stock: minimum,
            maximum_stock: maximum,
            unit_of_measure: seed.unit.to_string(),
            purchase_price: Money::from_cents(seed.purchase_cents),
            sale_price: Money::from_cents(seed.sale_cents),
            location: Some(seed.location.to_string()),
            batch: Some(format!("L-{}", seed.code)),
            expiration_date: seed
                .expires
                .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            category_id: category_ids.get(seed.category).copied(),
            supplier_id: supplier_ids.get(seed.supplier).copied(),
            status: ProductStatus::Active,
        };

        if let Err(e) = db.products().insert(&draft).await {
            eprintln!("Failed to insert {}: {}", seed.code, e);
            continue;
        }
        generated += 1;
    }
    println!("✓ {} products", generated);

    let shortages = db.products().list_shortages().await?;
    println!();
    println!("Products below minimum stock:");
    for product in shortages.iter() {
        println!(
            "  - {} ({} / min {})",
            product.name, product.current_stock, product.minimum_stock
        );
    }

    db.close().await;

    println!();
    println!("🎉 Seed complete!");
    Ok(())
}
