//! Demo driver: generate blends for a few representative profiles against
//! the bundled catalog.
//!
//! Usage: demo_formulas [catalog.json]

use anyhow::Result;
use herbal_formulator_rust::{Formulator, ProfileInput};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/plants_db.json".to_string());
    let formulator = Formulator::load(&path)?;
    println!("Catalog: {} plants ({})\n", formulator.catalog().len(), path);

    let profiles: Vec<(&str, ProfileInput)> = vec![
        (
            "Sleep & anxiety (evening blend)",
            serde_json::from_value(serde_json::json!({
                "priorities": ["sleep", "anxiety"],
                "anxiety_level": 8,
                "insomnia_level": 8
            }))?,
        ),
        (
            "Energy & focus (daytime blend)",
            serde_json::from_value(serde_json::json!({
                "priorities": ["energy", "focus"],
                "anxiety_level": 0
            }))?,
        ),
        (
            "Calm during pregnancy",
            serde_json::from_value(serde_json::json!({
                "priorities": ["sleep", "anxiety"],
                "conditions": {"pregnancy": true}
            }))?,
        ),
    ];

    for (label, input) in &profiles {
        println!("--- {} ---", label);
        let formula = formulator.generate(input)?;
        if formula.components.is_empty() {
            println!("  No safe plants match the criteria.\n");
            continue;
        }
        println!("  Total dose: {}g per infusion", formula.total_grams);
        for component in &formula.components {
            println!(
                "  {:<10} {:<18} {:>5.1}%  {:>5.2}g  {}",
                component.role,
                component.name,
                component.percent,
                component.grams,
                component.reason.as_deref().unwrap_or("-")
            );
        }
        println!();
    }

    Ok(())
}
