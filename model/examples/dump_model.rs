//! Loads a definition set and prints an overview of its schemata.
//!
//! Run with: `cargo run --example dump_model -p ftm-model -- <model.json>`

use ftm_model::Model;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "model/tests/fixtures/model.json".to_owned());
    let model = Model::from_path(&path)?;

    println!("Model {path}");
    println!("  Schemata: {}", model.len());
    println!("  Types:    {}", model.types().count());
    println!();

    for schema in model.schemata() {
        let parents = schema.parents()?;
        let parents: Vec<_> = parents.iter().map(|s| s.name()).collect();
        println!(
            "  {:16} {:>2} own, {:>2} total properties  {}{}",
            schema.name(),
            schema.own_properties().count(),
            schema.properties(false)?.len(),
            if schema.is_edge() { "[edge] " } else { "" },
            parents.join(" < "),
        );
    }
    Ok(())
}
