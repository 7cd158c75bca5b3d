//! `ftm-inspect`: queries a definition set from the command line.
//!
//! **Usage:**
//! ```text
//! ftm-inspect [--model <path>] [--json] schemata
//! ftm-inspect [--model <path>] [--json] schema <name>
//! ftm-inspect [--model <path>] [--json] is-a <schema> <other>
//! ftm-inspect [--model <path>] [--json] property <schema.name>
//! ftm-inspect [--model <path>] dump
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ftm_clients::{init_tracing, ModelArgs};
use ftm_model::{Model, Property, Schema};
use serde_json::{json, Value};

/// Inspect an entity-type definition set.
#[derive(Parser)]
#[command(name = "ftm-inspect", about = "Query an entity-type definition set")]
struct Args {
    #[command(flatten)]
    model: ModelArgs,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every schema with its label and flags.
    Schemata,
    /// Show one schema: metadata, ancestry and properties.
    Schema {
        /// Schema name.
        name: String,
    },
    /// Test whether one schema is a specialization of another.
    IsA {
        /// Schema to test.
        schema: String,
        /// Candidate ancestor.
        other: String,
    },
    /// Show a property by qualified name, with its range and reverse.
    Property {
        /// Qualified name, `Schema.property`.
        qname: String,
    },
    /// Re-export the definition set as JSON.
    Dump,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let model = args.model.load()?;

    let output = match &args.command {
        Command::Schemata => schemata(&model, args.json),
        Command::Schema { name } => schema(&model, name, args.json)?,
        Command::IsA { schema, other } => is_a(&model, schema, other, args.json)?,
        Command::Property { qname } => property(&model, qname, args.json)?,
        Command::Dump => serde_json::to_string_pretty(&model.to_definition())
            .context("Failed to serialize model")?,
    };
    println!("{output}");
    Ok(())
}

fn names<'m>(schemata: &[Schema<'m>]) -> Vec<&'m str> {
    schemata.iter().map(|s| s.name()).collect()
}

fn flags(schema: Schema<'_>) -> Vec<&'static str> {
    [
        (schema.is_abstract(), "abstract"),
        (schema.hidden(), "hidden"),
        (schema.matchable(), "matchable"),
        (schema.generated(), "generated"),
        (schema.is_edge(), "edge"),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect()
}

fn schemata(model: &Model, as_json: bool) -> String {
    if as_json {
        let list: Vec<Value> = model
            .schemata()
            .map(|s| json!({"name": s.name(), "label": s.label(), "flags": flags(s)}))
            .collect();
        return Value::Array(list).to_string();
    }
    model
        .schemata()
        .map(|s| format!("{:<24} {:<24} {}", s.name(), s.label(), flags(s).join(" ")))
        .collect::<Vec<_>>()
        .join("\n")
}

fn schema(model: &Model, name: &str, as_json: bool) -> Result<String> {
    let schema = model.get_schema(name)?;
    let parents = schema.parents()?;
    let children = schema.children()?;
    let properties = schema.properties(false)?;

    if as_json {
        let props: Vec<Value> = properties.values().map(|p| property_json(*p)).collect();
        return Ok(json!({
            "name": schema.name(),
            "label": schema.label(),
            "plural": schema.plural(),
            "description": schema.description(),
            "flags": flags(schema),
            "extends": schema.extends_names(),
            "parents": names(&parents),
            "children": names(&children),
            "featured": schema.featured(),
            "properties": props,
        })
        .to_string());
    }

    let mut lines = vec![
        format!("{} ({} / {})", schema, schema.label(), schema.plural()),
        format!("  flags:    {}", flags(schema).join(" ")),
        format!("  extends:  {}", schema.extends_names().join(", ")),
        format!("  parents:  {}", names(&parents).join(", ")),
        format!("  children: {}", names(&children).join(", ")),
        format!("  featured: {}", schema.featured().join(", ")),
    ];
    if let Some(description) = schema.description() {
        lines.push(format!("  {description}"));
    }
    lines.push(format!("  properties ({}):", properties.len()));
    for prop in properties.values() {
        let range = prop.range_name().map(|r| format!(" -> {r}")).unwrap_or_default();
        lines.push(format!("    {:<32} {}{}", prop.qname(), prop.type_(), range));
    }
    Ok(lines.join("\n"))
}

fn is_a(model: &Model, schema: &str, other: &str, as_json: bool) -> Result<String> {
    let schema = model.get_schema(schema)?;
    let other = model.get_schema(other)?;
    let result = schema.is_a(other);
    if as_json {
        let value = json!({"schema": schema.name(), "other": other.name(), "is_a": result});
        return Ok(value.to_string());
    }
    Ok(result.to_string())
}

fn property_json(prop: Property<'_>) -> Value {
    json!({
        "qname": prop.qname(),
        "label": prop.label(),
        "type": prop.type_().name,
        "range": prop.range_name(),
        "reverse": prop.reverse_name(),
        "stub": prop.stub(),
        "hidden": prop.hidden(),
    })
}

fn property(model: &Model, qname: &str, as_json: bool) -> Result<String> {
    let Some(prop) = model.find_property(qname)? else {
        bail!("Unknown property: {qname}");
    };
    let range = prop.range()?;
    let reverse = prop.reverse()?;

    if as_json {
        let mut value = property_json(prop);
        value["reverse_property"] = reverse.map_or(Value::Null, property_json);
        return Ok(value.to_string());
    }

    let mut lines = vec![
        format!("{} ({})", prop, prop.label()),
        format!("  type:    {}", prop.type_()),
    ];
    if let Some(range) = range {
        lines.push(format!("  range:   {range}"));
    }
    match (prop.reverse_name(), reverse) {
        (_, Some(reverse)) => lines.push(format!("  reverse: {reverse}")),
        (Some(name), None) => lines.push(format!("  reverse: {name} (dangling)")),
        (None, None) => {}
    }
    if let Some(description) = prop.description() {
        lines.push(format!("  {description}"));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFINITION: &str = r#"{
        "schemata": {
            "Thing": {"extends": [], "schemata": ["Thing"],
                      "properties": {"name": {"type": "string"}}},
            "Person": {"extends": ["Thing"], "schemata": ["Thing", "Person"], "matchable": true,
                       "properties": {"friend": {"type": "string", "range": "Person",
                                                 "reverse": "friendOf"}}}
        },
        "types": {"string": {}}
    }"#;

    fn model() -> Model {
        Model::from_json(DEFINITION).expect("test definition loads")
    }

    #[test]
    fn names_outlive_the_slice() {
        let model = model();
        let listed = {
            let parents = model
                .get_schema("Person")
                .and_then(|s| s.parents())
                .expect("parents resolve");
            names(&parents)
        };
        assert_eq!(listed, ["Thing"]);
    }

    #[test]
    fn schema_lists_parents_and_properties() {
        let out = schema(&model(), "Person", false).expect("Person is registered");
        assert!(out.starts_with("Person (Person / Person)"));
        assert!(out.contains("  flags:    matchable"));
        assert!(out.contains("  parents:  Thing"));
        assert!(out.contains("Thing.name"));
        assert!(out.contains("Person.friend"));
        assert!(schema(&model(), "Vessel", false).is_err());
    }

    #[test]
    fn schema_json_carries_ancestry() {
        let out = schema(&model(), "Thing", true).expect("Thing is registered");
        let value: Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(value["children"], json!(["Person"]));
        assert_eq!(value["properties"][0]["qname"], "Thing.name");
    }

    #[test]
    fn is_a_answers_both_ways() {
        let model = model();
        assert_eq!(is_a(&model, "Person", "Thing", false).expect("known"), "true");
        assert_eq!(is_a(&model, "Thing", "Person", false).expect("known"), "false");
        let out = is_a(&model, "Person", "Thing", true).expect("known");
        let value: Value = serde_json::from_str(&out).expect("valid JSON");
        assert_eq!(value["is_a"], true);
    }

    #[test]
    fn property_reports_dangling_reverse() {
        let model = model();
        let out = property(&model, "Person.friend", false).expect("declared");
        assert!(out.contains("  range:   Person"));
        assert!(out.contains("  reverse: friendOf (dangling)"));
        assert!(property(&model, "Person.nope", false).is_err());
    }
}
