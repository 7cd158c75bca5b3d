//! End-to-end behaviour of the engine against definition sets.
//!
//! Uses the small ontology in `tests/fixtures/model.json` plus inline
//! definitions for edge cases.

use std::path::PathBuf;

use ftm_model::{Model, ModelError, Property, PropertyRef, Schema};

fn fixture() -> Model {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/model.json");
    Model::from_path(path).expect("fixture loads")
}

fn schema<'m>(model: &'m Model, name: &str) -> Schema<'m> {
    model.get_schema(name).expect("schema is registered")
}

fn find<'m>(model: &'m Model, qname: &str) -> Property<'m> {
    model
        .find_property(qname)
        .expect("schema is registered")
        .expect("property is declared")
}

fn names(schemata: &[Schema<'_>]) -> Vec<String> {
    schemata.iter().map(|s| s.name().to_owned()).collect()
}

// =============================================================================
// Thing / Person / Company / Ownership
// =============================================================================

const SCENARIO: &str = r#"{
    "schemata": {
        "Thing": {"extends": [], "schemata": ["Thing"], "properties": {}},
        "Person": {"extends": ["Thing"], "schemata": ["Thing", "Person"],
                   "properties": {"name": {"type": "string"}}},
        "Company": {"extends": ["Thing"], "schemata": ["Thing", "Company"],
                    "properties": {"name": {"type": "string"}}},
        "Ownership": {"extends": [], "schemata": ["Ownership"],
                      "properties": {
                          "owner": {"type": "entity", "range": "Company", "reverse": "ownedBy"}
                      }}
    },
    "types": {"string": {}, "entity": {}}
}"#;

fn scenario() -> Model {
    Model::from_json(SCENARIO).expect("scenario loads")
}

#[test]
fn scenario_person_is_a_thing() {
    let model = scenario();
    let person = schema(&model, "Person");
    assert!(person.is_a("Thing"));
    let parents = person.parents().expect("parents resolve");
    assert_eq!(names(&parents), ["Thing"]);
}

#[test]
fn scenario_owner_range_and_missing_reverse() {
    let model = scenario();
    let owner = schema(&model, "Ownership")
        .property("owner")
        .expect("properties resolve")
        .expect("owner is declared");
    let range = owner.range().expect("range resolves");
    assert_eq!(range.map(|s| s.name()), Some("Company"));
    assert!(matches!(owner.reverse(), Ok(None)));
}

#[test]
fn scenario_same_named_properties_stay_distinct() {
    let model = scenario();
    let (person, company) = (schema(&model, "Person"), schema(&model, "Company"));
    let person_name = person
        .property("name")
        .expect("properties resolve")
        .expect("name is declared");
    assert!(company.has_property("name").expect("properties resolve"));
    assert!(!company.has_property(person_name).expect("properties resolve"));
}

#[test]
fn unknown_schema_is_hard_but_is_a_is_total() {
    let model = scenario();
    assert!(matches!(
        model.get_schema("nonexistent"),
        Err(ModelError::UnknownSchema { .. })
    ));
    assert_eq!(model.len(), 4);
    for schema in model.schemata() {
        assert!(!schema.is_a("nonexistent"));
        assert!(!schema.is_a(""));
        assert!(!schema.is_any(["nonexistent", "also missing"]));
    }
}

// =============================================================================
// Fixture ontology
// =============================================================================

#[test]
fn fixture_loads_every_schema() {
    let model = fixture();
    assert_eq!(model.len(), 12);
    assert_eq!(model.types().count(), 10);
}

#[test]
fn is_thing_follows_ancestor_list() {
    let model = fixture();
    for schema in model.schemata() {
        let listed = schema.schemata_names().iter().any(|s| s == Schema::THING);
        assert_eq!(schema.is_thing(), listed, "{schema}");
    }
    let thing_like: Vec<_> = model
        .schemata()
        .filter(Schema::is_thing)
        .map(|s| s.name())
        .collect();
    assert_eq!(
        thing_like,
        ["Thing", "Address", "LegalEntity", "Person", "Organization", "Asset", "Company"]
    );
}

#[test]
fn company_inherits_through_diamond() {
    let model = fixture();
    let company = schema(&model, "Company");
    let parents = company.parents().expect("parents resolve");
    assert_eq!(
        names(&parents),
        ["Organization", "LegalEntity", "Thing", "Asset", "Value"]
    );

    let props = company.properties(false).expect("properties resolve");
    assert_eq!(props.get("amount").map(|p| p.qname()), Some("Company.amount"));
    assert_eq!(props.get("currency").map(|p| p.qname()), Some("Value.currency"));
    assert_eq!(props.get("name").map(|p| p.qname()), Some("Thing.name"));
    assert!(props.contains_key("directorshipOrganization"));
    assert!(props.contains_key("ownershipAsset"));

    let qualified = company.properties(true).expect("properties resolve");
    assert!(qualified.contains_key("Value.amount"));
    assert!(qualified.contains_key("Company.amount"));
}

#[test]
fn children_of_legal_entity() {
    let model = fixture();
    let children = schema(&model, "LegalEntity").children().expect("children resolve");
    assert_eq!(names(&children), ["Person", "Organization", "Company"]);
}

#[test]
fn interval_children_are_the_edges() {
    let model = fixture();
    let children = schema(&model, "Interval").children().expect("children resolve");
    assert_eq!(names(&children), ["Interest", "Ownership", "Directorship"]);
    assert_eq!(children.iter().filter(|s| s.is_edge()).count(), 2);
}

#[test]
fn reverse_properties_pair_up() {
    let model = fixture();
    for qname in [
        "Ownership.owner",
        "Ownership.asset",
        "Directorship.director",
        "Directorship.organization",
        "Thing.addressEntity",
    ] {
        let prop = find(&model, qname);
        let reverse = prop
            .reverse()
            .expect("range resolves")
            .unwrap_or_else(|| panic!("{qname} has no reverse"));
        let back = reverse.reverse().expect("range resolves");
        assert_eq!(back, Some(prop), "{qname} does not pair back");
    }
}

#[test]
fn reverse_on_inherited_property() {
    let model = fixture();
    // Person inherits ownershipOwner from LegalEntity; its reverse points at
    // Ownership.owner whose range is LegalEntity.
    let prop = schema(&model, "Person")
        .property("ownershipOwner")
        .expect("properties resolve")
        .expect("ownershipOwner is inherited");
    assert_eq!(prop.schema().name(), "LegalEntity");
    let reverse = prop.reverse().expect("range resolves");
    assert_eq!(reverse.map(|p| p.qname()), Some("Ownership.owner"));
}

#[test]
fn dangling_reverse_is_absent() {
    let model = fixture();
    let secretary = find(&model, "Directorship.secretary");
    let range = secretary.range().expect("range resolves");
    assert_eq!(range.map(|s| s.name()), Some("Person"));
    assert!(matches!(secretary.reverse(), Ok(None)));
}

#[test]
fn featured_and_caption_resolve_through_inheritance() {
    let model = fixture();
    let company = schema(&model, "Company");
    let featured = company.featured_properties().expect("properties resolve");
    let qnames: Vec<_> = featured.iter().map(|p| p.qname()).collect();
    assert_eq!(
        qnames,
        ["Thing.name", "Company.jurisdiction", "Company.registrationNumber"]
    );
    let caption = company.caption_properties().expect("properties resolve");
    assert_eq!(caption.len(), 1);
}

#[test]
fn ownership_edge_metadata() {
    let model = fixture();
    let ownership = schema(&model, "Ownership");
    let edge = ownership.edge().expect("Ownership is an edge");
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("owner", "asset"));
    assert_eq!(edge.label.as_deref(), Some("owns"));
    let source = ownership
        .edge_source()
        .expect("properties resolve")
        .expect("source is declared");
    let source_range = source.range().expect("range resolves");
    assert_eq!(source_range.map(|s| s.name()), Some("LegalEntity"));
    let caption = ownership.edge_caption().expect("properties resolve");
    let caption: Vec<_> = caption.iter().map(|p| p.name()).collect();
    assert_eq!(caption, ["percentage", "role"]);
    assert!(!ownership.is_thing());
}

#[test]
fn property_ref_accepts_names_and_properties() {
    let model = fixture();
    let person = schema(&model, "Person");
    let name = person
        .property("name")
        .expect("properties resolve")
        .expect("name is inherited");
    let by_name = PropertyRef::from("name");
    assert!(!Property::is_property(Some(&by_name)));
    let resolved = PropertyRef::from(name);
    assert!(Property::is_property(Some(&resolved)));
    assert_eq!(resolved.as_property(), Some(name));
    assert_eq!(person.property(resolved).expect("passthrough"), Some(name));
}

#[test]
fn all_parents_unions_closures() {
    let model = fixture();
    let (person, ownership) = (schema(&model, "Person"), schema(&model, "Ownership"));
    let all = Schema::all_parents(&[person, ownership]).expect("parents resolve");
    assert_eq!(
        names(&all),
        ["Person", "Ownership", "LegalEntity", "Thing", "Interest", "Interval"]
    );
}

#[test]
fn type_descriptors_carry_definition_fields() {
    let model = fixture();
    let entity = model.get_type("entity").expect("entity is registered");
    assert_eq!(entity.plural, "Entities");
    assert!(entity.pivot);
    assert!(matches!(model.get_type("money"), Err(ModelError::UnknownType { .. })));
}

#[test]
fn dump_and_reload_preserves_structure() {
    let model = fixture();
    let json = serde_json::to_string(&model.to_definition()).expect("definition serializes");
    let reloaded = Model::from_json(&json).expect("dump reloads");
    assert_eq!(
        model.schemata().map(|s| s.name()).collect::<Vec<_>>(),
        reloaded.schemata().map(|s| s.name()).collect::<Vec<_>>()
    );
    let parents = schema(&reloaded, "Company").parents().expect("parents resolve");
    assert_eq!(parents.len(), 5);
}
