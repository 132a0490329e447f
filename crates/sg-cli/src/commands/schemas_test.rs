use super::*;

fn config(yaml: &str) -> Config {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn test_merge_schemas_marks_sources() {
    let config = config("name: acme\nschemas: [SALES, MARKETING]\ndefault_schema: MARKETING\n");
    let warehouse = vec![SchemaName::new("ANALYTICS"), SchemaName::new("SALES")];

    let entries = merge_schemas(warehouse, &config);
    let names: Vec<&str> = entries.iter().map(|e| e.schema.as_str()).collect();
    assert_eq!(names, vec!["ANALYTICS", "SALES", "MARKETING"]);

    assert!(!entries[0].configured);
    assert!(entries[1].in_warehouse && entries[1].configured && !entries[1].default);
    assert!(!entries[2].in_warehouse && entries[2].default);
}

#[test]
fn test_merge_schemas_without_config_list() {
    let config = config("name: acme\n");
    let entries = merge_schemas(vec![SchemaName::new("a")], &config);
    assert_eq!(
        entries,
        vec![SchemaEntry {
            schema: SchemaName::new("a"),
            in_warehouse: true,
            configured: false,
            default: false,
        }]
    );
}
