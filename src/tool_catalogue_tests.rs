use super::*;
use crate::tool_schema::ParamType;
use serde_json::{Map, Value, json};

fn catalogue() -> ToolCatalogue {
    ToolCatalogue::load().expect("embedded catalogue should parse")
}

#[test]
fn test_catalogue_loads_all_tools() {
    let catalogue = catalogue();
    assert_eq!(catalogue.len(), 47);
    assert!(!catalogue.is_empty());

    let per_category: Vec<(ToolCategory, usize)> = ToolCategory::ALL
        .iter()
        .map(|c| (*c, catalogue.tools_in(*c).len()))
        .collect();
    assert_eq!(
        per_category,
        vec![
            (ToolCategory::Core, 9),
            (ToolCategory::Scene, 4),
            (ToolCategory::Ui, 14),
            (ToolCategory::GameObject, 11),
            (ToolCategory::Prefab, 2),
            (ToolCategory::Script, 7),
        ]
    );
}

#[test]
fn test_tool_names_are_unique_and_prefixed() {
    let catalogue = catalogue();
    let mut seen = std::collections::HashSet::new();
    for tool in catalogue.list_tools() {
        assert!(!tool.name.is_empty());
        assert!(tool.name.starts_with("unity_"), "unexpected name {}", tool.name);
        assert!(
            tool.name.chars().all(|c| c.is_ascii_lowercase() || c == '_'),
            "unexpected characters in {}",
            tool.name
        );
        assert!(seen.insert(tool.name.clone()), "duplicate {}", tool.name);
        assert!(!tool.description.is_empty());
    }
}

#[test]
fn test_list_tools_is_order_stable() {
    let catalogue = catalogue();
    let first: Vec<&str> = catalogue.list_tools().iter().map(|t| t.name.as_str()).collect();
    let second: Vec<&str> = catalogue.list_tools().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(first, second);

    let reloaded = ToolCatalogue::load().unwrap();
    let third: Vec<&str> = reloaded.list_tools().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(first, third);

    assert_eq!(first.first(), Some(&"unity_ping"));
    assert_eq!(first.last(), Some(&"unity_set_asset_property"));
}

#[test]
fn test_categories_concatenate_in_order() {
    let catalogue = catalogue();
    let concatenated: Vec<ToolDescriptor> = ToolCategory::ALL
        .iter()
        .flat_map(|c| catalogue.tools_in(*c).to_vec())
        .collect();
    assert_eq!(concatenated.as_slice(), catalogue.list_tools());
}

#[test]
fn test_wait_for_compile_uses_non_blocking_definition() {
    let catalogue = catalogue();
    let tool = catalogue.get("unity_wait_for_compile").unwrap();
    assert!(tool.description.starts_with("Check if Unity compilation has finished"));
    assert!(tool.input_schema.properties.is_empty());
    assert!(tool.input_schema.required.is_empty());
}

#[test]
fn test_screenshot_defaults() {
    let catalogue = catalogue();
    let schema = &catalogue.get("unity_capture_screenshot").unwrap().input_schema;
    let view_type = &schema.properties["viewType"];
    assert_eq!(view_type.default, Some(json!("game")));
    assert_eq!(view_type.allowed_values, Some(vec![json!("game"), json!("scene")]));
    assert_eq!(schema.properties["width"].default, Some(json!(1920)));
    assert_eq!(schema.properties["returnBase64"].default, Some(json!(true)));
}

#[test]
fn test_required_parameters_are_preserved() {
    let catalogue = catalogue();
    let required = |name: &str| catalogue.get(name).unwrap().input_schema.required.clone();

    assert_eq!(required("unity_set_position"), vec!["name", "position"]);
    assert_eq!(required("unity_create_script"), vec!["name", "content"]);
    assert_eq!(required("unity_update_prefab"), vec!["prefabPath", "action"]);
    assert_eq!(
        required("unity_set_component_property"),
        vec!["gameObjectName", "componentType", "propertyName", "value"]
    );
    assert!(required("unity_ping").is_empty());
}

#[test]
fn test_schema_details_survive_transcription() {
    let catalogue = catalogue();

    let position = &catalogue.get("unity_set_position").unwrap().input_schema.properties["position"];
    assert_eq!(position.param_type, Some(ParamType::Array));
    assert_eq!(position.min_items, Some(3));
    assert_eq!(position.max_items, Some(3));
    assert_eq!(position.items.as_ref().unwrap().param_type, Some(ParamType::Number));

    let panel = &catalogue.get("unity_ui_create_panel").unwrap().input_schema.properties["color"];
    assert_eq!(panel.default, Some(json!("#000000AA")));

    let trail = &catalogue.get("unity_add_particle_trail").unwrap().input_schema.properties;
    assert_eq!(trail["startSize"].default, Some(json!(0.05)));

    let value = &catalogue
        .get("unity_set_asset_property")
        .unwrap()
        .input_schema
        .properties["value"];
    assert_eq!(value.param_type, None);

    let effects = &catalogue.get("unity_ui_create_text").unwrap().input_schema.properties["effects"];
    let outline = &effects.properties.as_ref().unwrap()["outline"];
    assert_eq!(outline.properties.as_ref().unwrap()["thickness"].param_type, Some(ParamType::Number));
}

#[test]
fn test_defaults_satisfy_their_own_schema() {
    let catalogue = catalogue();
    for tool in catalogue.list_tools() {
        let schema = &tool.input_schema;
        let mut arguments: Map<String, Value> = schema
            .properties
            .iter()
            .filter_map(|(name, param)| param.default.clone().map(|d| (name.clone(), d)))
            .collect();
        for name in &schema.required {
            arguments.entry(name.clone()).or_insert_with(|| {
                match schema.properties[name].param_type {
                    Some(ParamType::Array) => {
                        let n = schema.properties[name].min_items.unwrap_or(0);
                        Value::Array(vec![json!(0); n])
                    }
                    Some(ParamType::Number) | Some(ParamType::Integer) => json!(1),
                    Some(ParamType::Boolean) => json!(true),
                    Some(ParamType::Object) => json!({}),
                    _ => match &schema.properties[name].allowed_values {
                        Some(allowed) => allowed[0].clone(),
                        None => json!("Sample"),
                    },
                }
            });
        }
        assert_eq!(schema.validate(&arguments), Ok(()), "defaults rejected for {}", tool.name);
    }
}

#[test]
fn test_unknown_tool_lookup() {
    assert!(catalogue().get("unity_does_not_exist").is_none());
}

const PING_YAML: &str = r#"
- name: unity_ping
  description: "Check if Unity Editor is responding"
  inputSchema:
    type: object
    properties: {}
    required: []
"#;

#[test]
fn test_from_sources_keeps_given_order() {
    let scene = r#"
- name: unity_save_scene
  description: "Save the current scene"
  inputSchema:
    type: object
    required: []
"#;
    let catalogue =
        ToolCatalogue::from_sources(&[(ToolCategory::Scene, scene), (ToolCategory::Core, PING_YAML)]).unwrap();
    let names: Vec<&str> = catalogue.list_tools().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["unity_save_scene", "unity_ping"]);
    assert_eq!(catalogue.tools_in(ToolCategory::Core).len(), 1);
    assert!(catalogue.tools_in(ToolCategory::Ui).is_empty());
}

#[test]
fn test_duplicate_name_across_categories_is_rejected() {
    let err = ToolCatalogue::from_sources(&[(ToolCategory::Core, PING_YAML), (ToolCategory::Scene, PING_YAML)])
        .unwrap_err();
    assert!(matches!(err, CatalogueError::DuplicateTool(ref name) if name == "unity_ping"));
    assert_eq!(err.to_string(), "Duplicate tool name: unity_ping");
}

#[test]
fn test_blank_name_is_rejected() {
    let blank = r#"
- name: "   "
  description: "Nameless"
  inputSchema:
    type: object
"#;
    let err = ToolCatalogue::from_sources(&[(ToolCategory::Prefab, blank)]).unwrap_err();
    assert!(matches!(err, CatalogueError::EmptyName("prefab")));
}

#[test]
fn test_undeclared_required_parameter_is_rejected() {
    let broken = r#"
- name: unity_broken
  description: "Requires a parameter it never declares"
  inputSchema:
    type: object
    properties:
      name:
        type: string
    required: ["missing"]
"#;
    let err = ToolCatalogue::from_sources(&[(ToolCategory::Script, broken)]).unwrap_err();
    match err {
        CatalogueError::UndeclaredRequired { tool, parameter } => {
            assert_eq!(tool, "unity_broken");
            assert_eq!(parameter, "missing");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_malformed_yaml_names_its_category() {
    let err = ToolCatalogue::from_sources(&[(ToolCategory::Ui, "- name: [unclosed")]).unwrap_err();
    assert!(matches!(err, CatalogueError::Parse { category: "ui", .. }));
}

#[test]
fn test_listener_extension_tools_are_flagged() {
    let catalogue = catalogue();
    for name in [
        "unity_set_rotation",
        "unity_set_scale",
        "unity_set_tag",
        "unity_ui_set_fill_amount",
    ] {
        let tool = catalogue.get(name).unwrap();
        assert!(
            tool.description
                .ends_with("Requires a Unity listener that implements this tool."),
            "{} does not mention the listener requirement",
            name
        );
        for required in &tool.input_schema.required {
            assert_eq!(
                tool.input_schema.properties[required].default, None,
                "{}.{} is required but has a default",
                name, required
            );
        }
    }
}
