mod common;

use std::sync::Arc;
use strata::config::BuildConfig;
use strata::high;
use strata::low::{DocumentBuilder, HttpMethod};
use strata::yaml::parse_document;

const NESTED_REFS: &str = r"openapi: 3.0.0
info:
  title: Rice and Nice
  version: '1'
paths:
  /bowls:
    get:
      responses:
        '200':
          description: ok
          content:
            application/json:
              schema:
                $ref: '#/components/schemas/Bowl'
components:
  schemas:
    Bowl:
      type: object
      properties:
        rice:
          $ref: '#/components/schemas/Rice'
        nice:
          $ref: '#/components/schemas/Nice'
    Rice:
      type: object
      properties:
        grain:
          type: string
        nice:
          $ref: '#/components/schemas/Nice'
    Nice:
      type: object
      properties:
        rice:
          $ref: '#/components/schemas/Rice'
        score:
          type: integer
";

fn schema_tree(schema: &high::Schema, depth: usize, out: &mut Vec<String>) {
    for (name, proxy) in &schema.properties {
        let child = proxy.schema().unwrap();
        out.push(format!("{depth}:{name}:{}", child.schema_type.join(",")));
        if depth < 4 {
            schema_tree(&child, depth + 1, out);
        }
    }
}

#[test]
fn test_warm_and_cold_builds_project_the_same() {
    let root = parse_document(NESTED_REFS, "").unwrap();
    let builder = DocumentBuilder::new(BuildConfig::default());

    let warm = builder.build_from_node(root.clone()).unwrap();
    // warm the cache starting from the leaves
    for name in ["Nice", "Rice"] {
        let components = &warm.document.components.as_ref().unwrap().value;
        let proxy = &components.schemas.as_ref().unwrap().value[name].value;
        assert!(proxy.schema().is_some());
    }
    let cold = builder.build_from_node(root).unwrap();

    let warm_doc = high::Document::from(&warm.document);
    let cold_doc = high::Document::from(&cold.document);
    assert_eq!(warm_doc, cold_doc);

    let warm_bowl = warm_doc.components.as_ref().unwrap().schema("Bowl").unwrap();
    let cold_bowl = cold_doc.components.as_ref().unwrap().schema("Bowl").unwrap();
    let (mut warm_tree, mut cold_tree) = (Vec::new(), Vec::new());
    schema_tree(&warm_bowl.schema().unwrap(), 0, &mut warm_tree);
    schema_tree(&cold_bowl.schema().unwrap(), 0, &mut cold_tree);
    assert_eq!(warm_tree, cold_tree);
    assert!(warm_tree.contains(&"1:nice:object".to_string()));
    assert!(warm_tree.contains(&"2:score:integer".to_string()));

    let warm_low = warm_bowl.schema().unwrap();
    let cold_low = cold_bowl.schema().unwrap();
    assert!(!Arc::ptr_eq(warm_low.go_low(), cold_low.go_low()));
}

#[test]
fn test_projection_reaches_operations_and_back() {
    let outcome = DocumentBuilder::new(BuildConfig::default())
        .build_from_str(NESTED_REFS)
        .unwrap();
    let document = high::Document::from(&outcome.document);
    assert_eq!(document.info.as_ref().unwrap().title.as_deref(), Some("Rice and Nice"));
    assert_eq!(document.operation_count(), 1);

    let item = &document.paths.as_ref().unwrap().items["/bowls"];
    let get = item.operation(HttpMethod::Get).unwrap();
    let ok = get.responses.as_ref().unwrap().find("200").unwrap();
    let schema = ok.content["application/json"].schema.as_ref().unwrap();
    assert!(schema.is_reference());
    assert_eq!(schema.reference(), Some("#/components/schemas/Bowl"));

    let bowl = schema.schema().unwrap();
    assert_eq!(bowl.schema_type, ["object"]);
    assert_eq!(bowl.properties.len(), 2);

    let low_item = item.go_low();
    assert!(low_item.get.is_some());
    let responses = get.go_low().responses.as_ref().unwrap();
    assert_eq!(responses.key_position().map(|p| p.line), Some(8));
    assert_eq!(responses.position().line, 9);
}

#[test]
fn test_petstore_projection() {
    let content = std::fs::read_to_string(common::fixture("petstore.yaml")).unwrap();
    let outcome = DocumentBuilder::new(BuildConfig::default())
        .build_from_str(&content)
        .unwrap();
    let document = high::Document::from(&outcome.document);

    assert_eq!(document.version.as_deref(), Some("3.0.3"));
    assert_eq!(document.servers[0].url.as_deref(), Some("https://petstore.example.com/v1"));
    assert_eq!(document.tags[0].name.as_deref(), Some("pets"));
    assert_eq!(document.security[0].requirements["api_key"], Vec::<String>::new());

    let item = &document.paths.as_ref().unwrap().items["/pets/{petId}"];
    assert_eq!(item.parameters.len(), 1);
    assert!(item.parameters[0].is_required());
    assert_eq!(item.parameters[0].name.as_deref(), Some("petId"));

    let list = item.get.as_ref().unwrap();
    let fallback = list.responses.as_ref().unwrap().find("404").unwrap();
    assert_eq!(fallback.description.as_deref(), Some("unexpected error"));

    let components = document.components.as_ref().unwrap();
    let pet = components.schema("Pet").unwrap().schema().unwrap();
    assert!(pet.is_required("id"));
    assert_eq!(pet.properties["id"].schema().unwrap().format.as_deref(), Some("int64"));
    let scheme = &components.security_schemes["api_key"];
    assert_eq!(scheme.name.as_deref(), Some("X-API-Key"));
}
