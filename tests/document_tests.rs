mod common;

use std::sync::Arc;
use strata::config::{BuildConfig, DepthPolicy};
use strata::error::ErrorKind;
use strata::low::{
    BuildOutcome, CancellationToken, DocumentBuilder, HttpMethod, Operation, SchemaProxy,
};
use strata::yaml::{parse_document, Position};

fn petstore() -> String {
    std::fs::read_to_string(common::fixture("petstore.yaml")).unwrap()
}

fn build(content: &str) -> BuildOutcome {
    DocumentBuilder::new(BuildConfig::default())
        .build_from_str(content)
        .unwrap()
}

fn operation<'a>(outcome: &'a BuildOutcome, path: &str, method: HttpMethod) -> &'a Operation {
    let paths = &outcome.document.paths.as_ref().unwrap().value;
    &paths.paths[path].value.operation(method).unwrap().value
}

fn component_schema(outcome: &BuildOutcome, name: &str) -> Arc<SchemaProxy> {
    let components = &outcome.document.components.as_ref().unwrap().value;
    Arc::clone(&components.schemas.as_ref().unwrap().value[name].value)
}

fn json_schema(operation: &Operation, code: &str) -> Arc<SchemaProxy> {
    let responses = &operation.responses.as_ref().unwrap().value;
    let content = responses.codes[code].value.content.as_ref().unwrap();
    Arc::clone(&content.value["application/json"].value.schema.as_ref().unwrap().value)
}

#[test]
fn test_petstore_builds_without_errors() {
    let outcome = build(&petstore());
    assert!(outcome.is_complete(), "unexpected errors: {:?}", outcome.errors);

    let document = &outcome.document;
    assert_eq!(document.version.as_ref().unwrap().value, "3.0.3");
    assert_eq!(
        document.info.as_ref().unwrap().value.title.as_ref().unwrap().value,
        "Swagger Petstore"
    );
    assert_eq!(document.paths.as_ref().unwrap().value.paths.len(), 2);
    assert_eq!(document.tags.as_ref().unwrap().value.len(), 1);
    assert_eq!(document.security.as_ref().unwrap().value.len(), 1);
    assert!(document.extensions.contains_key("x-generator"));
    assert_eq!(document.index().mapped_references().len(), 6);
}

#[test]
fn test_petstore_reports_the_pet_cycle() {
    let outcome = build(&petstore());
    assert_eq!(outcome.circular_references.len(), 1);
    let circular = &outcome.circular_references[0];
    assert_eq!(circular.journey.len(), 4);
    assert_eq!(circular.journey.first(), circular.journey.last());
    for name in ["Pet", "Owner", "Pets"] {
        let key = format!("#/components/schemas/{name}");
        assert!(circular.journey.contains(&key), "{key} missing from {circular:?}");
    }
}

#[test]
fn test_values_keep_their_source_positions() {
    let outcome = build(&petstore());
    let list = operation(&outcome, "/pets", HttpMethod::Get);
    let operation_id = list.operation_id.as_ref().unwrap();
    assert_eq!(operation_id.value, "listPets");
    assert_eq!(operation_id.position(), Position { line: 17, column: 20 });
    assert_eq!(operation_id.key_position(), Some(Position { line: 17, column: 7 }));

    let pet = component_schema(&outcome, "Pet");
    assert_eq!(pet.position(), Position { line: 90, column: 7 });
    assert_eq!(pet.key_node().unwrap().position().line, 89);
}

#[test]
fn test_referenced_objects_remember_their_reference() {
    let outcome = build(&petstore());
    let list = operation(&outcome, "/pets", HttpMethod::Get);
    let default = list.responses.as_ref().unwrap().value.default.as_ref().unwrap();
    let reference = default.reference.as_ref().unwrap();
    assert_eq!(reference.definition, "#/components/responses/Error");
    assert_eq!(
        default.value.description.as_ref().unwrap().value,
        "unexpected error"
    );
}

#[test]
fn test_references_to_one_schema_share_the_built_schema() {
    let outcome = build(&petstore());

    let from_get = json_schema(operation(&outcome, "/pets/{petId}", HttpMethod::Get), "200");
    let post = operation(&outcome, "/pets", HttpMethod::Post);
    let body = &post.request_body.as_ref().unwrap().value;
    let from_post = Arc::clone(
        &body.content.as_ref().unwrap().value["application/json"]
            .value
            .schema
            .as_ref()
            .unwrap()
            .value,
    );
    let from_components = component_schema(&outcome, "Pet");

    let first = from_get.schema().unwrap();
    assert!(Arc::ptr_eq(&first, &from_post.schema().unwrap()));
    assert!(Arc::ptr_eq(&first, &from_components.schema().unwrap()));
    assert!(!Arc::ptr_eq(&from_get, &from_post));
}

#[test]
fn test_cyclic_schemas_resolve_lazily() {
    let outcome = build(&petstore());
    let pets = json_schema(operation(&outcome, "/pets", HttpMethod::Get), "200");
    let pets = pets.schema().unwrap();
    assert_eq!(pets.max_items.as_ref().unwrap().value, 100);

    let pet = pets.items.as_ref().unwrap().value.schema().unwrap();
    let owner = pet.properties.as_ref().unwrap().value["owner"].value.schema().unwrap();
    let back = owner.properties.as_ref().unwrap().value["pets"].value.schema().unwrap();
    assert!(Arc::ptr_eq(&pets, &back));
    assert!(pet.is_required("name"));
    assert!(!pet.is_required("tag"));
}

#[test]
fn test_proxy_errors_are_stable() {
    let outcome = build(
        "openapi: 3.0.0\ncomponents:\n  schemas:\n    A:\n      properties:\n        b:\n          $ref: '#/components/schemas/Gone'\n",
    );
    let a = component_schema(&outcome, "A").schema().unwrap();
    let b = Arc::clone(&a.properties.as_ref().unwrap().value["b"].value);

    let first = b.build_error().unwrap();
    let second = b.build_error().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.kind(), Some(ErrorKind::ReferenceNotFound));
    assert_eq!(first.position(), Some(Position { line: 7, column: 17 }));
    assert!(b.schema().is_none());
}

#[test]
fn test_resolution_order_does_not_change_the_result() {
    let root = parse_document(&petstore(), "").unwrap();
    let builder = DocumentBuilder::new(BuildConfig::default());

    let forward = builder.build_from_node(root.clone()).unwrap();
    let pet_first = component_schema(&forward, "Pet").schema().unwrap();
    let pets_after = component_schema(&forward, "Pets").schema().unwrap();

    let backward = builder.build_from_node(root).unwrap();
    let pets_first = component_schema(&backward, "Pets").schema().unwrap();
    let pet_after = component_schema(&backward, "Pet").schema().unwrap();

    assert!(pet_first.node.same(&pet_after.node));
    assert!(pets_first.node.same(&pets_after.node));
    assert_eq!(pet_first.depth, pet_after.depth);
    assert_eq!(
        strata::high::Schema::new(pet_first),
        strata::high::Schema::new(pet_after)
    );
}

fn nested_document(levels: usize) -> String {
    let mut content = String::from("openapi: 3.0.0\ncomponents:\n  schemas:\n    Deep:\n");
    let mut indent = String::from("      ");
    for _ in 0..levels {
        content.push_str(&format!("{indent}properties:\n{indent}  next:\n"));
        indent.push_str("    ");
    }
    content.push_str(&format!("{indent}type: string\n"));
    content
}

fn descend(proxy: &Arc<SchemaProxy>, hops: usize) -> Arc<SchemaProxy> {
    let mut proxy = Arc::clone(proxy);
    for _ in 0..hops {
        let schema = proxy.schema().unwrap();
        let next = Arc::clone(&schema.properties.as_ref().unwrap().value["next"].value);
        proxy = next;
    }
    proxy
}

#[test]
fn test_error_depth_policy_fails_the_deep_proxy() {
    let config = BuildConfig::default().with_max_depth(2, DepthPolicy::Error);
    let outcome = DocumentBuilder::new(config)
        .build_from_str(&nested_document(5))
        .unwrap();
    assert!(outcome.is_complete());

    let deep = component_schema(&outcome, "Deep");
    assert!(descend(&deep, 2).schema().is_some());
    let too_deep = descend(&deep, 3);
    let error = too_deep.build_error().unwrap();
    assert_eq!(error.kind(), Some(ErrorKind::ExcessiveDepth));
    assert!(error.to_string().contains("exceeds the limit of 2"));
}

#[test]
fn test_truncate_depth_policy_builds_without_children() {
    let config = BuildConfig::default().with_max_depth(2, DepthPolicy::Truncate);
    let outcome = DocumentBuilder::new(config)
        .build_from_str(&nested_document(5))
        .unwrap();

    let deep = component_schema(&outcome, "Deep");
    let last = descend(&deep, 3).schema().unwrap();
    assert!(last.truncated);
    assert!(last.properties.is_none());
    assert!(!descend(&deep, 2).schema().unwrap().truncated);
}

#[test]
fn test_partial_failure_keeps_the_rest() {
    let outcome = build(
        "openapi: 3.0.0\ninfo: [not, a, mapping]\npaths:\n  /ok:\n    get:\n      operationId: fine\n  /bad:\n    $ref: '#/nowhere'\n",
    );
    assert!(!outcome.is_complete());
    assert!(outcome.document.info.is_none());

    let paths = &outcome.document.paths.as_ref().unwrap().value.paths;
    assert!(paths.contains_key("/ok"));
    assert!(!paths.contains_key("/bad"));

    let kinds: Vec<_> = outcome.errors.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        [Some(ErrorKind::TypeMismatch), Some(ErrorKind::ReferenceNotFound)]
    );
    let lines: Vec<_> = outcome
        .errors
        .iter()
        .map(|e| e.position().unwrap().line)
        .collect();
    assert_eq!(lines, [2, 8]);
}

#[test]
fn test_cancelled_build_reports_cancellation() {
    let token = CancellationToken::new();
    token.cancel();
    let outcome = DocumentBuilder::new(BuildConfig::default())
        .with_cancellation(token)
        .build_from_str(&petstore())
        .unwrap();

    assert!(outcome.document.paths.is_none());
    assert!(outcome
        .errors
        .iter()
        .any(|e| e.kind() == Some(ErrorKind::Cancelled)));
}

#[test]
fn test_dedicated_pool_gives_the_same_document() {
    let config = BuildConfig {
        max_threads: Some(2),
        parallel_threshold: 1,
        ..BuildConfig::default()
    };
    let outcome = DocumentBuilder::new(config)
        .build_from_str(&petstore())
        .unwrap();
    assert!(outcome.is_complete());
    let document = strata::high::Document::from(&outcome.document);
    assert_eq!(document.operation_count(), 3);
    assert_eq!(document.components.as_ref().unwrap().schemas.len(), 4);
}

#[test]
fn test_json_documents_build_too() {
    let outcome = build(
        r##"{"openapi": "3.0.1", "info": {"title": "J", "version": "1"},
  "components": {"schemas": {"A": {"$ref": "#/components/schemas/B"}, "B": {"type": "integer"}}}}"##,
    );
    assert!(outcome.is_complete());
    let a = component_schema(&outcome, "A");
    assert_eq!(a.reference(), Some("#/components/schemas/B"));
    assert_eq!(a.schema().unwrap().node.position().line, 2);
}
