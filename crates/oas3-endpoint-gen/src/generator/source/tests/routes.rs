use std::collections::HashSet;

use http::Method;

use super::{load, mapper};
use crate::generator::{
  ast::{ContentCategory, Emit, RawRoute, StatusKey},
  source::{OperationFilter, RouteSource},
};

fn collect(filter: OperationFilter) -> Vec<RawRoute> {
  let spec = load(include_str!("../../../../fixtures/operations.json"));
  let types = mapper(&spec);
  let (routes, warnings) = RouteSource::new(&spec, &types).with_filter(filter).collect();
  assert!(warnings.is_empty(), "{warnings:?}");
  routes
}

fn find<'a>(routes: &'a [RawRoute], name: &str) -> &'a RawRoute {
  routes.iter().find(|r| r.usage_name == name).unwrap()
}

#[test]
fn test_path_order_decides_route_order() {
  let spec = load(include_str!("../../../../fixtures/operations.json"));
  let types = mapper(&spec);
  let order = ["/health", "/pets"].map(String::from);
  let (routes, _) = RouteSource::new(&spec, &types).with_path_order(&order).collect();

  let names = routes.iter().map(|r| r.usage_name.as_str()).collect::<Vec<_>>();
  assert_eq!(&names[..3], ["health", "listPets", "createPet"]);
  assert_eq!(names.len(), 6);
}

#[test]
fn test_empty_operation_security_opts_out_of_global_security() {
  let spec = load(
    r#"{
      "openapi": "3.0.3",
      "info": { "title": "Secured", "version": "1" },
      "security": [{ "apiKey": [] }],
      "paths": {
        "/health": { "get": { "operationId": "health", "security": [], "responses": {} } },
        "/pets": { "get": { "operationId": "listPets", "responses": {} } }
      }
    }"#,
  );
  let types = mapper(&spec);
  let open = HashSet::from([("/health".to_string(), Method::GET)]);

  let (routes, _) = RouteSource::new(&spec, &types).with_open_operations(&open).collect();
  assert!(!find(&routes, "health").secure);
  assert!(find(&routes, "listPets").secure);

  let (routes, _) = RouteSource::new(&spec, &types).collect();
  assert!(find(&routes, "health").secure);
}

#[test]
fn test_usage_names_are_unique() {
  let routes = collect(OperationFilter::default());
  let names = routes.iter().map(|r| r.usage_name.as_str()).collect::<HashSet<_>>();

  assert_eq!(names.len(), routes.len());
  for expected in ["health", "listPets", "createPet", "deletePetsByPetId", "uploadPhoto", "listPetsPets"] {
    assert!(names.contains(expected), "missing {expected}: {names:?}");
  }
}

#[test]
fn test_collision_appends_last_literal_segment() {
  let routes = collect(OperationFilter::default());
  let route = find(&routes, "listPetsPets");
  assert_eq!(route.path, "/stores/{storeId}/pets");
  assert_eq!(route.operation_id.as_deref(), Some("listPets"));
}

#[test]
fn test_query_params_skip_headers() {
  let routes = collect(OperationFilter::default());
  let route = find(&routes, "listPets");

  let names = route.query_params.iter().map(|p| p.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, vec!["limit", "tag"]);
  assert!(route.query_params.iter().all(|p| !p.required));
  assert!(route.path_params.is_empty());
}

#[test]
fn test_path_item_parameters_are_merged() {
  let routes = collect(OperationFilter::default());
  let route = find(&routes, "deletePetsByPetId");

  assert_eq!(route.method, Method::DELETE);
  assert_eq!(route.path_params.len(), 1);
  assert_eq!(route.path_params[0].name, "petId");
  assert_eq!(route.path_params[0].ty.emit(), "string");
  assert!(route.deprecated);
}

#[test]
fn test_json_media_type_preferred() {
  let routes = collect(OperationFilter::default());
  let route = find(&routes, "listPets");

  assert_eq!(route.responses.len(), 1);
  assert_eq!(route.responses[0].status, StatusKey::Code(200));
  assert_eq!(route.responses[0].ty.emit(), "Pet[]");
  assert_eq!(route.responses[0].content, ContentCategory::Json);
}

#[test]
fn test_request_bodies_and_content() {
  let routes = collect(OperationFilter::default());

  let create = find(&routes, "createPet");
  let body = create.request_body.as_ref().unwrap();
  assert!(body.required);
  assert_eq!(body.ty.emit(), "NewPet");
  assert!(create.secure);

  let upload = find(&routes, "uploadPhoto");
  let body = upload.request_body.as_ref().unwrap();
  assert!(!body.required);
  assert_eq!(body.content, ContentCategory::Multipart);
  assert_eq!(body.ty.emit(), "{ file?: File }");
  assert_eq!(upload.responses[0].content, ContentCategory::ByteStream);
  assert_eq!(upload.tags, vec!["Pets", "Media"]);
  assert!(!upload.secure);
}

#[test]
fn test_empty_responses_are_void() {
  let routes = collect(OperationFilter::default());
  let route = find(&routes, "deletePetsByPetId");

  let no_content = route.responses.iter().find(|r| r.status == StatusKey::Code(204)).unwrap();
  assert!(no_content.ty.is_void());
  assert!(route.responses.iter().any(|r| r.status == StatusKey::Default));
}

#[test]
fn test_filter_by_operation_id_or_usage_name() {
  let only: HashSet<String> = ["listPets".to_string(), "deletePetsByPetId".to_string()].into();
  let excluded: HashSet<String> = ["health".to_string()].into();
  let routes = collect(OperationFilter::new(Some(&only), Some(&excluded)));

  let names = routes.iter().map(|r| r.usage_name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, vec!["listPets", "deletePetsByPetId", "listPetsPets"]);
}

#[test]
fn test_exclusion_wins() {
  let only: HashSet<String> = ["health".to_string()].into();
  let routes = collect(OperationFilter::new(Some(&only), Some(&only)));
  assert!(routes.is_empty());
}
