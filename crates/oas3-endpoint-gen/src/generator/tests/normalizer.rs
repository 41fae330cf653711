use http::Method;

use super::{normalized_routes, operations};
use crate::generator::{
  ast::{ContentCategory, Emit, ParamKind, RawRoute, RequestBody, RouteParam, RouteResponse, StatusKey, TsType},
  config::GeneratorConfig,
  normalizer::RouteNormalizer,
};

fn param(name: &str, binding: &str, required: bool) -> RouteParam {
  RouteParam::builder()
    .name(name)
    .binding(binding)
    .ty(TsType::Primitive(crate::generator::ast::TsPrimitive::String))
    .required(required)
    .build()
}

fn kinds(route: &crate::generator::ast::Route) -> Vec<(ParamKind, &str, bool)> {
  route
    .params
    .iter()
    .map(|p| (p.kind, p.name.as_str(), p.optional))
    .collect()
}

#[test]
fn test_prefix_and_suffix_wrap_the_request_path() {
  let config = GeneratorConfig::builder().path_prefix("/api").path_suffix("/").build();
  let raw = RawRoute::builder()
    .usage_name("getPet")
    .method(Method::GET)
    .path("/pets/{id}")
    .path_params(vec![param("id", "id", true)])
    .build();
  let route = RouteNormalizer::new(&config).normalize(raw).unwrap();

  assert_eq!(route.raw_path, "/pets/{id}");
  assert_eq!(route.request_path, "/api/pets/{id}/");
  assert_eq!(route.template.to_template_literal(str::to_string), "`/api/pets/${id}/`");
  assert_eq!(route.template.declaration(), vec!["api", "pets", "id"]);
}

#[test]
fn test_signature_order_moves_optional_arguments_last() {
  let raw = RawRoute::builder()
    .usage_name("updatePet")
    .method(Method::PUT)
    .path("/pets/{petId}")
    .path_params(vec![param("petId", "petId", true)])
    .query_params(vec![param("dryRun", "dryRun", false)])
    .request_body(RequestBody {
      ty: TsType::named("Pet"),
      required: true,
      content: ContentCategory::Json,
    })
    .build();
  let config = GeneratorConfig::default();
  let route = RouteNormalizer::new(&config).normalize(raw).unwrap();

  assert_eq!(
    kinds(&route),
    vec![
      (ParamKind::Path, "petId", false),
      (ParamKind::Body, "body", false),
      (ParamKind::Query, "query", true),
      (ParamKind::RequestOptions, "requestParams", true),
    ]
  );
  assert_eq!(route.param(ParamKind::Query).unwrap().ty.emit(), "{ dryRun?: string }");
}

#[test]
fn test_optional_body_follows_required_query() {
  let raw = RawRoute::builder()
    .usage_name("search")
    .method(Method::POST)
    .path("/search")
    .query_params(vec![param("q", "q", true)])
    .request_body(RequestBody {
      ty: TsType::named("Filter"),
      required: false,
      content: ContentCategory::FormUrlEncoded,
    })
    .build();
  let config = GeneratorConfig::default();
  let route = RouteNormalizer::new(&config).normalize(raw).unwrap();

  assert_eq!(
    kinds(&route),
    vec![
      (ParamKind::Query, "query", false),
      (ParamKind::Body, "body", true),
      (ParamKind::RequestOptions, "requestParams", true),
    ]
  );
  assert_eq!(route.request_content, Some("application/x-www-form-urlencoded"));
}

#[test]
fn test_path_bindings_avoid_fixed_argument_names() {
  let raw = RawRoute::builder()
    .usage_name("getQuery")
    .method(Method::GET)
    .path("/queries/{query}/{body}")
    .path_params(vec![param("query", "query", true), param("body", "body", true)])
    .build();
  let config = GeneratorConfig::default();
  let route = RouteNormalizer::new(&config).normalize(raw).unwrap();

  let bindings = route.path_params.iter().map(|p| p.binding.as_str()).collect::<Vec<_>>();
  assert_eq!(bindings, vec!["query2", "body2"]);
  assert_eq!(
    route.template.to_template_literal(|name| {
      route
        .path_params
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.binding.clone())
        .unwrap()
    }),
    "`/queries/${query2}/${body2}`"
  );
}

#[test]
fn test_combined_params_fold_path_and_query() {
  let config = GeneratorConfig::builder().combine_path_and_query(true).build();
  let routes = normalized_routes(&operations(), &config);

  let store = routes.iter().find(|r| r.unit_name == "listPetsPets").unwrap();
  assert_eq!(
    kinds(store),
    vec![
      (ParamKind::Combined, "params", false),
      (ParamKind::RequestOptions, "requestParams", true),
    ]
  );

  let list = routes.iter().find(|r| r.unit_name == "listPets").unwrap();
  assert_eq!(list.param(ParamKind::Combined).map(|p| p.optional), Some(true));

  let health = routes.iter().find(|r| r.unit_name == "health").unwrap();
  assert!(health.param(ParamKind::Combined).is_none());
}

#[test]
fn test_add_path_segment_prefixes_unit_names() {
  let config = GeneratorConfig::builder().add_path_segment(0).build();
  let routes = normalized_routes(&operations(), &config);
  let names = routes.iter().map(|r| r.unit_name.as_str()).collect::<Vec<_>>();

  assert!(names.contains(&"petsListPets"), "{names:?}");
  assert!(names.contains(&"storesListPetsPets"), "{names:?}");
  assert!(names.contains(&"healthHealth"), "{names:?}");
}

#[test]
fn test_operation_id_falls_back_to_usage_name() {
  let routes = normalized_routes(&operations(), &GeneratorConfig::default());
  let delete = routes.iter().find(|r| r.unit_name == "deletePetsByPetId").unwrap();
  assert_eq!(delete.operation_id, "deletePetsByPetId");

  let stores = routes.iter().find(|r| r.unit_name == "listPetsPets").unwrap();
  assert_eq!(stores.operation_id, "listPets");
}

#[test]
fn test_response_format_from_first_success() {
  let raw = RawRoute::builder()
    .usage_name("download")
    .method(Method::GET)
    .path("/files/{id}")
    .path_params(vec![param("id", "id", true)])
    .responses(vec![
      RouteResponse {
        status: StatusKey::Code(404),
        ty: TsType::named("Error"),
        content: ContentCategory::Json,
      },
      RouteResponse {
        status: StatusKey::Code(200),
        ty: TsType::Primitive(crate::generator::ast::TsPrimitive::File),
        content: ContentCategory::Binary,
      },
    ])
    .build();
  let config = GeneratorConfig::default();
  let route = RouteNormalizer::new(&config).normalize(raw).unwrap();
  assert_eq!(route.response_format, Some("blob"));
}

#[test]
fn test_malformed_template_is_an_error() {
  let raw = RawRoute::builder()
    .usage_name("broken")
    .method(Method::GET)
    .path("/pets/{id")
    .build();
  let config = GeneratorConfig::default();
  let error = RouteNormalizer::new(&config).normalize(raw).unwrap_err();
  assert!(format!("{error:#}").contains("invalid path template '/pets/{id'"));
}

#[test]
fn test_summary_and_description_become_docs() {
  let raw = RawRoute::builder()
    .usage_name("getPet")
    .method(Method::GET)
    .path("/pets")
    .summary("Find a pet".to_string())
    .description("Returns one pet.\nOr none.".to_string())
    .build();
  let config = GeneratorConfig::default();
  let route = RouteNormalizer::new(&config).normalize(raw).unwrap();
  assert_eq!(route.docs.lines(), ["Find a pet", "Returns one pet.", "Or none."]);
}
