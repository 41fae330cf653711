use std::collections::{HashMap, HashSet};

use http::Method;
use indexmap::IndexMap;
use itertools::Itertools;
use oas3::{
  Spec,
  spec::{MediaType, ObjectOrReference, Operation, Parameter, ParameterIn},
};

use super::TypeMapper;
use crate::generator::{
  ast::{
    ContentCategory, ParsedPath, RawRoute, RequestBody, RouteParam, RouteResponse, StatusKey, TsPrimitive, TsType,
  },
  metrics::GenerationWarning,
  naming::{
    identifiers::{ensure_unique_with, to_camel_case},
    units::{last_literal_segment, usage_name},
  },
};

/// Filter for including or excluding operations from generation.
///
/// Keys match either the declared operation id or the derived usage name.
/// Exclusion takes precedence if an operation matches both sets.
#[derive(Debug, Clone, Default)]
pub struct OperationFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl OperationFilter {
  #[must_use]
  pub fn new(only: Option<&HashSet<String>>, excluded: Option<&HashSet<String>>) -> Self {
    Self {
      only: only.cloned(),
      excluded: excluded.cloned(),
    }
  }

  /// An operation passes if any of its keys is in the inclusion set (or there
  /// is none) and none of its keys is in the exclusion set.
  #[must_use]
  pub fn accepts<S>(&self, keys: &[S]) -> bool
  where
    S: AsRef<str>,
  {
    if let Some(ref included) = self.only
      && !keys.iter().any(|k| included.contains(k.as_ref()))
    {
      return false;
    }

    if let Some(ref excluded) = self.excluded
      && keys.iter().any(|k| excluded.contains(k.as_ref()))
    {
      return false;
    }

    true
  }
}

#[derive(Debug, Default)]
struct RegistrationContext {
  routes: IndexMap<String, RawRoute>,
  warnings: Vec<GenerationWarning>,
}

impl RegistrationContext {
  fn contains_name(&self, name: &str) -> bool {
    self.routes.contains_key(name)
  }

  /// Two operations resolving to the same usage name are told apart by their
  /// last literal path segment, then by a numeric suffix.
  fn disambiguate(&self, base: &str, path: &str) -> String {
    if !self.contains_name(base) {
      return base.to_string();
    }
    let candidate = match last_literal_segment(path) {
      Some(segment) => to_camel_case(&format!("{base}_{segment}")),
      None => base.to_string(),
    };
    ensure_unique_with(&candidate, |name| self.contains_name(name))
  }

  fn register(&mut self, route: RawRoute) {
    self.routes.insert(route.usage_name.clone(), route);
  }
}

/// Turns the operations of a parsed document into raw route descriptors.
pub struct RouteSource<'a> {
  spec: &'a Spec,
  types: &'a TypeMapper,
  filter: OperationFilter,
  combined_params: bool,
  path_order: &'a [String],
  open_operations: Option<&'a HashSet<(String, Method)>>,
}

impl<'a> RouteSource<'a> {
  #[must_use]
  pub fn new(spec: &'a Spec, types: &'a TypeMapper) -> Self {
    Self {
      spec,
      types,
      filter: OperationFilter::default(),
      combined_params: false,
      path_order: &[],
      open_operations: None,
    }
  }

  #[must_use]
  pub fn with_filter(mut self, filter: OperationFilter) -> Self {
    self.filter = filter;
    self
  }

  /// Marks every route to fold its path and query parameters into one argument.
  #[must_use]
  pub fn with_combined_params(mut self, combined: bool) -> Self {
    self.combined_params = combined;
    self
  }

  /// Order the `paths` keys were written in. Paths missing from it keep
  /// their relative order after the listed ones.
  #[must_use]
  pub fn with_path_order(mut self, order: &'a [String]) -> Self {
    self.path_order = order;
    self
  }

  /// Operations written with `security: []`. They stay public even when
  /// the document declares global security.
  #[must_use]
  pub fn with_open_operations(mut self, open: &'a HashSet<(String, Method)>) -> Self {
    self.open_operations = Some(open);
    self
  }

  fn is_secure(&self, path: &str, method: &Method, operation: &Operation) -> bool {
    if let Some(open) = self.open_operations
      && open.contains(&(path.to_string(), method.clone()))
    {
      return false;
    }
    !operation.security.is_empty() || !self.spec.security.is_empty()
  }

  /// Operations ordered by path position in the document, methods in their
  /// fixed order within a path.
  fn operations(&self) -> Vec<(String, Method, &'a Operation)> {
    let position = self
      .path_order
      .iter()
      .enumerate()
      .map(|(index, path)| (path.as_str(), index))
      .collect::<HashMap<_, _>>();
    let mut operations = self.spec.operations().collect::<Vec<_>>();
    operations.sort_by_key(|(path, _, _)| position.get(path.as_str()).copied().unwrap_or(usize::MAX));
    operations
  }

  /// Routes in document order, with unique usage names.
  pub fn collect(&self) -> (Vec<RawRoute>, Vec<GenerationWarning>) {
    let mut context = RegistrationContext::default();

    for (path, method, operation) in self.operations() {
      let base = usage_name(method.as_str(), path.as_str(), operation.operation_id.as_deref());
      let mut keys = vec![base.clone()];
      keys.extend(operation.operation_id.clone());
      if !self.filter.accepts(&keys) {
        continue;
      }

      if let Err(error) = ParsedPath::parse(&path) {
        context.warnings.push(GenerationWarning::OperationConversionFailed {
          method: method.to_string(),
          path: path.clone(),
          error: error.to_string(),
        });
        continue;
      }

      let name = context.disambiguate(&base, &path);
      let params = self.collect_parameters(&path, operation, &mut context.warnings);
      let path_params = self.path_params(&path, &params);
      let query_params = params
        .iter()
        .filter(|p| p.location == ParameterIn::Query)
        .map(|p| self.route_param(p, p.required.unwrap_or(false)))
        .collect();

      let route = RawRoute::builder()
        .usage_name(name)
        .maybe_operation_id(operation.operation_id.clone())
        .method(method.clone())
        .path(path.clone())
        .path_params(path_params)
        .query_params(query_params)
        .maybe_request_body(self.request_body(operation))
        .responses(self.responses(operation))
        .tags(operation.tags.clone())
        .secure(self.is_secure(&path, &method, operation))
        .deprecated(operation.deprecated.unwrap_or(false))
        .combined_params(self.combined_params)
        .maybe_summary(operation.summary.clone())
        .maybe_description(operation.description.clone())
        .build();

      context.register(route);
    }

    (context.routes.into_values().collect(), context.warnings)
  }

  /// Path item parameters merged with the operation's own, the operation
  /// winning on `(location, name)`.
  fn collect_parameters(
    &self,
    path: &str,
    operation: &Operation,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Vec<Parameter> {
    let mut params = vec![];

    if let Some(path_item) = self.spec.paths.as_ref().and_then(|p| p.get(path)) {
      params.extend(self.resolve_parameters(&path_item.parameters, path, warnings));
    }

    for param in self.resolve_parameters(&operation.parameters, path, warnings) {
      params.retain(|p: &Parameter| p.location != param.location || p.name != param.name);
      params.push(param);
    }

    params
  }

  fn resolve_parameters(
    &self,
    refs: &[ObjectOrReference<Parameter>],
    path: &str,
    warnings: &mut Vec<GenerationWarning>,
  ) -> Vec<Parameter> {
    refs
      .iter()
      .filter_map(|r| match r.resolve(self.spec) {
        Ok(param) => Some(param),
        Err(error) => {
          warnings.push(GenerationWarning::OperationConversionFailed {
            method: "*".to_string(),
            path: path.to_string(),
            error: format!("unresolvable parameter: {error}"),
          });
          None
        }
      })
      .collect()
  }

  /// Path parameters in template order. Placeholders without a declaration
  /// become required `string` parameters.
  fn path_params(&self, path: &str, params: &[Parameter]) -> Vec<RouteParam> {
    ParsedPath::extract_template_params(path)
      .unique()
      .map(|name| {
        params
          .iter()
          .find(|p| p.location == ParameterIn::Path && p.name == name)
          .map_or_else(
            || {
              RouteParam::builder()
                .name(name)
                .binding(to_camel_case(name))
                .ty(TsType::Primitive(TsPrimitive::String))
                .required(true)
                .build()
            },
            |param| self.route_param(param, true),
          )
      })
      .collect()
  }

  fn route_param(&self, param: &Parameter, required: bool) -> RouteParam {
    let ty = param
      .schema
      .as_ref()
      .map_or_else(TsType::any, |schema| self.types.schema_ref_type(schema));

    RouteParam::builder()
      .name(param.name.clone())
      .binding(to_camel_case(&param.name))
      .ty(ty)
      .required(required)
      .maybe_description(param.description.clone())
      .build()
  }

  fn request_body(&self, operation: &Operation) -> Option<RequestBody> {
    let body = operation.request_body.as_ref()?.resolve(self.spec).ok()?;
    let (content, media_type) = preferred_media_type(body.content.iter())?;

    Some(RequestBody {
      ty: self.media_type_schema(media_type).unwrap_or_else(TsType::any),
      required: body.required.unwrap_or(false),
      content,
    })
  }

  fn responses(&self, operation: &Operation) -> Vec<RouteResponse> {
    let Some(responses) = operation.responses.as_ref() else {
      return vec![];
    };

    responses
      .iter()
      .filter_map(|(key, response_ref)| {
        let status = StatusKey::parse(key)?;
        let response = response_ref.resolve(self.spec).ok()?;
        let (ty, content) = match preferred_media_type(response.content.iter()) {
          Some((content, media_type)) => (self.media_type_schema(media_type).unwrap_or_else(TsType::any), content),
          None => (TsType::void(), ContentCategory::Json),
        };
        Some(RouteResponse { status, ty, content })
      })
      .collect()
  }

  fn media_type_schema(&self, media_type: &MediaType) -> Option<TsType> {
    media_type
      .schema
      .as_ref()
      .map(|schema| self.types.schema_ref_type(schema))
  }
}

/// The first JSON media type wins, otherwise the first one declared.
fn preferred_media_type<'m>(
  content: impl Iterator<Item = (&'m String, &'m MediaType)>,
) -> Option<(ContentCategory, &'m MediaType)> {
  let candidates = content
    .map(|(content_type, media_type)| (ContentCategory::from_content_type(content_type), media_type))
    .collect::<Vec<_>>();

  candidates
    .iter()
    .find(|(category, _)| category.is_json())
    .or_else(|| candidates.first())
    .copied()
}
