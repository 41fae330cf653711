use std::collections::BTreeSet;

use http::Method;

use super::{ContentCategory, Documentation, ParsedPath, StatusKey, ts::TsType};

/// A path or query parameter as declared by the operation.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct RouteParam {
  /// Name on the wire.
  #[builder(into)]
  pub name: String,
  /// Identifier the generated code binds the value to.
  #[builder(into)]
  pub binding: String,
  pub ty: TsType,
  #[builder(default)]
  pub required: bool,
  pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
  pub ty: TsType,
  pub required: bool,
  pub content: ContentCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResponse {
  pub status: StatusKey,
  pub ty: TsType,
  pub content: ContentCategory,
}

/// Route descriptor as produced by the route source, before any generator
/// naming rules are applied.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct RawRoute {
  #[builder(into)]
  pub usage_name: String,
  #[builder(into)]
  pub operation_id: Option<String>,
  pub method: Method,
  #[builder(into)]
  pub path: String,
  #[builder(default)]
  pub path_params: Vec<RouteParam>,
  #[builder(default)]
  pub query_params: Vec<RouteParam>,
  pub request_body: Option<RequestBody>,
  #[builder(default)]
  pub responses: Vec<RouteResponse>,
  #[builder(default)]
  pub tags: Vec<String>,
  #[builder(default)]
  pub secure: bool,
  #[builder(default)]
  pub deprecated: bool,
  /// Fold path and query parameters into a single destructured argument.
  #[builder(default)]
  pub combined_params: bool,
  pub summary: Option<String>,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
  Path,
  Body,
  Query,
  /// Path and query parameters folded into one destructured argument.
  Combined,
  RequestOptions,
}

/// One argument of the generated endpoint signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParam {
  pub kind: ParamKind,
  pub name: String,
  pub ty: TsType,
  pub optional: bool,
}

/// A route after normalization: final unit name, classified parameters and the
/// rendered request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
  pub unit_name: String,
  pub operation_id: String,
  pub method: Method,
  /// Path template as declared, used for grouping.
  pub raw_path: String,
  /// Path template with prefix and suffix applied.
  pub request_path: String,
  pub template: ParsedPath,
  pub params: Vec<UnitParam>,
  pub path_params: Vec<RouteParam>,
  pub query_params: Vec<RouteParam>,
  pub request_body: Option<RequestBody>,
  pub responses: Vec<RouteResponse>,
  pub request_content: Option<&'static str>,
  pub response_format: Option<&'static str>,
  pub tags: Vec<String>,
  pub secure: bool,
  pub deprecated: bool,
  pub docs: Documentation,
}

impl Route {
  pub fn param(&self, kind: ParamKind) -> Option<&UnitParam> {
    self.params.iter().find(|p| p.kind == kind)
  }

  /// Named types mentioned by the route's parameters, request body and responses.
  #[must_use]
  pub fn referenced_contracts(&self) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    for param in self.path_params.iter().chain(&self.query_params) {
      param.ty.collect_refs(&mut names);
    }
    if let Some(body) = &self.request_body {
      body.ty.collect_refs(&mut names);
    }
    for response in &self.responses {
      response.ty.collect_refs(&mut names);
    }
    names
  }
}
