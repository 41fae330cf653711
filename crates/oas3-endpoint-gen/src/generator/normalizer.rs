use std::collections::BTreeSet;

use anyhow::Context;

use crate::generator::{
  ast::{Documentation, ParamKind, ParsedPath, RawRoute, Route, RouteParam, TsProp, TsType, UnitParam},
  config::GeneratorConfig,
  naming::{
    constants::{BODY_PARAM, COMBINED_PARAM, QUERY_PARAM, REQUEST_PARAMS_PARAM, REQUEST_PARAMS_TYPE},
    identifiers::{ensure_unique, to_camel_case},
    units::{params_contract_name, splice_path_segment},
  },
};

/// Applies the generator's naming rules to raw routes and classifies their
/// parameters into the endpoint signature.
pub struct RouteNormalizer<'a> {
  config: &'a GeneratorConfig,
}

impl<'a> RouteNormalizer<'a> {
  #[must_use]
  pub fn new(config: &'a GeneratorConfig) -> Self {
    Self { config }
  }

  pub fn normalize(&self, raw: RawRoute) -> anyhow::Result<Route> {
    let unit_name = self.unit_name(&raw);
    let request_path = format!("{}{}{}", self.config.path_prefix, raw.path, self.config.path_suffix);
    let template =
      ParsedPath::parse(&request_path).with_context(|| format!("invalid path template '{request_path}'"))?;

    let path_params = bind_path_params(raw.path_params.clone());
    let params = classify_params(&unit_name, &raw, &path_params);

    let request_content = raw.request_body.as_ref().and_then(|body| body.content.request_token());
    let response_format = raw
      .responses
      .iter()
      .find(|r| r.status.is_success())
      .and_then(|r| r.content.response_format());

    let mut docs = Documentation::default();
    if let Some(summary) = &raw.summary {
      docs.extend(Documentation::from_raw(summary).lines().iter().cloned());
    }
    if let Some(description) = &raw.description {
      docs.extend(Documentation::from_raw(description).lines().iter().cloned());
    }

    Ok(Route {
      operation_id: raw.operation_id.unwrap_or_else(|| raw.usage_name.clone()),
      unit_name,
      method: raw.method,
      raw_path: raw.path,
      request_path,
      template,
      params,
      path_params,
      query_params: raw.query_params,
      request_body: raw.request_body,
      responses: raw.responses,
      request_content,
      response_format,
      tags: raw.tags,
      secure: raw.secure,
      deprecated: raw.deprecated,
      docs,
    })
  }

  fn unit_name(&self, raw: &RawRoute) -> String {
    let name = to_camel_case(&raw.usage_name);
    match self.config.add_path_segment {
      Some(index) => splice_path_segment(&name, &raw.path, index),
      None => name,
    }
  }
}

/// Path parameter bindings must not shadow the fixed argument names.
fn bind_path_params(params: Vec<RouteParam>) -> Vec<RouteParam> {
  let mut used = [BODY_PARAM, QUERY_PARAM, COMBINED_PARAM, REQUEST_PARAMS_PARAM]
    .into_iter()
    .map(String::from)
    .collect::<BTreeSet<_>>();

  params
    .into_iter()
    .map(|mut param| {
      param.binding = ensure_unique(&param.binding, &used);
      used.insert(param.binding.clone());
      param
    })
    .collect()
}

/// Signature order: path params, body, query object, request options, then a
/// stable sort that moves optional arguments behind required ones.
fn classify_params(unit_name: &str, raw: &RawRoute, path_params: &[RouteParam]) -> Vec<UnitParam> {
  let mut params = vec![];
  let any_query_required = raw.query_params.iter().any(|p| p.required);

  if raw.combined_params && (!path_params.is_empty() || !raw.query_params.is_empty()) {
    params.push(UnitParam {
      kind: ParamKind::Combined,
      name: COMBINED_PARAM.to_string(),
      ty: TsType::named(params_contract_name(unit_name)),
      optional: path_params.is_empty() && !any_query_required,
    });
  } else {
    params.extend(path_params.iter().map(|param| UnitParam {
      kind: ParamKind::Path,
      name: param.binding.clone(),
      ty: param.ty.clone(),
      optional: false,
    }));
  }

  if let Some(body) = &raw.request_body {
    params.push(UnitParam {
      kind: ParamKind::Body,
      name: BODY_PARAM.to_string(),
      ty: body.ty.clone(),
      optional: !body.required,
    });
  }

  if !raw.combined_params && !raw.query_params.is_empty() {
    params.push(UnitParam {
      kind: ParamKind::Query,
      name: QUERY_PARAM.to_string(),
      ty: query_object(&raw.query_params),
      optional: !any_query_required,
    });
  }

  params.push(UnitParam {
    kind: ParamKind::RequestOptions,
    name: REQUEST_PARAMS_PARAM.to_string(),
    ty: TsType::named(REQUEST_PARAMS_TYPE),
    optional: true,
  });

  params.sort_by_key(|p| p.optional);
  params
}

/// Inline object type listing every query parameter under its wire name.
pub(crate) fn query_object(query_params: &[RouteParam]) -> TsType {
  TsType::Object(
    query_params
      .iter()
      .map(|p| TsProp::new(&p.name, p.ty.clone(), !p.required))
      .collect(),
  )
}
