use crate::generator::{
  ast::{Documentation, Emit, ParamKind, Route, TsType, ts::string_literal},
  config::Injectable,
  naming::{constants::QUERY_PARAM, identifiers::quote_if_needed},
};

use super::RuntimeNames;

/// Everything the endpoint declaration needs beyond the route itself.
pub(super) struct BodyContext<'a> {
  pub response: TsType,
  pub input_name: &'a str,
  pub required_params: Vec<String>,
  pub tags: Vec<String>,
  pub group: Option<String>,
  pub names: &'a RuntimeNames,
}

/// Doc block followed by the `new Endpoint(...)` declaration.
pub(super) fn render_body(route: &Route, ctx: &BodyContext<'_>) -> String {
  let names = ctx.names;
  let mut out = doc_block(route).to_jsdoc("");

  out.push_str(&format!(
    "export const {} = new {}<{}, {}, any>(\n",
    route.unit_name,
    names.injectable(Injectable::Endpoint),
    ctx.response.emit(),
    ctx.input_name,
  ));
  out.push_str("  {\n");
  out.push_str(&format!(
    "    params: ({{ {} }}: {}) => ({{\n",
    destructure(route),
    ctx.input_name
  ));
  for line in request_fields(route) {
    out.push_str(&format!("      {line},\n"));
  }
  out.push_str("    }),\n");
  out.push_str(&format!("    requiredParams: {},\n", string_array(&ctx.required_params)));
  out.push_str(&format!("    operationId: {},\n", string_literal(&route.operation_id)));
  out.push_str(&format!("    path: {},\n", string_array(&route.template.declaration())));
  out.push_str(&format!("    tags: [{}],\n", ctx.tags.join(", ")));
  if let Some(group) = &ctx.group {
    out.push_str(&format!("    group: {group},\n"));
  }
  out.push_str("  },\n");
  out.push_str(&format!("  {},\n", names.injectable(Injectable::QueryClient)));
  out.push_str(&format!("  {},\n", names.injectable(Injectable::HttpClient)));
  out.push_str(");\n");
  out
}

fn doc_block(route: &Route) -> Documentation {
  let mut docs = route.docs.clone();
  let mut annotations = vec![];
  if route.deprecated {
    annotations.push("@deprecated".to_string());
  }
  if !route.tags.is_empty() {
    annotations.push(format!("@tags {}", route.tags.join(", ")));
  }
  annotations.push(format!("@request {}:{}", route.method.as_str(), route.request_path));
  if route.secure {
    annotations.push("@secure".to_string());
  }

  if !docs.is_empty() {
    docs.push("");
  }
  docs.extend(annotations);
  docs
}

/// Binding pattern for the single input argument, in signature order.
fn destructure(route: &Route) -> String {
  route
    .params
    .iter()
    .map(|param| match param.kind {
      ParamKind::Combined => {
        let mut fields = route
          .path_params
          .iter()
          .map(|p| {
            if p.name == p.binding {
              p.binding.clone()
            } else {
              format!("{}: {}", quote_if_needed(&p.name), p.binding)
            }
          })
          .collect::<Vec<_>>();
        if !route.query_params.is_empty() {
          fields.push(format!("...{QUERY_PARAM}"));
        }
        let default = if param.optional { " = {}" } else { "" };
        format!("{}: {{ {} }}{default}", param.name, fields.join(", "))
      }
      _ => param.name.clone(),
    })
    .collect::<Vec<_>>()
    .join(", ")
}

/// Fields of the request object the `params` callback returns.
fn request_fields(route: &Route) -> Vec<String> {
  let path = route.template.to_template_literal(|name| {
    route
      .path_params
      .iter()
      .find(|p| p.name == name)
      .map_or_else(|| string_literal(&format!("{{{name}}}")), |p| p.binding.clone())
  });

  let mut fields = vec![
    format!("path: {path}"),
    format!("method: {}", string_literal(route.method.as_str())),
  ];
  if !route.query_params.is_empty() {
    fields.push(QUERY_PARAM.to_string());
  }
  if let Some(body) = route.param(ParamKind::Body) {
    fields.push(body.name.clone());
  }
  if let Some(content_type) = route.request_content {
    fields.push(format!("contentType: {}", string_literal(content_type)));
  }
  if let Some(format) = route.response_format {
    fields.push(format!("format: {}", string_literal(format)));
  }
  if route.secure {
    fields.push("secure: true".to_string());
  }
  if let Some(options) = route.param(ParamKind::RequestOptions) {
    fields.push(format!("...{}", options.name));
  }
  fields
}

fn string_array(values: &[String]) -> String {
  let items = values.iter().map(|v| string_literal(v)).collect::<Vec<_>>();
  format!("[{}]", items.join(", "))
}
