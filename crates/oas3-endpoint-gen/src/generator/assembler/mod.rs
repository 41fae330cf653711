mod render;
mod response;
mod runtime;
#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

pub use response::ResponseShape;
pub use runtime::{RuntimeNames, RuntimeType};

use self::render::{BodyContext, render_body};
use crate::generator::{
  ast::{ContractKind, ContractOrigin, DataContract, ParamKind, Route, TsProp, TsType, ts::string_literal},
  meta::MetaInfo,
  metrics::GenerationWarning,
  naming::{
    identifiers::{ensure_unique_with, to_kebab_case},
    units::{input_contract_name, params_contract_name},
  },
  placement::ReferenceTally,
  source::ContractRegistry,
};

/// One generated endpoint module, before imports are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointUnit {
  pub name: String,
  pub file_stem: String,
  pub group: Option<String>,
  /// Doc block and `export const` declaration.
  pub body: String,
  /// Data-contract names the route's parameter, body and response types mention.
  pub reserved: BTreeSet<String>,
  /// `<Unit>Input` and, for combined parameters, `<Unit>Params`.
  pub local_contracts: Vec<DataContract>,
  pub runtime_types: BTreeSet<RuntimeType>,
  /// Meta enum identifiers the body references.
  pub meta_refs: BTreeSet<String>,
  pub warnings: Vec<GenerationWarning>,
}

impl EndpointUnit {
  /// Names the unit file needs in scope besides runtime symbols: reserved
  /// names plus whatever the synthesized contracts mention.
  #[must_use]
  pub fn referenced_names(&self) -> BTreeSet<String> {
    let mut names = self.reserved.clone();
    for contract in &self.local_contracts {
      names.extend(contract.referenced_names());
    }
    for contract in &self.local_contracts {
      names.remove(&contract.name);
    }
    names
  }
}

/// Renders endpoint units from normalized routes. Holds only shared, read-only
/// state so groups can be assembled in parallel.
pub struct UnitAssembler<'a> {
  registry: &'a ContractRegistry,
  meta: &'a MetaInfo,
  names: &'a RuntimeNames,
  unit_meta: bool,
}

impl<'a> UnitAssembler<'a> {
  #[must_use]
  pub fn new(registry: &'a ContractRegistry, meta: &'a MetaInfo, names: &'a RuntimeNames, unit_meta: bool) -> Self {
    Self {
      registry,
      meta,
      names,
      unit_meta,
    }
  }

  /// Assembles every route of one output directory. Synthesized names are kept
  /// unique across the directory since its index re-exports every unit.
  pub fn assemble_group(&self, group: Option<&str>, routes: &[Route]) -> (Vec<EndpointUnit>, ReferenceTally) {
    let mut local_names = BTreeSet::new();
    let (units, tallies): (Vec<_>, Vec<_>) = routes
      .iter()
      .map(|route| self.assemble(route, group, &mut local_names))
      .unzip();
    (units, tallies.into_iter().sum())
  }

  /// `local_names` holds synthesized names already taken in the same directory.
  pub fn assemble(
    &self,
    route: &Route,
    group: Option<&str>,
    local_names: &mut BTreeSet<String>,
  ) -> (EndpointUnit, ReferenceTally) {
    let mut warnings = vec![];
    let mut local_contracts = vec![];

    let params_name = route.param(ParamKind::Combined).map(|_| {
      let name = self.synthesized_name(route, params_contract_name(&route.unit_name), local_names, &mut warnings);
      local_contracts.push(params_contract(&name, route));
      name
    });
    let input_name = self.synthesized_name(route, input_contract_name(&route.unit_name), local_names, &mut warnings);
    let input = self.input_contract(&input_name, route, params_name.as_deref());
    let required_params = match &input.kind {
      ContractKind::Record(props) => props.iter().filter(|p| !p.optional).map(|p| p.name.clone()).collect(),
      _ => vec![],
    };
    local_contracts.insert(0, input);

    let shape = ResponseShape::from_responses(&route.responses);
    let response = shape.to_type(
      self.names.runtime_type(RuntimeType::HttpResponse),
      self.names.runtime_type(RuntimeType::HttpMultistatusResponse),
    );
    let mut runtime_types = BTreeSet::from([RuntimeType::RequestParams]);
    runtime_types.insert(if shape.is_multi_status() {
      RuntimeType::HttpMultistatusResponse
    } else {
      RuntimeType::HttpResponse
    });

    let mut meta_refs = BTreeSet::new();
    let tags = route
      .tags
      .iter()
      .map(|tag| match self.unit_meta.then(|| self.meta.tag_ref(tag)).flatten() {
        Some(expr) => {
          meta_refs.insert(self.meta.tag_enum.clone());
          expr
        }
        None => string_literal(tag),
      })
      .collect();
    let group_expr = group.map(|group| match self.unit_meta.then(|| self.meta.group_ref(group)).flatten() {
      Some(expr) => {
        meta_refs.insert(self.meta.group_enum.clone());
        expr
      }
      None => string_literal(group),
    });

    let body = render_body(
      route,
      &BodyContext {
        response,
        input_name: &input_name,
        required_params,
        tags,
        group: group_expr,
        names: self.names,
      },
    );

    let reserved = route.referenced_contracts();
    let tally = ReferenceTally::from_names(&reserved);

    let unit = EndpointUnit {
      name: route.unit_name.clone(),
      file_stem: to_kebab_case(&route.unit_name),
      group: group.map(str::to_string),
      body,
      reserved,
      local_contracts,
      runtime_types,
      meta_refs,
      warnings,
    };
    (unit, tally)
  }

  fn is_taken(&self, name: &str) -> bool {
    self.registry.contains(name)
      || self.names.local_names().any(|n| n == name)
      || name == self.meta.group_enum
      || name == self.meta.tag_enum
  }

  fn synthesized_name(
    &self,
    route: &Route,
    requested: String,
    local_names: &mut BTreeSet<String>,
    warnings: &mut Vec<GenerationWarning>,
  ) -> String {
    let name = ensure_unique_with(&requested, |candidate| {
      self.is_taken(candidate) || local_names.contains(candidate)
    });
    if name != requested {
      warnings.push(GenerationWarning::SynthesizedNameCollision {
        unit: route.unit_name.clone(),
        requested,
        renamed: name.clone(),
      });
    }
    local_names.insert(name.clone());
    name
  }

  /// One property per signature argument, in signature order.
  fn input_contract(&self, name: &str, route: &Route, params_name: Option<&str>) -> DataContract {
    let props = route
      .params
      .iter()
      .map(|param| {
        let ty = match param.kind {
          ParamKind::Combined => params_name.map_or_else(|| param.ty.clone(), TsType::named),
          ParamKind::RequestOptions => TsType::named(self.names.runtime_type(RuntimeType::RequestParams)),
          ParamKind::Path | ParamKind::Body | ParamKind::Query => param.ty.clone(),
        };
        let description = match param.kind {
          ParamKind::Path => route
            .path_params
            .iter()
            .find(|p| p.binding == param.name)
            .and_then(|p| p.description.clone()),
          _ => None,
        };
        TsProp::new(&param.name, ty, param.optional).with_description(description)
      })
      .collect();

    DataContract::builder()
      .name(name)
      .kind(ContractKind::Record(props))
      .origin(ContractOrigin::Synthesized)
      .build()
  }
}

/// Path parameters and query parameters under their wire names.
fn params_contract(name: &str, route: &Route) -> DataContract {
  let props = route
    .path_params
    .iter()
    .map(|p| TsProp::new(&p.name, p.ty.clone(), false).with_description(p.description.clone()))
    .chain(
      route
        .query_params
        .iter()
        .map(|p| TsProp::new(&p.name, p.ty.clone(), !p.required).with_description(p.description.clone())),
    )
    .collect();

  DataContract::builder()
    .name(name)
    .kind(ContractKind::Record(props))
    .origin(ContractOrigin::Synthesized)
    .build()
}
