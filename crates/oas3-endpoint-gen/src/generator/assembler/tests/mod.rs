mod units;

use std::collections::BTreeSet;

use indexmap::IndexSet;

use crate::{
  generator::{
    assembler::{EndpointUnit, RuntimeNames, UnitAssembler},
    ast::Route,
    config::GeneratorConfig,
    meta::MetaInfo,
    normalizer::RouteNormalizer,
    source::{ContractRegistry, RouteSource, TypeMapper},
  },
  utils::spec::ApiDocument,
};

struct Fixture {
  registry: ContractRegistry,
  routes: Vec<Route>,
  meta: MetaInfo,
  names: RuntimeNames,
}

impl Fixture {
  fn load(spec_json: &str, config: &GeneratorConfig) -> Self {
    let document = ApiDocument::from_json(spec_json).unwrap();
    let spec = &document.spec;
    let types = TypeMapper::new(spec.components.iter().flat_map(|c| c.schemas.keys()));
    let (registry, _) = ContractRegistry::from_spec(spec, &types);
    let (raw, _) = RouteSource::new(spec, &types)
      .with_path_order(&document.path_order)
      .with_combined_params(config.combine_path_and_query)
      .collect();

    let normalizer = RouteNormalizer::new(config);
    let routes = raw
      .into_iter()
      .map(|raw| normalizer.normalize(raw).unwrap())
      .collect::<Vec<_>>();
    let tags = routes
      .iter()
      .flat_map(|r| r.tags.iter().cloned())
      .collect::<IndexSet<_>>()
      .into_iter()
      .collect::<Vec<_>>();
    let meta = MetaInfo::new(None, &tags, &tags, |name| registry.contains(name));
    let names = RuntimeNames::new(|name| registry.contains(name));

    Self {
      registry,
      routes,
      meta,
      names,
    }
  }

  fn operations(config: &GeneratorConfig) -> Self {
    Self::load(include_str!("../../../../fixtures/operations.json"), config)
  }

  fn route(&self, unit_name: &str) -> &Route {
    self.routes.iter().find(|r| r.unit_name == unit_name).unwrap()
  }

  fn assemble(&self, unit_name: &str, group: Option<&str>) -> EndpointUnit {
    let assembler = UnitAssembler::new(&self.registry, &self.meta, &self.names, true);
    assembler.assemble(self.route(unit_name), group, &mut BTreeSet::new()).0
  }
}
