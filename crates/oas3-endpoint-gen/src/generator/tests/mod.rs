mod normalizer;
mod output_tree;
mod placement;

use crate::{
  generator::{
    ast::Route,
    config::GeneratorConfig,
    normalizer::RouteNormalizer,
    source::{RouteSource, TypeMapper},
  },
  utils::spec::ApiDocument,
};

fn petstore() -> ApiDocument {
  ApiDocument::from_json(include_str!("../../../fixtures/petstore.json")).unwrap()
}

fn operations() -> ApiDocument {
  ApiDocument::from_json(include_str!("../../../fixtures/operations.json")).unwrap()
}

/// Collected and normalized routes of a document, in document order.
fn normalized_routes(document: &ApiDocument, config: &GeneratorConfig) -> Vec<Route> {
  let spec = &document.spec;
  let types = TypeMapper::new(spec.components.iter().flat_map(|c| c.schemas.keys()));
  let (raw, _) = RouteSource::new(spec, &types)
    .with_path_order(&document.path_order)
    .with_open_operations(&document.open_operations)
    .with_combined_params(config.combine_path_and_query)
    .collect();
  let normalizer = RouteNormalizer::new(config);
  raw.into_iter().map(|raw| normalizer.normalize(raw).unwrap()).collect()
}
