//! Orchestration for the OpenAPI to TypeScript endpoint generation pipeline.
//!
//! The `Orchestrator` owns a parsed [`ApiDocument`] and a [`GeneratorConfig`] and runs
//! every stage in order: route collection, normalization, grouping, unit
//! assembly, type placement, export layout and, when writing to disk, the
//! dead-type sweep.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_endpoint_gen::{
//!   generator::{GeneratorConfig, GroupingRule, Orchestrator},
//!   utils::spec::ApiDocument,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let spec_json = std::fs::read_to_string("openapi.json")?;
//! let document = ApiDocument::from_json(&spec_json)?;
//!
//! let config = GeneratorConfig::builder().grouping(GroupingRule::Tag(0)).build();
//! let stats = Orchestrator::new(document, config)
//!   .generate_to_dir(std::path::Path::new("src/api"))
//!   .await?;
//!
//! println!("Generated {} endpoints with {} warnings", stats.units_generated, stats.warnings.len());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use rayon::prelude::*;

use crate::{
  generator::{
    assembler::{EndpointUnit, RuntimeNames, UnitAssembler},
    ast::Route,
    config::GeneratorConfig,
    exports::{ExportGraphBuilder, file_header},
    grouping::{GroupedRoutes, GroupingEngine, GroupingResult},
    meta::MetaInfo,
    metrics::{GenerationStats, GenerationWarning},
    naming::constants::{DATA_CONTRACTS_FILE, NAMESPACE_CONST, TS_EXTENSION},
    normalizer::RouteNormalizer,
    output_tree::OutputTree,
    placement::{ReferenceTally, TypePlacementResolver},
    source::{ContractRegistry, OperationFilter, RouteSource, TypeMapper},
    sweeper::DeadTypeSweeper,
  },
  utils::spec::ApiDocument,
};

/// Metadata about the OpenAPI document, used for file headers.
#[derive(Debug, Clone)]
pub struct SpecMetadata {
  /// API title from the OpenAPI info object
  pub title: String,
  /// API version from the OpenAPI info object
  pub version: String,
  pub description: Option<String>,
}

/// High-level orchestrator for OpenAPI to TypeScript endpoint generation.
pub struct Orchestrator {
  document: ApiDocument,
  config: GeneratorConfig,
}

impl Orchestrator {
  #[must_use]
  pub fn new(document: impl Into<ApiDocument>, config: GeneratorConfig) -> Self {
    Self {
      document: document.into(),
      config,
    }
  }

  #[must_use]
  pub fn metadata(&self) -> SpecMetadata {
    SpecMetadata {
      title: self.document.spec.info.title.clone(),
      version: self.document.spec.info.version.clone(),
      description: self.document.spec.info.description.clone(),
    }
  }

  /// Path of the shared-contracts file inside the output tree.
  #[must_use]
  pub fn shared_file() -> String {
    format!("{DATA_CONTRACTS_FILE}.{TS_EXTENSION}")
  }

  /// Normalized and grouped routes without assembling anything, for listings.
  #[must_use]
  pub fn routes(&self) -> (GroupingResult, GenerationStats) {
    let mut stats = GenerationStats::default();
    let grouping = self.grouped_routes(&self.type_mapper(), &mut stats);
    (grouping, stats)
  }

  fn type_mapper(&self) -> TypeMapper {
    TypeMapper::new(
      self
        .document
        .spec
        .components
        .as_ref()
        .map(|components| components.schemas.keys().collect::<Vec<_>>())
        .unwrap_or_default(),
    )
  }

  /// Collects, normalizes and groups the document's routes.
  ///
  /// Routes whose path cannot be parsed are skipped with a warning rather
  /// than failing the run.
  fn grouped_routes(&self, types: &TypeMapper, stats: &mut GenerationStats) -> GroupingResult {
    let filter = OperationFilter::new(
      self.config.only_operations.as_ref(),
      self.config.excluded_operations.as_ref(),
    );
    let (raw_routes, warnings) = RouteSource::new(&self.document.spec, types)
      .with_path_order(&self.document.path_order)
      .with_open_operations(&self.document.open_operations)
      .with_filter(filter)
      .with_combined_params(self.config.combine_path_and_query)
      .collect();
    stats.record_warnings(warnings);

    let normalizer = RouteNormalizer::new(&self.config);
    let mut routes: Vec<Route> = vec![];
    for raw in raw_routes {
      let (method, path) = (raw.method.to_string(), raw.path.clone());
      match normalizer.normalize(raw) {
        Ok(route) => routes.push(route),
        Err(error) => stats.record_warning(GenerationWarning::OperationConversionFailed {
          method,
          path,
          error: format!("{error:#}"),
        }),
      }
    }
    stats.record_routes(routes.len());

    let mut grouping = GroupingEngine::new(&self.config.grouping, &self.config.group_filter).partition(routes);
    stats.record_warnings(std::mem::take(&mut grouping.warnings));
    grouping
  }

  /// Runs the in-memory pipeline and returns the output tree before the
  /// dead-type sweep.
  ///
  /// # Errors
  ///
  /// Returns an error only for failures that make the whole run meaningless;
  /// per-item problems are recorded as warnings in the returned stats.
  pub fn generate(&self) -> anyhow::Result<(OutputTree, GenerationStats)> {
    let mut stats = GenerationStats::default();

    let types = self.type_mapper();
    let (registry, warnings) = ContractRegistry::from_spec(&self.document.spec, &types);
    stats.record_warnings(warnings);
    stats.contracts_registered = registry.len();
    stats.record_cycles(registry.cycles());

    let grouping = self.grouped_routes(&types, &mut stats);

    let namespace = self.config.namespace.as_ref().and_then(|ns| ns.resolve());
    let meta = MetaInfo::new(namespace, &grouping.routes.group_names(), &grouping.tags, |name| {
      registry.contains(name)
    });
    let unit_names = grouping.routes.unit_names();
    let runtime = RuntimeNames::new(|name| {
      registry.contains(name)
        || unit_names.contains(name)
        || name == meta.group_enum
        || name == meta.tag_enum
        || name == NAMESPACE_CONST
    });

    let (units, tally) = assemble_units(&grouping.routes, &registry, &meta, &runtime, self.config.unit_meta);
    for unit in &units {
      stats.record_unit(unit.local_contracts.len());
      stats.record_warnings(unit.warnings.iter().cloned());
    }
    stats.groups_generated = grouping.routes.group_names().len();

    let plan = TypePlacementResolver::new(&registry).resolve(&units, &tally);
    stats.record_warnings(TypePlacementResolver::missing_warnings(&plan, &units));
    stats.record_placement(
      plan.shared_count() - plan.missing().len(),
      plan.local_count(),
      plan.missing().len(),
    );

    let metadata = self.metadata();
    let header = file_header(&metadata.title, &metadata.version);
    let tree = ExportGraphBuilder::new(&registry, &plan, &meta, &runtime, &self.config.injectables, header)
      .build(&units, !self.config.grouping.is_flat());

    Ok((tree, stats))
  }

  /// Generates, writes the tree to `dir` (replacing its previous contents)
  /// and sweeps unused shared declarations from the written files.
  ///
  /// A failed sweep is recorded as a warning and leaves the files as written.
  ///
  /// # Errors
  ///
  /// Returns an error if generation fails or the tree cannot be written.
  pub async fn generate_to_dir(&self, dir: &Path) -> anyhow::Result<GenerationStats> {
    let (tree, mut stats) = self.generate()?;
    tree.materialize(dir).await?;
    stats.files_written = tree.len();

    if self.config.sweep {
      match DeadTypeSweeper::new(Self::shared_file()).sweep_dir(dir).await {
        Ok(outcome) => stats.record_sweep(outcome.rounds, outcome.removed.len()),
        Err(error) => stats.record_warning(GenerationWarning::SweepFailed {
          error: format!("{error:#}"),
        }),
      }
    }

    Ok(stats)
  }
}

/// Assembles every directory in parallel. Unit order follows group order so
/// placement indices and file creation order are stable across runs.
fn assemble_units(
  routes: &GroupedRoutes,
  registry: &ContractRegistry,
  meta: &MetaInfo,
  runtime: &RuntimeNames,
  unit_meta: bool,
) -> (Vec<EndpointUnit>, ReferenceTally) {
  let directories: Vec<(Option<&str>, &[Route])> = match routes {
    GroupedRoutes::Flat(routes) => vec![(None, routes.as_slice())],
    GroupedRoutes::Grouped(groups) => groups
      .iter()
      .map(|(group, routes)| (Some(group.as_str()), routes.as_slice()))
      .collect(),
  };

  let assembler = UnitAssembler::new(registry, meta, runtime, unit_meta);
  let assembled = directories
    .par_iter()
    .map(|(group, routes)| assembler.assemble_group(*group, routes))
    .collect::<Vec<_>>();

  let mut units = vec![];
  let mut tallies = vec![];
  for (group_units, tally) in assembled {
    units.extend(group_units);
    tallies.push(tally);
  }
  (units, tallies.into_iter().sum())
}
