use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::generator::{
  assembler::{EndpointUnit, RuntimeNames},
  ast::{DataContract, Emit},
  config::{Injectable, InjectableSymbols, module_from_depth},
  meta::MetaInfo,
  naming::{
    constants::{DATA_CONTRACTS_FILE, ENDPOINTS_DIR, EXPORTS_FILE, INDEX_FILE, META_INFO_FILE, TS_EXTENSION},
    identifiers::to_camel_case,
    units::group_directory,
  },
  output_tree::OutputTree,
  placement::PlacementPlan,
  source::{ContractRegistry, placeholder_contract},
};

/// Banner written at the top of every generated file. Carries no timestamp so
/// regenerating an unchanged document reproduces the same bytes.
#[must_use]
pub fn file_header(title: &str, version: &str) -> String {
  format!(
    "/* eslint-disable */\n/* tslint:disable */\n/**\n * AUTO-GENERATED CODE - DO NOT EDIT!\n *\n * {title}\n * Version: {version}\n * Generated by `oas3-endpoint-gen`\n */\n"
  )
}

/// Lays out the file tree: unit modules with their imports, index files that
/// re-export them, and the shared and meta files at the root.
pub struct ExportGraphBuilder<'a> {
  registry: &'a ContractRegistry,
  plan: &'a PlacementPlan,
  meta: &'a MetaInfo,
  names: &'a RuntimeNames,
  injectables: &'a InjectableSymbols,
  header: String,
}

impl<'a> ExportGraphBuilder<'a> {
  #[must_use]
  pub fn new(
    registry: &'a ContractRegistry,
    plan: &'a PlacementPlan,
    meta: &'a MetaInfo,
    names: &'a RuntimeNames,
    injectables: &'a InjectableSymbols,
    header: String,
  ) -> Self {
    Self {
      registry,
      plan,
      meta,
      names,
      injectables,
      header,
    }
  }

  /// `units` must be indexed the same way the placement plan refers to them.
  #[must_use]
  pub fn build(&self, units: &[EndpointUnit], grouped: bool) -> OutputTree {
    let mut tree = OutputTree::new();
    let mut directories = IndexMap::<Option<String>, Vec<&EndpointUnit>>::new();
    if !grouped {
      directories.insert(None, vec![]);
    }

    for (index, unit) in units.iter().enumerate() {
      let dir = unit.group.as_deref().map(group_directory);
      tree.insert(unit_path(dir.as_deref(), &unit.file_stem), self.unit_file(index, unit));
      directories.entry(dir).or_default().push(unit);
    }

    let mut collected = vec![];
    for (dir, dir_units) in &directories {
      let endpoints_index = dir_units
        .iter()
        .map(|unit| format!("export * from \"./{}\";\n", unit.file_stem))
        .collect::<String>();
      tree.insert(
        file_path(dir.as_deref(), &format!("{ENDPOINTS_DIR}/{INDEX_FILE}")),
        self.with_header(&endpoints_index),
      );

      match dir {
        Some(dir) => {
          let alias = dir_units
            .first()
            .and_then(|unit| unit.group.as_deref())
            .map_or_else(|| to_camel_case(dir), to_camel_case);
          tree.insert(
            file_path(Some(dir), INDEX_FILE),
            self.with_header(&format!("export * as {alias} from \"./{ENDPOINTS_DIR}\";\n")),
          );
          collected.push(format!("./{dir}"));
        }
        None => collected.push(format!("./{ENDPOINTS_DIR}")),
      }
    }

    tree.insert(file_path(None, DATA_CONTRACTS_FILE), self.with_header(&self.shared_contracts()));
    tree.insert(file_path(None, META_INFO_FILE), self.with_header(&self.meta.render()));
    collected.push(format!("./{DATA_CONTRACTS_FILE}"));
    collected.push(format!("./{META_INFO_FILE}"));

    let reexports = collected
      .iter()
      .map(|module| format!("export * from \"{module}\";\n"))
      .collect::<String>();
    match &self.meta.namespace {
      Some(namespace) => {
        tree.insert(file_path(None, EXPORTS_FILE), self.with_header(&reexports));
        tree.insert(
          file_path(None, INDEX_FILE),
          self.with_header(&format!("export * as {namespace} from \"./{EXPORTS_FILE}\";\n")),
        );
      }
      None => tree.insert(file_path(None, INDEX_FILE), self.with_header(&reexports)),
    }

    tree
  }

  /// Every shared declaration in registry order, placeholders last.
  fn shared_contracts(&self) -> String {
    self
      .plan
      .shared()
      .map(|name| {
        self
          .registry
          .get(name)
          .cloned()
          .unwrap_or_else(|| placeholder_contract(name))
          .emit()
      })
      .collect::<Vec<_>>()
      .join("\n")
  }

  fn unit_file(&self, index: usize, unit: &EndpointUnit) -> String {
    let depth = if unit.group.is_some() { 2 } else { 1 };
    let up = "../".repeat(depth);

    let local = self
      .plan
      .local_to(index)
      .filter_map(|name| self.registry.get(name))
      .collect::<Vec<_>>();

    let mut needed = unit.referenced_names();
    for contract in &local {
      needed.extend(self.registry.dependencies_of(&contract.name).cloned());
    }
    let shared = needed
      .into_iter()
      .filter(|name| self.plan.is_shared(name))
      .collect::<BTreeSet<_>>();

    let mut imports = self.runtime_imports(unit, depth);
    if !shared.is_empty() {
      imports.push(import_line(true, &shared.into_iter().collect::<Vec<_>>(), &format!("{up}{DATA_CONTRACTS_FILE}")));
    }
    if !unit.meta_refs.is_empty() {
      let refs = unit.meta_refs.iter().cloned().collect::<Vec<_>>();
      imports.push(import_line(false, &refs, &format!("{up}{META_INFO_FILE}")));
    }

    let declarations = local
      .into_iter()
      .chain(&unit.local_contracts)
      .map(DataContract::emit)
      .chain(std::iter::once(unit.body.clone()))
      .collect::<Vec<_>>();

    format!("{}\n{}\n{}", self.header, imports.join(""), declarations.join("\n"))
  }

  /// Value imports for the injectable symbols, grouped by module, then the
  /// type-only runtime imports.
  fn runtime_imports(&self, unit: &EndpointUnit, depth: usize) -> Vec<String> {
    let mut by_module = IndexMap::<String, Vec<String>>::new();
    for symbol in Injectable::ALL {
      let target = self.injectables.target(symbol);
      let local = self.names.injectable(symbol);
      let spec = if target.export == local {
        local.to_string()
      } else {
        format!("{} as {local}", target.export)
      };
      by_module.entry(target.module_from_depth(depth)).or_default().push(spec);
    }

    let mut lines = by_module
      .into_iter()
      .map(|(module, specs)| import_line(false, &specs, &module))
      .collect::<Vec<_>>();

    let types = unit
      .runtime_types
      .iter()
      .map(|ty| {
        let local = self.names.runtime_type(*ty);
        if local == ty.export_name() {
          local.to_string()
        } else {
          format!("{} as {local}", ty.export_name())
        }
      })
      .collect::<Vec<_>>();
    if !types.is_empty() {
      lines.push(import_line(true, &types, &module_from_depth(&self.injectables.runtime_module, depth)));
    }
    lines
  }

  fn with_header(&self, body: &str) -> String {
    let body = if body.trim().is_empty() { "export {};\n" } else { body };
    format!("{}\n{body}", self.header)
  }
}

fn import_line(type_only: bool, names: &[String], module: &str) -> String {
  let keyword = if type_only { "import type" } else { "import" };
  format!("{keyword} {{ {} }} from \"{module}\";\n", names.join(", "))
}

fn file_path(dir: Option<&str>, stem: &str) -> String {
  match dir {
    Some(dir) => format!("{dir}/{stem}.{TS_EXTENSION}"),
    None => format!("{stem}.{TS_EXTENSION}"),
  }
}

fn unit_path(dir: Option<&str>, file_stem: &str) -> String {
  file_path(dir, &format!("{ENDPOINTS_DIR}/{file_stem}"))
}
