use std::collections::{BTreeMap, BTreeSet};

use indexmap::IndexMap;
use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, SchemaType, SchemaTypeSet},
};
use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use super::TypeMapper;
use crate::generator::{
  ast::{ContractKind, DataContract, Documentation, Emit, EnumMember, TsLiteral, TsType},
  metrics::GenerationWarning,
  naming::identifiers::{ensure_unique, to_enum_member_name},
};

/// Named data contracts from `components.schemas`, in document order, with
/// their contract-to-contract dependencies.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
  contracts: IndexMap<String, DataContract>,
  dependencies: BTreeMap<String, BTreeSet<String>>,
}

impl ContractRegistry {
  /// Converts every component schema into a contract. Schemas whose reference
  /// cannot be resolved are skipped with a warning.
  pub fn from_spec(spec: &Spec, types: &TypeMapper) -> (Self, Vec<GenerationWarning>) {
    let mut contracts = vec![];
    let mut warnings = vec![];

    if let Some(components) = &spec.components {
      for (schema_name, schema_ref) in &components.schemas {
        let name = types.contract_name(schema_name);
        if let ObjectOrReference::Ref { .. } = schema_ref {
          let target = types.schema_ref_type(schema_ref);
          contracts.push(DataContract::builder().name(name).kind(ContractKind::Alias(target)).build());
          continue;
        }
        match schema_ref.resolve(spec) {
          Ok(schema) => contracts.push(build_contract(name, &schema, types)),
          Err(error) => warnings.push(GenerationWarning::SchemaConversionFailed {
            schema_name: schema_name.clone(),
            error: error.to_string(),
          }),
        }
      }
    }

    (Self::new(contracts), warnings)
  }

  pub fn new(contracts: impl IntoIterator<Item = DataContract>) -> Self {
    let contracts = contracts
      .into_iter()
      .map(|contract| (contract.name.clone(), contract))
      .collect::<IndexMap<_, _>>();

    let dependencies = contracts
      .values()
      .map(|contract| {
        let deps = contract
          .body_refs()
          .into_iter()
          .filter(|name| contracts.contains_key(name))
          .collect();
        (contract.name.clone(), deps)
      })
      .collect();

    Self {
      contracts,
      dependencies,
    }
  }

  #[must_use]
  pub fn get(&self, name: &str) -> Option<&DataContract> {
    self.contracts.get(name)
  }

  #[must_use]
  pub fn contains(&self, name: &str) -> bool {
    self.contracts.contains_key(name)
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.contracts.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.contracts.is_empty()
  }

  /// Contracts in registry order.
  pub fn iter(&self) -> impl Iterator<Item = &DataContract> {
    self.contracts.values()
  }

  /// Registry contracts that `name`'s body mentions, itself excluded.
  pub fn dependencies_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a String> {
    self.dependencies.get(name).into_iter().flatten().filter(move |dep| dep.as_str() != name)
  }

  /// How many other registry contracts mention `name` in their body.
  #[must_use]
  pub fn dependent_count(&self, name: &str) -> usize {
    self
      .dependencies
      .iter()
      .filter(|(owner, deps)| owner.as_str() != name && deps.contains(name))
      .count()
  }

  /// Strongly connected groups of mutually referencing contracts.
  #[must_use]
  pub fn cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.dependencies {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| scc.into_iter().map(String::from).collect())
      .collect()
  }
}

fn build_contract(name: String, schema: &ObjectSchema, types: &TypeMapper) -> DataContract {
  let mut docs = Documentation::from_optional(schema.description.as_ref());
  if schema.deprecated.unwrap_or(false) {
    docs.push("@deprecated");
  }

  DataContract::builder()
    .name(name)
    .docs(docs)
    .kind(contract_kind(schema, types))
    .build()
}

fn contract_kind(schema: &ObjectSchema, types: &TypeMapper) -> ContractKind {
  if let Some(members) = enum_members(schema) {
    return ContractKind::Enum(members);
  }

  let is_plain_object = schema.one_of.is_empty()
    && schema.any_of.is_empty()
    && schema.all_of.is_empty()
    && !schema.properties.is_empty()
    && matches!(schema.schema_type, None | Some(SchemaTypeSet::Single(SchemaType::Object)))
    && types.additional_properties(schema).is_none();

  if is_plain_object {
    ContractKind::Record(types.properties(schema))
  } else {
    ContractKind::Alias(types.schema_type(schema))
  }
}

/// Enum members for string or numeric enums. Mixed or non-literal values fall
/// back to a literal union alias.
fn enum_members(schema: &ObjectSchema) -> Option<Vec<EnumMember>> {
  if schema.enum_values.is_empty() {
    return None;
  }

  let literals = schema
    .enum_values
    .iter()
    .map(TsLiteral::from_json)
    .collect::<Option<Vec<_>>>()?;

  let all_strings = literals.iter().all(|l| matches!(l, TsLiteral::String(_)));
  let all_numbers = literals.iter().all(|l| matches!(l, TsLiteral::Number(_)));
  if !all_strings && !all_numbers {
    return None;
  }

  let mut used = BTreeSet::new();
  let members = literals
    .into_iter()
    .map(|value| {
      let raw = value.as_str().map_or_else(|| value.emit(), str::to_string);
      let name = ensure_unique(&to_enum_member_name(&raw), &used);
      used.insert(name.clone());
      EnumMember { name, value }
    })
    .collect();

  Some(members)
}

/// Placeholder for a name referenced by a unit but missing from the registry.
#[must_use]
pub fn placeholder_contract(name: &str) -> DataContract {
  DataContract::builder().name(name).kind(ContractKind::Alias(TsType::any())).build()
}
