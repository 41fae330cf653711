use std::{collections::BTreeMap, iter::Sum};

use indexmap::IndexMap;

use crate::generator::{assembler::EndpointUnit, metrics::GenerationWarning, source::ContractRegistry};

/// How many units reference each data-contract name. Each unit contributes at
/// most one count per name; tallies from independent assemblies are summed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTally {
  counts: BTreeMap<String, usize>,
}

impl ReferenceTally {
  /// Tally for one unit: every distinct name counted once.
  pub fn from_names<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
    Self {
      counts: names.into_iter().map(|name| (name.clone(), 1)).collect(),
    }
  }

  #[must_use]
  pub fn count(&self, name: &str) -> usize {
    self.counts.get(name).copied().unwrap_or(0)
  }

  pub fn merge(&mut self, other: Self) {
    for (name, count) in other.counts {
      *self.counts.entry(name).or_default() += count;
    }
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.counts.keys().map(String::as_str)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.counts.is_empty()
  }
}

impl Sum for ReferenceTally {
  fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
    iter.fold(Self::default(), |mut acc, tally| {
      acc.merge(tally);
      acc
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
  Shared,
  /// Inlined into the unit at this index.
  Local(usize),
}

/// Where each registry contract is declared.
#[derive(Debug, Clone, Default)]
pub struct PlacementPlan {
  placements: IndexMap<String, Placement>,
  missing: Vec<String>,
}

impl PlacementPlan {
  #[must_use]
  pub fn placement(&self, name: &str) -> Option<Placement> {
    self.placements.get(name).copied()
  }

  #[must_use]
  pub fn is_shared(&self, name: &str) -> bool {
    matches!(self.placement(name), Some(Placement::Shared)) || self.missing.iter().any(|m| m == name)
  }

  /// Shared names in registry order, placeholders last.
  pub fn shared(&self) -> impl Iterator<Item = &str> {
    self
      .placements
      .iter()
      .filter(|(_, placement)| **placement == Placement::Shared)
      .map(|(name, _)| name.as_str())
      .chain(self.missing.iter().map(String::as_str))
  }

  /// Registry contracts inlined into the given unit, in registry order.
  pub fn local_to(&self, unit_index: usize) -> impl Iterator<Item = &str> {
    self
      .placements
      .iter()
      .filter(move |(_, placement)| **placement == Placement::Local(unit_index))
      .map(|(name, _)| name.as_str())
  }

  /// Names referenced by some unit but absent from the registry.
  #[must_use]
  pub fn missing(&self) -> &[String] {
    &self.missing
  }

  #[must_use]
  pub fn shared_count(&self) -> usize {
    self.shared().count()
  }

  #[must_use]
  pub fn local_count(&self) -> usize {
    self.placements.values().filter(|p| matches!(p, Placement::Local(_))).count()
  }
}

/// Decides, once every unit has been assembled, whether each contract lives in
/// the shared file or inside the single unit that uses it.
pub struct TypePlacementResolver<'a> {
  registry: &'a ContractRegistry,
}

impl<'a> TypePlacementResolver<'a> {
  #[must_use]
  pub fn new(registry: &'a ContractRegistry) -> Self {
    Self { registry }
  }

  /// `tally` is the sum of every unit's tally; `units` are indexed the way
  /// `Placement::Local` refers to them.
  ///
  /// A contract is local when exactly one unit references it and no other
  /// contract's body does. Contracts nobody references stay shared.
  pub fn resolve(&self, units: &[EndpointUnit], tally: &ReferenceTally) -> PlacementPlan {
    let placements = self
      .registry
      .iter()
      .map(|contract| {
        let name = &contract.name;
        let placement = if tally.count(name) == 1 && self.registry.dependent_count(name) == 0 {
          units
            .iter()
            .position(|unit| unit.reserved.contains(name))
            .map_or(Placement::Shared, Placement::Local)
        } else {
          Placement::Shared
        };
        (name.clone(), placement)
      })
      .collect();

    let missing = tally
      .names()
      .filter(|name| !self.registry.contains(name))
      .map(str::to_string)
      .collect();

    PlacementPlan { placements, missing }
  }

  /// One warning per missing name, attributed to the first unit that uses it.
  #[must_use]
  pub fn missing_warnings(plan: &PlacementPlan, units: &[EndpointUnit]) -> Vec<GenerationWarning> {
    plan
      .missing()
      .iter()
      .map(|name| GenerationWarning::MissingContract {
        name: name.clone(),
        unit: units
          .iter()
          .find(|unit| unit.reserved.contains(name))
          .map(|unit| unit.name.clone())
          .unwrap_or_default(),
      })
      .collect()
  }
}
