use std::collections::BTreeSet;

use crate::generator::{
  assembler::EndpointUnit,
  ast::{ContractKind, DataContract, TsProp, TsType},
  metrics::GenerationWarning,
  placement::{Placement, ReferenceTally, TypePlacementResolver},
  source::ContractRegistry,
};

fn record(name: &str, refs: &[&str]) -> DataContract {
  DataContract::builder()
    .name(name)
    .kind(ContractKind::Record(
      refs
        .iter()
        .map(|r| TsProp::new(r.to_lowercase(), TsType::named(*r), false))
        .collect(),
    ))
    .build()
}

fn unit(name: &str, reserved: &[&str]) -> EndpointUnit {
  EndpointUnit {
    name: name.to_string(),
    file_stem: name.to_string(),
    group: None,
    body: String::new(),
    reserved: reserved.iter().map(ToString::to_string).collect(),
    local_contracts: vec![],
    runtime_types: BTreeSet::new(),
    meta_refs: BTreeSet::new(),
    warnings: vec![],
  }
}

fn registry() -> ContractRegistry {
  ContractRegistry::new([
    record("Pet", &["Status"]),
    record("Status", &[]),
    record("Owner", &[]),
    record("Receipt", &[]),
    record("Unused", &[]),
    record("Tree", &["Tree"]),
  ])
}

fn tally(units: &[EndpointUnit]) -> ReferenceTally {
  units.iter().map(|u| ReferenceTally::from_names(&u.reserved)).sum()
}

#[test]
fn test_tally_counts_units_not_mentions() {
  let units = [unit("a", &["Pet", "Owner"]), unit("b", &["Pet"])];
  let tally = tally(&units);

  assert_eq!(tally.count("Pet"), 2);
  assert_eq!(tally.count("Owner"), 1);
  assert_eq!(tally.count("Status"), 0);
  assert_eq!(tally.names().collect::<Vec<_>>(), vec!["Owner", "Pet"]);
  assert!(ReferenceTally::default().is_empty());
}

#[test]
fn test_single_use_contracts_move_into_their_unit() {
  let registry = registry();
  let units = [
    unit("getPet", &["Pet", "Owner"]),
    unit("listPets", &["Pet"]),
    unit("buy", &["Receipt", "Status", "Tree"]),
  ];
  let plan = TypePlacementResolver::new(&registry).resolve(&units, &tally(&units));

  assert_eq!(plan.placement("Pet"), Some(Placement::Shared));
  assert_eq!(plan.placement("Owner"), Some(Placement::Local(0)));
  assert_eq!(plan.placement("Receipt"), Some(Placement::Local(2)));
  assert_eq!(plan.placement("Tree"), Some(Placement::Local(2)));
  assert_eq!(plan.placement("Unused"), Some(Placement::Shared));
  assert_eq!(plan.local_to(2).collect::<Vec<_>>(), vec!["Receipt", "Tree"]);
  assert_eq!(plan.local_to(1).count(), 0);
}

#[test]
fn test_contracts_other_contracts_use_stay_shared() {
  let registry = registry();
  let units = [unit("buy", &["Status"])];
  let plan = TypePlacementResolver::new(&registry).resolve(&units, &tally(&units));

  assert_eq!(plan.placement("Status"), Some(Placement::Shared));
  assert!(plan.is_shared("Status"));
}

#[test]
fn test_every_contract_is_placed_exactly_once() {
  let registry = registry();
  let units = [unit("a", &["Owner", "Pet"]), unit("b", &["Receipt"])];
  let plan = TypePlacementResolver::new(&registry).resolve(&units, &tally(&units));

  let shared = plan.shared().collect::<BTreeSet<_>>();
  let local = (0..units.len()).flat_map(|i| plan.local_to(i)).collect::<BTreeSet<_>>();
  assert!(shared.is_disjoint(&local));
  assert_eq!(shared.len() + local.len(), registry.len());
  assert_eq!(plan.shared_count(), shared.len());
  assert_eq!(plan.local_count(), local.len());
}

#[test]
fn test_missing_names_become_shared_placeholders() {
  let registry = registry();
  let units = [unit("a", &["Pet"]), unit("b", &["Ghost", "Pet"])];
  let plan = TypePlacementResolver::new(&registry).resolve(&units, &tally(&units));

  assert_eq!(plan.missing(), ["Ghost".to_string()]);
  assert!(plan.is_shared("Ghost"));
  assert_eq!(plan.placement("Ghost"), None);
  assert_eq!(plan.shared().last(), Some("Ghost"));
  assert_eq!(
    TypePlacementResolver::missing_warnings(&plan, &units),
    vec![GenerationWarning::MissingContract {
      name: "Ghost".to_string(),
      unit: "b".to_string(),
    }]
  );
}
