use std::collections::{BTreeSet, HashMap};

use indexmap::{IndexMap, IndexSet};

use crate::generator::{
  ast::Route,
  config::{GroupFilter, GroupingRule},
  metrics::GenerationWarning,
  naming::{
    constants::{CATCH_ALL_GROUP, ENDPOINTS_DIR},
    identifiers::{ensure_unique_with, to_kebab_case},
    units::{group_directory, path_segments},
  },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupedRoutes {
  /// No grouping rule: every unit lives in one `endpoints` directory.
  Flat(Vec<Route>),
  /// Group name to routes, in order of first appearance.
  Grouped(IndexMap<String, Vec<Route>>),
}

impl GroupedRoutes {
  #[must_use]
  pub fn group_names(&self) -> Vec<String> {
    match self {
      Self::Flat(_) => vec![],
      Self::Grouped(groups) => groups.keys().cloned().collect(),
    }
  }

  /// Every unit name, across groups.
  #[must_use]
  pub fn unit_names(&self) -> BTreeSet<&str> {
    match self {
      Self::Flat(routes) => routes.iter().map(|r| r.unit_name.as_str()).collect(),
      Self::Grouped(groups) => groups.values().flatten().map(|r| r.unit_name.as_str()).collect(),
    }
  }

  #[must_use]
  pub fn route_count(&self) -> usize {
    match self {
      Self::Flat(routes) => routes.len(),
      Self::Grouped(groups) => groups.values().map(Vec::len).sum(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.route_count() == 0
  }
}

#[derive(Debug, Clone)]
pub struct GroupingResult {
  pub routes: GroupedRoutes,
  /// Every raw tag seen on any route, in order of first appearance.
  pub tags: Vec<String>,
  pub warnings: Vec<GenerationWarning>,
}

pub struct GroupingEngine<'a> {
  rule: &'a GroupingRule,
  filter: &'a GroupFilter,
}

impl<'a> GroupingEngine<'a> {
  #[must_use]
  pub fn new(rule: &'a GroupingRule, filter: &'a GroupFilter) -> Self {
    Self { rule, filter }
  }

  /// Group a route belongs to under the configured rule. `None` for the flat layout.
  #[must_use]
  pub fn group_key(&self, route: &Route) -> Option<String> {
    let key = match self.rule {
      GroupingRule::None => return None,
      GroupingRule::Custom(group_of) => group_of(route),
      GroupingRule::PathSegment(index) => path_segments(&route.raw_path).nth(*index).map(String::from),
      GroupingRule::Tag(index) => route.tags.get(*index).cloned(),
    };
    Some(
      key
        .filter(|k| !k.trim().is_empty())
        .unwrap_or_else(|| CATCH_ALL_GROUP.to_string()),
    )
  }

  pub fn partition(&self, routes: Vec<Route>) -> GroupingResult {
    let tags = routes
      .iter()
      .flat_map(|r| r.tags.iter().cloned())
      .collect::<IndexSet<_>>()
      .into_iter()
      .collect();
    let mut warnings = vec![];

    let grouped = if self.rule.is_flat() {
      GroupedRoutes::Flat(dedupe_unit_names(routes, ENDPOINTS_DIR, &mut warnings))
    } else {
      let mut groups: IndexMap<String, Vec<Route>> = IndexMap::new();
      let mut by_directory: HashMap<String, String> = HashMap::new();

      for route in routes {
        let Some(key) = self.group_key(&route) else {
          continue;
        };
        let name = by_directory.entry(group_directory(&key)).or_insert(key).clone();
        groups.entry(name).or_default().push(route);
      }

      groups.retain(|name, _| self.filter.accepts(name));

      GroupedRoutes::Grouped(
        groups
          .into_iter()
          .map(|(name, routes)| {
            let directory = group_directory(&name);
            if directory != to_kebab_case(&name) {
              warnings.push(GenerationWarning::GroupDirectoryRenamed {
                group: name.clone(),
                directory: directory.clone(),
              });
            }
            let directory = format!("{directory}/{ENDPOINTS_DIR}");
            let routes = dedupe_unit_names(routes, &directory, &mut warnings);
            (name, routes)
          })
          .collect(),
      )
    };

    GroupingResult {
      routes: grouped,
      tags,
      warnings,
    }
  }
}

/// Two units in one directory may not share a name or a file name. Later
/// units are renamed with a numeric suffix and a warning is recorded.
fn dedupe_unit_names(routes: Vec<Route>, directory: &str, warnings: &mut Vec<GenerationWarning>) -> Vec<Route> {
  let mut names = BTreeSet::new();
  let mut files = BTreeSet::new();

  routes
    .into_iter()
    .map(|mut route| {
      let unique = ensure_unique_with(&route.unit_name, |candidate| {
        names.contains(candidate) || files.contains(&to_kebab_case(candidate))
      });
      if unique != route.unit_name {
        warnings.push(GenerationWarning::UnitNameCollision {
          original: route.unit_name.clone(),
          renamed: unique.clone(),
          directory: directory.to_string(),
        });
        route.unit_name = unique;
      }
      files.insert(to_kebab_case(&route.unit_name));
      names.insert(route.unit_name.clone());
      route
    })
    .collect()
}
