use std::{collections::HashSet, fmt, str::FromStr, sync::Arc};

use strum::Display;

use crate::generator::{
  ast::Route,
  naming::{
    constants::{DEFAULT_RUNTIME_MODULE, ENDPOINT_SYMBOL, HTTP_CLIENT_SYMBOL, QUERY_CLIENT_SYMBOL},
    identifiers::{CaseUtils, to_camel_case},
  },
};

pub type GroupingFn = Arc<dyn Fn(&Route) -> Option<String> + Send + Sync>;
pub type NamespaceFn = Arc<dyn Fn(&CaseUtils) -> String + Send + Sync>;

/// How routes are partitioned into output directories.
#[derive(Clone, Default)]
pub enum GroupingRule {
  /// Caller-supplied key; `None` sends the route to the catch-all group.
  Custom(GroupingFn),
  /// The N-th non-empty path segment.
  PathSegment(usize),
  /// The N-th tag.
  Tag(usize),
  /// Flat layout, no group directories.
  #[default]
  None,
}

impl GroupingRule {
  #[must_use]
  pub const fn is_flat(&self) -> bool {
    matches!(self, Self::None)
  }
}

impl fmt::Debug for GroupingRule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Custom(_) => f.write_str("Custom(..)"),
      Self::PathSegment(index) => write!(f, "PathSegment({index})"),
      Self::Tag(index) => write!(f, "Tag({index})"),
      Self::None => f.write_str("None"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GroupingRuleParseError {
  #[strum(to_string = "unknown grouping rule '{value}', expected path-segment[-N], tag[-N] or none")]
  Unknown { value: String },
  #[strum(to_string = "invalid index in grouping rule '{value}'")]
  InvalidIndex { value: String },
}

impl std::error::Error for GroupingRuleParseError {}

impl FromStr for GroupingRule {
  type Err = GroupingRuleParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let value = s.trim().to_ascii_lowercase();
    let parse_index = |rest: &str| {
      rest.parse::<usize>().map_err(|_| GroupingRuleParseError::InvalidIndex {
        value: s.to_string(),
      })
    };

    match value.as_str() {
      "none" | "" => Ok(Self::None),
      "path-segment" => Ok(Self::PathSegment(0)),
      "tag" => Ok(Self::Tag(0)),
      other => {
        if let Some(rest) = other.strip_prefix("path-segment-") {
          Ok(Self::PathSegment(parse_index(rest)?))
        } else if let Some(rest) = other.strip_prefix("tag-") {
          Ok(Self::Tag(parse_index(rest)?))
        } else {
          Err(GroupingRuleParseError::Unknown { value: s.to_string() })
        }
      }
    }
  }
}

/// Root namespace the generated tree is re-exported under.
#[derive(Clone)]
pub enum Namespace {
  Literal(String),
  Derived(NamespaceFn),
}

impl Namespace {
  /// The camel-cased namespace identifier, or `None` when the raw value is blank.
  #[must_use]
  pub fn resolve(&self) -> Option<String> {
    let raw = match self {
      Self::Literal(value) => value.clone(),
      Self::Derived(derive) => derive(&CaseUtils),
    };
    if raw.trim().is_empty() {
      None
    } else {
      Some(to_camel_case(&raw))
    }
  }
}

impl fmt::Debug for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
      Self::Derived(_) => f.write_str("Derived(..)"),
    }
  }
}

/// An export of some module: `module#export`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportTarget {
  pub module: String,
  pub export: String,
}

impl ImportTarget {
  #[must_use]
  pub fn new(module: impl Into<String>, export: impl Into<String>) -> Self {
    Self {
      module: module.into(),
      export: export.into(),
    }
  }

  /// Module specifier as seen from a file `depth` directories below the
  /// output root. Package specifiers are returned unchanged.
  #[must_use]
  pub fn module_from_depth(&self, depth: usize) -> String {
    module_from_depth(&self.module, depth)
  }
}

/// Rebases a module specifier written relative to the output root onto a file
/// `depth` directories below it.
#[must_use]
pub fn module_from_depth(module: &str, depth: usize) -> String {
  let relative = module.starts_with("./") || module.starts_with("../");
  if !relative || depth == 0 {
    return module.to_string();
  }
  let rest = module.strip_prefix("./").unwrap_or(module);
  format!("{}{rest}", "../".repeat(depth))
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ImportTargetParseError {
  #[strum(to_string = "expected 'module#export', got '{value}'")]
  MissingSeparator { value: String },
  #[strum(to_string = "empty module in '{value}'")]
  EmptyModule { value: String },
  #[strum(to_string = "empty export name in '{value}'")]
  EmptyExport { value: String },
}

impl std::error::Error for ImportTargetParseError {}

impl FromStr for ImportTarget {
  type Err = ImportTargetParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let Some((module, export)) = s.rsplit_once('#') else {
      return Err(ImportTargetParseError::MissingSeparator { value: s.to_string() });
    };
    let (module, export) = (module.trim(), export.trim());
    if module.is_empty() {
      return Err(ImportTargetParseError::EmptyModule { value: s.to_string() });
    }
    if export.is_empty() {
      return Err(ImportTargetParseError::EmptyExport { value: s.to_string() });
    }
    Ok(Self::new(module, export))
  }
}

/// The runtime symbols every endpoint file imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Injectable {
  Endpoint,
  HttpClient,
  QueryClient,
}

impl Injectable {
  pub const ALL: [Self; 3] = [Self::Endpoint, Self::HttpClient, Self::QueryClient];

  /// Identifier the symbol is bound to inside generated files.
  #[must_use]
  pub const fn local_name(self) -> &'static str {
    match self {
      Self::Endpoint => ENDPOINT_SYMBOL,
      Self::HttpClient => HTTP_CLIENT_SYMBOL,
      Self::QueryClient => QUERY_CLIENT_SYMBOL,
    }
  }
}

/// Where each injectable symbol is imported from. Unset entries come from the
/// runtime module.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct InjectableSymbols {
  #[builder(into, default = DEFAULT_RUNTIME_MODULE.to_string())]
  pub runtime_module: String,
  pub endpoint: Option<ImportTarget>,
  pub http_client: Option<ImportTarget>,
  pub query_client: Option<ImportTarget>,
}

impl Default for InjectableSymbols {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl InjectableSymbols {
  #[must_use]
  pub fn target(&self, symbol: Injectable) -> ImportTarget {
    let custom = match symbol {
      Injectable::Endpoint => &self.endpoint,
      Injectable::HttpClient => &self.http_client,
      Injectable::QueryClient => &self.query_client,
    };
    custom
      .clone()
      .unwrap_or_else(|| ImportTarget::new(&self.runtime_module, symbol.local_name()))
  }
}

/// Include/exclude sets applied to group names after partitioning.
#[derive(Debug, Clone, Default)]
pub struct GroupFilter {
  only: Option<HashSet<String>>,
  excluded: Option<HashSet<String>>,
}

impl GroupFilter {
  #[must_use]
  pub fn new(only: Option<HashSet<String>>, excluded: Option<HashSet<String>>) -> Self {
    Self { only, excluded }
  }

  #[must_use]
  pub fn accepts(&self, group: &str) -> bool {
    if let Some(ref included) = self.only
      && !included.contains(group)
    {
      return false;
    }
    !self.excluded.as_ref().is_some_and(|excluded| excluded.contains(group))
  }
}

/// Everything the pipeline needs besides the document itself.
#[derive(Debug, Clone, bon::Builder)]
pub struct GeneratorConfig {
  #[builder(into, default)]
  pub path_prefix: String,
  #[builder(into, default)]
  pub path_suffix: String,
  #[builder(default)]
  pub grouping: GroupingRule,
  #[builder(default)]
  pub group_filter: GroupFilter,
  pub only_operations: Option<HashSet<String>>,
  pub excluded_operations: Option<HashSet<String>>,
  pub namespace: Option<Namespace>,
  /// Splice the N-th path segment in front of every unit name.
  pub add_path_segment: Option<usize>,
  #[builder(default)]
  pub injectables: InjectableSymbols,
  #[builder(default)]
  pub combine_path_and_query: bool,
  /// Reference `Group`/`Tag` enum members from unit bodies instead of plain strings.
  #[builder(default = true)]
  pub unit_meta: bool,
  #[builder(default = true)]
  pub sweep: bool,
}

impl Default for GeneratorConfig {
  fn default() -> Self {
    Self::builder().build()
  }
}
