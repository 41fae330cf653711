use crate::generator::naming::{
  constants::{DATA_CONTRACTS_FILE, EXPORTS_FILE, INDEX_FILE, INPUT_SUFFIX, META_INFO_FILE, PARAMS_SUFFIX},
  identifiers::{ensure_unique_with, sanitize, to_camel_case, to_kebab_case, to_type_name},
};

/// Root module stems a group directory may not shadow.
const ROOT_STEMS: [&str; 4] = [DATA_CONTRACTS_FILE, META_INFO_FILE, INDEX_FILE, EXPORTS_FILE];

/// Computes the name the route source assigns to an operation before any
/// generator naming rules run.
///
/// The operation id wins when present; otherwise the name is derived from the
/// method and the path, rendering `{param}` segments as `by_<param>`.
///
/// # Example
///
/// ```text
/// ("GET", "/pets/{petId}", None)            => "getPetsByPetId"
/// ("POST", "/pets", Some("create-pet"))     => "createPet"
/// ```
pub fn usage_name<S>(method: S, path: S, operation_id: Option<S>) -> String
where
  S: AsRef<str>,
{
  match operation_id {
    Some(id) if !sanitize(id.as_ref()).is_empty() => to_camel_case(id.as_ref()),
    _ => to_camel_case(&operation_name_from_path(method.as_ref(), path.as_ref())),
  }
}

fn operation_name_from_path(method: &str, path: &str) -> String {
  let parts = path_segments(path)
    .map(|segment| match template_param(segment) {
      Some(param) => format!("by_{param}"),
      None => segment.to_string(),
    })
    .collect::<Vec<_>>();

  if parts.is_empty() {
    method.to_lowercase()
  } else {
    format!("{}_{}", method.to_lowercase(), parts.join("_"))
  }
}

/// Splices the camel-cased `index`-th non-empty path segment in front of a
/// unit name. Leaves the name unchanged when the segment does not exist.
///
/// This is best-effort disambiguation and does not guarantee uniqueness.
pub fn splice_path_segment(unit_name: &str, path: &str, index: usize) -> String {
  match path_segments(path).nth(index) {
    Some(segment) => to_camel_case(&format!("{}_{unit_name}", sanitize(segment))),
    None => unit_name.to_string(),
  }
}

/// Directory a group's files are written to: the kebab-cased group name,
/// numbered when it would resolve to the same module as a root file.
pub fn group_directory(group: &str) -> String {
  ensure_unique_with(&to_kebab_case(group), |candidate| ROOT_STEMS.contains(&candidate))
}

/// Returns the last path segment that is not a template parameter.
pub fn last_literal_segment(path: &str) -> Option<&str> {
  path_segments(path).filter(|s| template_param(s).is_none()).last()
}

/// Non-empty `/`-separated segments of a path template.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
  path.split('/').filter(|s| !s.is_empty())
}

fn template_param(segment: &str) -> Option<&str> {
  segment.strip_prefix('{').and_then(|s| s.strip_suffix('}'))
}

/// Name of the synthesized input record for a unit.
pub fn input_contract_name(unit_name: &str) -> String {
  format!("{}{INPUT_SUFFIX}", to_type_name(unit_name))
}

/// Name of the synthesized combined path + query record for a unit.
pub fn params_contract_name(unit_name: &str) -> String {
  format!("{}{PARAMS_SUFFIX}", to_type_name(unit_name))
}
