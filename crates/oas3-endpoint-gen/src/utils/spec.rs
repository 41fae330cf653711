use std::{collections::HashSet, ffi::OsStr, path::Path};

use anyhow::{Context, bail};
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use http::Method;
use oas3::OpenApiV3Spec;

const PATH_ITEM_METHODS: [&str; 8] = ["get", "put", "post", "delete", "options", "head", "patch", "trace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext.to_ascii_lowercase().as_str() {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }

  /// Guesses from the first non-blank byte when the extension says nothing.
  #[must_use]
  pub fn sniff(content: &[u8]) -> Self {
    match content.iter().find(|b| !b.is_ascii_whitespace()) {
      Some(b'{') | None => Self::Json,
      Some(_) => Self::Yaml,
    }
  }
}

/// Memory-maps an OpenAPI document and parses it as JSON or YAML.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: Option<SpecFormat>,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = path.extension().and_then(OsStr::to_str).map(SpecFormat::from_extension);
    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self { file, format })
  }

  /// True when the file holds nothing but whitespace.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.file.as_slice().iter().all(u8::is_ascii_whitespace)
  }

  pub fn parse(&self) -> anyhow::Result<ApiDocument> {
    if self.is_empty() {
      bail!("input document is empty");
    }
    let bytes = self.file.as_slice();
    ApiDocument::parse(bytes, self.format.unwrap_or_else(|| SpecFormat::sniff(bytes)))
  }
}

/// A parsed document plus what `oas3::Spec` loses on the way: the order the
/// `paths` keys were written in, and operations that opt out of security
/// with an explicit `security: []`.
#[derive(Debug, Clone)]
pub struct ApiDocument {
  pub spec: oas3::Spec,
  pub path_order: Vec<String>,
  pub open_operations: HashSet<(String, Method)>,
}

impl ApiDocument {
  pub fn parse(bytes: &[u8], format: SpecFormat) -> anyhow::Result<Self> {
    let spec = parse_bytes(bytes, format)?;
    let layout = match format {
      SpecFormat::Json => json_layout(&serde_json::from_slice(bytes)?),
      SpecFormat::Yaml => yaml_layout(&serde_yaml::from_slice(bytes)?),
    };
    Ok(Self {
      spec,
      path_order: layout.path_order,
      open_operations: layout.open_operations,
    })
  }

  pub fn from_json(content: &str) -> anyhow::Result<Self> {
    Self::parse(content.as_bytes(), SpecFormat::Json)
  }
}

impl From<oas3::Spec> for ApiDocument {
  /// Without the source text the spec's own key order is all there is.
  fn from(spec: oas3::Spec) -> Self {
    let path_order = spec.paths.iter().flatten().map(|(path, _)| path.clone()).collect();
    Self {
      spec,
      path_order,
      open_operations: HashSet::new(),
    }
  }
}

pub fn parse_bytes(bytes: &[u8], format: SpecFormat) -> anyhow::Result<oas3::Spec> {
  match format {
    SpecFormat::Json => Ok(serde_json::from_slice::<OpenApiV3Spec>(bytes)?),
    SpecFormat::Yaml => {
      let content = std::str::from_utf8(bytes)?;
      Ok(oas3::from_yaml(content)?)
    }
  }
}

#[derive(Default)]
struct Layout {
  path_order: Vec<String>,
  open_operations: HashSet<(String, Method)>,
}

impl Layout {
  fn visit_path(&mut self, path: &str) {
    self.path_order.push(path.to_string());
  }

  fn visit_operation(&mut self, path: &str, key: &str, security_is_empty_list: bool) {
    if security_is_empty_list
      && PATH_ITEM_METHODS.contains(&key)
      && let Ok(method) = Method::from_bytes(key.to_ascii_uppercase().as_bytes())
    {
      self.open_operations.insert((path.to_string(), method));
    }
  }
}

fn json_layout(root: &serde_json::Value) -> Layout {
  let mut layout = Layout::default();
  let Some(paths) = root.get("paths").and_then(serde_json::Value::as_object) else {
    return layout;
  };
  for (path, item) in paths {
    layout.visit_path(path);
    for (key, operation) in item.as_object().into_iter().flatten() {
      let open = operation
        .get("security")
        .and_then(serde_json::Value::as_array)
        .is_some_and(Vec::is_empty);
      layout.visit_operation(path, key, open);
    }
  }
  layout
}

fn yaml_layout(root: &serde_yaml::Value) -> Layout {
  let mut layout = Layout::default();
  let Some(paths) = root.get("paths").and_then(serde_yaml::Value::as_mapping) else {
    return layout;
  };
  for (path, item) in paths {
    let Some(path) = path.as_str() else { continue };
    layout.visit_path(path);
    for (key, operation) in item.as_mapping().into_iter().flatten() {
      let Some(key) = key.as_str() else { continue };
      let open = operation
        .get("security")
        .and_then(serde_yaml::Value::as_sequence)
        .is_some_and(Vec::is_empty);
      layout.visit_operation(path, key, open);
    }
  }
  layout
}
