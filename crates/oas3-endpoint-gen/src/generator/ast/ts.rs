use std::collections::BTreeSet;

use serde_json::Number;

use crate::generator::naming::identifiers::quote_if_needed;

/// Renders a node as TypeScript source text.
pub trait Emit {
  fn emit(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsPrimitive {
  String,
  Number,
  Boolean,
  Null,
  Void,
  Unknown,
  Any,
  Never,
  File,
}

impl Emit for TsPrimitive {
  fn emit(&self) -> String {
    match self {
      Self::String => "string",
      Self::Number => "number",
      Self::Boolean => "boolean",
      Self::Null => "null",
      Self::Void => "void",
      Self::Unknown => "unknown",
      Self::Any => "any",
      Self::Never => "never",
      Self::File => "File",
    }
    .to_string()
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TsLiteral {
  String(String),
  Number(Number),
  Bool(bool),
  Null,
}

impl TsLiteral {
  /// Converts a JSON value into a literal. Arrays and objects have no literal form.
  #[must_use]
  pub fn from_json(value: &serde_json::Value) -> Option<Self> {
    match value {
      serde_json::Value::String(s) => Some(Self::String(s.clone())),
      serde_json::Value::Number(n) => Some(Self::Number(n.clone())),
      serde_json::Value::Bool(b) => Some(Self::Bool(*b)),
      serde_json::Value::Null => Some(Self::Null),
      serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
    }
  }

  #[must_use]
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::String(s) => Some(s),
      _ => None,
    }
  }
}

impl Emit for TsLiteral {
  fn emit(&self) -> String {
    match self {
      Self::String(s) => string_literal(s),
      Self::Number(n) => n.to_string(),
      Self::Bool(b) => b.to_string(),
      Self::Null => "null".to_string(),
    }
  }
}

/// A double-quoted TypeScript string literal.
pub(crate) fn string_literal(value: &str) -> String {
  let escaped = value
    .replace('\\', "\\\\")
    .replace('"', "\\\"")
    .replace('\n', "\\n")
    .replace('\r', "\\r");
  format!("\"{escaped}\"")
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TsProp {
  pub name: String,
  pub ty: TsType,
  pub optional: bool,
  pub description: Option<String>,
}

impl TsProp {
  #[must_use]
  pub fn new(name: impl Into<String>, ty: TsType, optional: bool) -> Self {
    Self {
      name: name.into(),
      ty,
      optional,
      description: None,
    }
  }

  #[must_use]
  pub fn with_description(mut self, description: Option<String>) -> Self {
    self.description = description.filter(|d| !d.trim().is_empty());
    self
  }
}

impl Emit for TsProp {
  fn emit(&self) -> String {
    let marker = if self.optional { "?" } else { "" };
    format!("{}{marker}: {}", quote_if_needed(&self.name), self.ty.emit())
  }
}

/// TypeScript type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TsType {
  Primitive(TsPrimitive),
  Literal(TsLiteral),
  Array(Box<TsType>),
  Union(Vec<TsType>),
  Intersection(Vec<TsType>),
  Object(Vec<TsProp>),
  Record(Box<TsType>),
  /// Named type, optionally with type arguments: `Foo`, `HttpResponse<A, B>`.
  Ref { name: String, args: Vec<TsType> },
}

impl TsType {
  #[must_use]
  pub fn named(name: impl Into<String>) -> Self {
    Self::Ref {
      name: name.into(),
      args: vec![],
    }
  }

  #[must_use]
  pub fn generic(name: impl Into<String>, args: Vec<TsType>) -> Self {
    Self::Ref {
      name: name.into(),
      args,
    }
  }

  #[must_use]
  pub const fn any() -> Self {
    Self::Primitive(TsPrimitive::Any)
  }

  #[must_use]
  pub const fn void() -> Self {
    Self::Primitive(TsPrimitive::Void)
  }

  #[must_use]
  pub const fn null() -> Self {
    Self::Primitive(TsPrimitive::Null)
  }

  #[must_use]
  pub fn array(inner: TsType) -> Self {
    Self::Array(Box::new(inner))
  }

  #[must_use]
  pub fn record(value: TsType) -> Self {
    Self::Record(Box::new(value))
  }

  /// Builds a union, flattening nested unions and dropping duplicates.
  /// A single member collapses to itself and an empty union is `never`.
  #[must_use]
  pub fn union(members: impl IntoIterator<Item = TsType>) -> Self {
    let mut flat: Vec<TsType> = vec![];
    for member in members {
      let nested = match member {
        Self::Union(inner) => inner,
        other => vec![other],
      };
      for ty in nested {
        if !flat.contains(&ty) {
          flat.push(ty);
        }
      }
    }
    match flat.len() {
      0 => Self::Primitive(TsPrimitive::Never),
      1 => flat.remove(0),
      _ => Self::Union(flat),
    }
  }

  #[must_use]
  pub fn intersection(members: impl IntoIterator<Item = TsType>) -> Self {
    let mut flat: Vec<TsType> = members.into_iter().collect();
    match flat.len() {
      0 => Self::Primitive(TsPrimitive::Unknown),
      1 => flat.remove(0),
      _ => Self::Intersection(flat),
    }
  }

  #[must_use]
  pub fn is_void(&self) -> bool {
    matches!(self, Self::Primitive(TsPrimitive::Void))
  }

  #[must_use]
  pub fn ref_name(&self) -> Option<&str> {
    match self {
      Self::Ref { name, .. } => Some(name),
      _ => None,
    }
  }

  /// Every named type this expression mentions, type arguments included.
  #[must_use]
  pub fn referenced_names(&self) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    self.collect_refs(&mut names);
    names
  }

  pub fn collect_refs(&self, out: &mut BTreeSet<String>) {
    match self {
      Self::Primitive(_) | Self::Literal(_) => {}
      Self::Array(inner) | Self::Record(inner) => inner.collect_refs(out),
      Self::Union(members) | Self::Intersection(members) => {
        for member in members {
          member.collect_refs(out);
        }
      }
      Self::Object(props) => {
        for prop in props {
          prop.ty.collect_refs(out);
        }
      }
      Self::Ref { name, args } => {
        out.insert(name.clone());
        for arg in args {
          arg.collect_refs(out);
        }
      }
    }
  }

  fn needs_parens_in_array(&self) -> bool {
    matches!(self, Self::Union(_) | Self::Intersection(_))
  }
}

impl Emit for TsType {
  fn emit(&self) -> String {
    match self {
      Self::Primitive(p) => p.emit(),
      Self::Literal(lit) => lit.emit(),
      Self::Array(inner) if inner.needs_parens_in_array() => format!("({})[]", inner.emit()),
      Self::Array(inner) => format!("{}[]", inner.emit()),
      Self::Union(members) => members.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
      Self::Intersection(members) => members
        .iter()
        .map(|m| match m {
          Self::Union(_) => format!("({})", m.emit()),
          _ => m.emit(),
        })
        .collect::<Vec<_>>()
        .join(" & "),
      Self::Object(props) if props.is_empty() => "{}".to_string(),
      Self::Object(props) => {
        let body = props.iter().map(Emit::emit).collect::<Vec<_>>().join("; ");
        format!("{{ {body} }}")
      }
      Self::Record(value) => format!("Record<string, {}>", value.emit()),
      Self::Ref { name, args } if args.is_empty() => name.clone(),
      Self::Ref { name, args } => {
        let args = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
        format!("{name}<{args}>")
      }
    }
  }
}
