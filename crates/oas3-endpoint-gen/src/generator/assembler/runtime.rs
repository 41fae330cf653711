use std::collections::BTreeSet;

use crate::generator::{
  config::Injectable,
  naming::{
    constants::{HTTP_MULTISTATUS_RESPONSE_TYPE, HTTP_RESPONSE_TYPE, REQUEST_PARAMS_TYPE},
    identifiers::ensure_unique_with,
  },
};

/// Type-only exports of the runtime module that unit files reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuntimeType {
  HttpResponse,
  HttpMultistatusResponse,
  RequestParams,
}

impl RuntimeType {
  pub const ALL: [Self; 3] = [Self::HttpResponse, Self::HttpMultistatusResponse, Self::RequestParams];

  #[must_use]
  pub const fn export_name(self) -> &'static str {
    match self {
      Self::HttpResponse => HTTP_RESPONSE_TYPE,
      Self::HttpMultistatusResponse => HTTP_MULTISTATUS_RESPONSE_TYPE,
      Self::RequestParams => REQUEST_PARAMS_TYPE,
    }
  }
}

/// Local identifiers for every runtime symbol, indexed in `ALL` order. A symbol whose usual name is
/// already declared by a data contract or meta enum is imported under an alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeNames {
  injectables: [String; 3],
  types: [String; 3],
}

impl RuntimeNames {
  pub fn new<F>(is_taken: F) -> Self
  where
    F: Fn(&str) -> bool,
  {
    let mut used = BTreeSet::<String>::new();
    let mut pick = |base: &str| {
      let name = ensure_unique_with(base, |candidate| is_taken(candidate) || used.contains(candidate));
      used.insert(name.clone());
      name
    };

    let injectables = Injectable::ALL.map(|symbol| pick(symbol.local_name()));
    let types = RuntimeType::ALL.map(|ty| pick(ty.export_name()));
    Self { injectables, types }
  }

  #[must_use]
  pub fn injectable(&self, symbol: Injectable) -> &str {
    &self.injectables[symbol as usize]
  }

  #[must_use]
  pub fn runtime_type(&self, ty: RuntimeType) -> &str {
    &self.types[ty as usize]
  }

  /// Every local identifier, for collision checks against synthesized names.
  pub fn local_names(&self) -> impl Iterator<Item = &str> {
    self.injectables.iter().chain(&self.types).map(String::as_str)
  }
}

impl Default for RuntimeNames {
  fn default() -> Self {
    Self::new(|_| false)
  }
}
