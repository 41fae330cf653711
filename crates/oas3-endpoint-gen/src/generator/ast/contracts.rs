use std::collections::BTreeSet;

use super::{
  Documentation,
  ts::{Emit, TsLiteral, TsProp, TsType},
};
use crate::generator::naming::identifiers::quote_if_needed;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumMember {
  pub name: String,
  pub value: TsLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContractKind {
  Enum(Vec<EnumMember>),
  Record(Vec<TsProp>),
  Alias(TsType),
}

/// Where a contract came from. Registry contracts are global, synthesized ones
/// belong to exactly one endpoint unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContractOrigin {
  #[default]
  Registry,
  Synthesized,
}

/// A named TypeScript declaration: an enum, an interface or a type alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, bon::Builder)]
pub struct DataContract {
  #[builder(into)]
  pub name: String,
  pub kind: ContractKind,
  #[builder(default)]
  pub generics: Vec<String>,
  #[builder(default)]
  pub docs: Documentation,
  #[builder(default)]
  pub origin: ContractOrigin,
}

impl DataContract {
  /// Names of other declarations this contract's body mentions. Generic
  /// parameters and the contract itself are excluded.
  #[must_use]
  pub fn referenced_names(&self) -> BTreeSet<String> {
    let mut names = self.body_refs();
    names.remove(&self.name);
    names
  }

  /// Every name the body mentions except generic parameters, the contract's
  /// own name included when it is recursive.
  #[must_use]
  pub fn body_refs(&self) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    match &self.kind {
      ContractKind::Enum(_) => {}
      ContractKind::Record(props) => {
        for prop in props {
          prop.ty.collect_refs(&mut names);
        }
      }
      ContractKind::Alias(ty) => ty.collect_refs(&mut names),
    }
    for generic in &self.generics {
      names.remove(generic);
    }
    names
  }

  fn generic_params(&self) -> String {
    if self.generics.is_empty() {
      String::new()
    } else {
      format!("<{}>", self.generics.join(", "))
    }
  }
}

impl Emit for DataContract {
  fn emit(&self) -> String {
    let mut out = self.docs.to_jsdoc("");
    let name = &self.name;
    let generics = self.generic_params();

    match &self.kind {
      ContractKind::Enum(members) => {
        out.push_str(&format!("export enum {name} {{\n"));
        for member in members {
          out.push_str(&format!("  {} = {},\n", quote_if_needed(&member.name), member.value.emit()));
        }
        out.push_str("}\n");
      }
      ContractKind::Record(props) if props.is_empty() => {
        out.push_str(&format!("export type {name}{generics} = object;\n"));
      }
      ContractKind::Record(props) => {
        out.push_str(&format!("export interface {name}{generics} {{\n"));
        for prop in props {
          if let Some(description) = &prop.description {
            out.push_str(&Documentation::from_raw(description).to_jsdoc("  "));
          }
          out.push_str(&format!("  {};\n", prop.emit()));
        }
        out.push_str("}\n");
      }
      ContractKind::Alias(ty) => {
        out.push_str(&format!("export type {name}{generics} = {};\n", ty.emit()));
      }
    }
    out
  }
}
