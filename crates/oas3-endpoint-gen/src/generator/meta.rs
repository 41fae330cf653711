use std::collections::BTreeSet;

use crate::generator::{
  ast::{ContractKind, DataContract, Emit, EnumMember, TsLiteral, ts::string_literal},
  naming::{
    constants::{GROUP_ENUM, META_ENUM_SUFFIX, NAMESPACE_CONST, TAG_ENUM},
    identifiers::{ensure_unique, ensure_unique_with, to_enum_member_name},
  },
};

/// One member of the `Group` or `Tag` enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEntry {
  pub value: String,
  pub member: String,
}

/// Namespace, group and tag metadata for one run, computed once all routes
/// are grouped and shared by every unit and the `meta-info` file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetaInfo {
  pub namespace: Option<String>,
  pub groups: Vec<MetaEntry>,
  pub tags: Vec<MetaEntry>,
  pub group_enum: String,
  pub tag_enum: String,
}

impl MetaInfo {
  /// `is_taken` reports names already declared elsewhere in the output; the
  /// enumerations fall back to `GroupMeta` / `TagMeta` when `Group` / `Tag` are taken.
  pub fn new<F>(namespace: Option<String>, groups: &[String], tags: &[String], is_taken: F) -> Self
  where
    F: Fn(&str) -> bool,
  {
    let group_enum = enum_name(GROUP_ENUM, &is_taken);
    let tag_enum = enum_name(TAG_ENUM, |name| is_taken(name) || name == group_enum);

    Self {
      namespace,
      groups: entries(groups),
      tags: entries(tags),
      group_enum,
      tag_enum,
    }
  }

  #[must_use]
  pub fn group_member(&self, group: &str) -> Option<&str> {
    find_member(&self.groups, group)
  }

  #[must_use]
  pub fn tag_member(&self, tag: &str) -> Option<&str> {
    find_member(&self.tags, tag)
  }

  /// `Group.Pets`, or `None` if the group is unknown.
  #[must_use]
  pub fn group_ref(&self, group: &str) -> Option<String> {
    self.group_member(group).map(|m| format!("{}.{m}", self.group_enum))
  }

  #[must_use]
  pub fn tag_ref(&self, tag: &str) -> Option<String> {
    self.tag_member(tag).map(|m| format!("{}.{m}", self.tag_enum))
  }

  /// Top-level names the `meta-info` file declares.
  #[must_use]
  pub fn declared_names(&self) -> Vec<String> {
    let mut names = vec![];
    if self.namespace.is_some() {
      names.push(NAMESPACE_CONST.to_string());
    }
    if !self.groups.is_empty() {
      names.push(self.group_enum.clone());
    }
    if !self.tags.is_empty() {
      names.push(self.tag_enum.clone());
    }
    names
  }

  /// Body of the `meta-info` file.
  #[must_use]
  pub fn render(&self) -> String {
    let mut blocks = vec![];
    if let Some(namespace) = &self.namespace {
      blocks.push(format!("export const {NAMESPACE_CONST} = {};\n", string_literal(namespace)));
    }
    if !self.groups.is_empty() {
      blocks.push(meta_enum(&self.group_enum, &self.groups).emit());
    }
    if !self.tags.is_empty() {
      blocks.push(meta_enum(&self.tag_enum, &self.tags).emit());
    }
    blocks.join("\n")
  }
}

fn enum_name<F>(base: &str, is_taken: F) -> String
where
  F: Fn(&str) -> bool,
{
  if is_taken(base) {
    ensure_unique_with(&format!("{base}{META_ENUM_SUFFIX}"), is_taken)
  } else {
    base.to_string()
  }
}

fn entries(values: &[String]) -> Vec<MetaEntry> {
  let mut used = BTreeSet::new();
  let mut seen = BTreeSet::new();
  values
    .iter()
    .filter(|value| seen.insert(value.as_str()))
    .map(|value| {
      let member = ensure_unique(&to_enum_member_name(value), &used);
      used.insert(member.clone());
      MetaEntry {
        value: value.clone(),
        member,
      }
    })
    .collect()
}

fn find_member<'a>(entries: &'a [MetaEntry], value: &str) -> Option<&'a str> {
  entries.iter().find(|e| e.value == value).map(|e| e.member.as_str())
}

fn meta_enum(name: &str, entries: &[MetaEntry]) -> DataContract {
  DataContract::builder()
    .name(name)
    .kind(ContractKind::Enum(
      entries
        .iter()
        .map(|e| EnumMember {
          name: e.member.clone(),
          value: TsLiteral::String(e.value.clone()),
        })
        .collect(),
    ))
    .build()
}
