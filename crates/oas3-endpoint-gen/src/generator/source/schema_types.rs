use std::collections::{BTreeMap, BTreeSet};

use oas3::spec::{ObjectOrReference, ObjectSchema, Ref, Schema, SchemaType, SchemaTypeSet};

use crate::generator::{
  ast::{TsLiteral, TsPrimitive, TsProp, TsType},
  naming::identifiers::{ensure_unique_with, to_type_name},
};

/// Maps JSON schemas onto TypeScript type expressions.
///
/// Component schema names are translated once up front so that `$ref`s and
/// registry declarations agree on the TypeScript name.
#[derive(Debug, Clone, Default)]
pub struct TypeMapper {
  names: BTreeMap<String, String>,
}

impl TypeMapper {
  pub fn new<'a>(schema_names: impl IntoIterator<Item = &'a String>) -> Self {
    let mut names = BTreeMap::new();
    let mut taken = BTreeSet::new();
    for raw in schema_names {
      let name = ensure_unique_with(&to_type_name(raw), |candidate| taken.contains(candidate));
      taken.insert(name.clone());
      names.insert(raw.clone(), name);
    }
    Self { names }
  }

  /// TypeScript name of a component schema.
  #[must_use]
  pub fn contract_name(&self, schema_name: &str) -> String {
    self
      .names
      .get(schema_name)
      .cloned()
      .unwrap_or_else(|| to_type_name(schema_name))
  }

  pub fn schema_ref_type(&self, schema: &ObjectOrReference<ObjectSchema>) -> TsType {
    match schema {
      ObjectOrReference::Ref { ref_path, .. } => {
        schema_ref_name(ref_path).map_or_else(TsType::any, |name| TsType::named(self.contract_name(&name)))
      }
      ObjectOrReference::Object(schema) => self.schema_type(schema),
    }
  }

  pub fn schema_type(&self, schema: &ObjectSchema) -> TsType {
    if let Some(value) = &schema.const_value
      && let Some(literal) = TsLiteral::from_json(value)
    {
      return TsType::Literal(literal);
    }

    if !schema.enum_values.is_empty() {
      return TsType::union(
        schema
          .enum_values
          .iter()
          .filter_map(TsLiteral::from_json)
          .map(TsType::Literal),
      );
    }

    if !schema.one_of.is_empty() {
      return TsType::union(schema.one_of.iter().map(|s| self.schema_ref_type(s)));
    }

    if !schema.any_of.is_empty() {
      return TsType::union(schema.any_of.iter().map(|s| self.schema_ref_type(s)));
    }

    if !schema.all_of.is_empty() {
      return TsType::intersection(schema.all_of.iter().map(|s| self.schema_ref_type(s)));
    }

    match &schema.schema_type {
      Some(SchemaTypeSet::Single(ty)) => self.single_type(*ty, schema),
      Some(SchemaTypeSet::Multiple(types)) => TsType::union(types.iter().map(|ty| self.single_type(*ty, schema))),
      None if !schema.properties.is_empty() || schema.additional_properties.is_some() => self.object_type(schema),
      None => TsType::any(),
    }
  }

  fn single_type(&self, ty: SchemaType, schema: &ObjectSchema) -> TsType {
    match ty {
      SchemaType::String if schema.format.as_deref() == Some("binary") => TsType::Primitive(TsPrimitive::File),
      SchemaType::String => TsType::Primitive(TsPrimitive::String),
      SchemaType::Integer | SchemaType::Number => TsType::Primitive(TsPrimitive::Number),
      SchemaType::Boolean => TsType::Primitive(TsPrimitive::Boolean),
      SchemaType::Null => TsType::null(),
      SchemaType::Array => TsType::array(self.items_type(schema)),
      SchemaType::Object => self.object_type(schema),
    }
  }

  fn items_type(&self, schema: &ObjectSchema) -> TsType {
    match schema.items.as_deref() {
      Some(Schema::Object(items)) => self.schema_ref_type(items),
      Some(Schema::Boolean(_)) | None => TsType::any(),
    }
  }

  /// Property list of an object schema, in declaration order.
  pub fn properties(&self, schema: &ObjectSchema) -> Vec<TsProp> {
    schema
      .properties
      .iter()
      .map(|(name, prop)| {
        let description = match prop {
          ObjectOrReference::Object(inline) => inline.description.clone(),
          ObjectOrReference::Ref { .. } => None,
        };
        TsProp::new(name, self.schema_ref_type(prop), !schema.required.contains(name)).with_description(description)
      })
      .collect()
  }

  /// Value type of `additionalProperties`, if the schema allows extra keys.
  pub fn additional_properties(&self, schema: &ObjectSchema) -> Option<TsType> {
    match schema.additional_properties.as_ref()? {
      Schema::Object(value) => Some(self.schema_ref_type(value)),
      Schema::Boolean(allowed) if allowed.0 => Some(TsType::any()),
      Schema::Boolean(_) => None,
    }
  }

  fn object_type(&self, schema: &ObjectSchema) -> TsType {
    let props = self.properties(schema);
    let extra = self.additional_properties(schema);

    match (props.is_empty(), extra) {
      (true, Some(value)) => TsType::record(value),
      (true, None) => TsType::record(TsType::any()),
      (false, None) => TsType::Object(props),
      (false, Some(value)) => TsType::intersection([TsType::Object(props), TsType::record(value)]),
    }
  }
}

/// Component name of an internal `#/components/...` reference. External
/// documents are not followed.
fn schema_ref_name(ref_path: &str) -> Option<String> {
  if !ref_path.starts_with("#/components") {
    return None;
  }
  ref_path.parse::<Ref>().ok().map(|component| component.name)
}
