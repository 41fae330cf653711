use std::collections::BTreeSet;

use super::Fixture;
use crate::generator::{
  assembler::{RuntimeNames, RuntimeType, UnitAssembler},
  ast::{ContractKind, DataContract, Emit, TsType},
  config::GeneratorConfig,
  metrics::GenerationWarning,
  source::ContractRegistry,
};

#[test]
fn test_query_route_body() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let unit = fixture.assemble("listPets", Some("Pets"));

  assert_eq!(unit.file_stem, "list-pets");
  assert_eq!(unit.group.as_deref(), Some("Pets"));
  assert!(unit.body.starts_with("/**\n * @tags Pets\n * @request GET:/pets\n */\n"));
  assert!(
    unit
      .body
      .contains("export const listPets = new Endpoint<HttpResponse<Pet[], any>, ListPetsInput, any>(\n")
  );
  assert!(unit.body.contains("    params: ({ query, requestParams }: ListPetsInput) => ({\n"));
  assert!(unit.body.contains("      path: `/pets`,\n      method: \"GET\",\n      query,\n      ...requestParams,\n"));
  assert!(unit.body.contains("    requiredParams: [],\n"));
  assert!(unit.body.contains("    operationId: \"listPets\",\n"));
  assert!(unit.body.contains("    path: [\"pets\"],\n"));
  assert!(unit.body.contains("    tags: [Tag.Pets],\n"));
  assert!(unit.body.contains("    group: GroupMeta.Pets,\n"));
  assert!(unit.body.ends_with("  },\n  queryClient,\n  http,\n);\n"));
}

#[test]
fn test_input_contract_follows_signature() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let unit = fixture.assemble("listPetsPets", None);

  let input = &unit.local_contracts[0];
  assert_eq!(input.name, "ListPetsPetsInput");
  assert_eq!(
    input.emit(),
    "export interface ListPetsPetsInput {\n  storeId: number;\n  query: { sort: \"asc\" | \"desc\" };\n  requestParams?: RequestParams;\n}\n"
  );
  assert!(unit.body.contains("    requiredParams: [\"storeId\", \"query\"],\n"));
  assert!(unit.body.contains("      path: `/stores/${storeId}/pets`,\n"));
  assert!(!unit.body.contains("group:"));
}

#[test]
fn test_combined_params_declare_params_contract() {
  let config = GeneratorConfig::builder().combine_path_and_query(true).build();
  let fixture = Fixture::operations(&config);
  let unit = fixture.assemble("listPetsPets", None);

  let names = unit.local_contracts.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
  assert_eq!(names, vec!["ListPetsPetsInput", "ListPetsPetsParams"]);
  assert_eq!(
    unit.local_contracts[1].emit(),
    "export interface ListPetsPetsParams {\n  storeId: number;\n  sort: \"asc\" | \"desc\";\n}\n"
  );
  assert!(unit.body.contains("params: ({ params: { storeId, ...query }, requestParams }: ListPetsPetsInput)"));

  let referenced = unit.referenced_names();
  assert!(referenced.contains("Pet"));
  assert!(!referenced.contains("ListPetsPetsParams"));
}

#[test]
fn test_request_body_and_secure_routes() {
  let fixture = Fixture::operations(&GeneratorConfig::default());

  let create = fixture.assemble("createPet", None);
  assert!(create.body.contains("      body,\n      secure: true,\n"));
  assert!(create.body.contains(" * @secure\n"));
  assert!(create.body.contains("    requiredParams: [\"body\"],\n"));
  assert!(create.reserved.contains("NewPet"));

  let upload = fixture.assemble("uploadPhoto", None);
  assert!(upload.body.contains("      contentType: \"multipart/form-data\",\n"));
  assert!(upload.body.contains("      format: \"arrayBuffer\",\n"));
  assert!(upload.body.contains("    tags: [Tag.Pets, Tag.Media],\n"));
  assert!(upload.body.contains(" * @tags Pets, Media\n"));
  assert!(upload.body.contains(", Error>, UploadPhotoInput, any>("));
}

#[test]
fn test_deprecated_route_with_default_error() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let unit = fixture.assemble("deletePetsByPetId", None);

  assert!(unit.body.starts_with("/**\n * @deprecated\n"));
  assert!(unit.body.contains("new Endpoint<HttpResponse<void, Error>, DeletePetsByPetIdInput, any>("));
  assert_eq!(
    unit.runtime_types,
    BTreeSet::from([RuntimeType::HttpResponse, RuntimeType::RequestParams])
  );
}

#[test]
fn test_plain_strings_without_unit_meta() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let assembler = UnitAssembler::new(&fixture.registry, &fixture.meta, &fixture.names, false);
  let (unit, _) = assembler.assemble(fixture.route("uploadPhoto"), Some("Pets"), &mut BTreeSet::new());

  assert!(unit.body.contains("    tags: [\"Pets\", \"Media\"],\n"));
  assert!(unit.body.contains("    group: \"Pets\",\n"));
  assert!(unit.meta_refs.is_empty());
}

#[test]
fn test_meta_refs_record_used_enums() {
  let fixture = Fixture::operations(&GeneratorConfig::default());

  let grouped = fixture.assemble("listPets", Some("Pets"));
  assert_eq!(grouped.meta_refs, BTreeSet::from(["GroupMeta".to_string(), "Tag".to_string()]));

  let untagged = fixture.assemble("health", None);
  assert!(untagged.meta_refs.is_empty());
  assert!(untagged.body.contains("    tags: [],\n"));
}

#[test]
fn test_taken_input_name_is_renamed() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let registry = ContractRegistry::new(fixture.registry.iter().cloned().chain([DataContract::builder()
    .name("HealthInput")
    .kind(ContractKind::Alias(TsType::any()))
    .build()]));
  let assembler = UnitAssembler::new(&registry, &fixture.meta, &fixture.names, true);
  let (unit, _) = assembler.assemble(fixture.route("health"), None, &mut BTreeSet::new());

  assert_eq!(unit.local_contracts[0].name, "HealthInput2");
  assert!(unit.body.contains("    params: ({ requestParams }: HealthInput2) => ({\n"));
  assert_eq!(
    unit.warnings,
    vec![GenerationWarning::SynthesizedNameCollision {
      unit: "health".to_string(),
      requested: "HealthInput".to_string(),
      renamed: "HealthInput2".to_string(),
    }]
  );
}

#[test]
fn test_synthesized_names_are_unique_per_directory() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let assembler = UnitAssembler::new(&fixture.registry, &fixture.meta, &fixture.names, true);
  let mut taken = BTreeSet::from(["ListPetsInput".to_string()]);
  let (unit, _) = assembler.assemble(fixture.route("listPets"), None, &mut taken);

  assert_eq!(unit.local_contracts[0].name, "ListPetsInput2");
  assert!(taken.contains("ListPetsInput2"));
}

#[test]
fn test_aliased_runtime_names_are_used() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let names = RuntimeNames::new(|name| name == "HttpResponse" || name == "http");
  let assembler = UnitAssembler::new(&fixture.registry, &fixture.meta, &names, true);
  let (unit, _) = assembler.assemble(fixture.route("health"), None, &mut BTreeSet::new());

  assert!(unit.body.contains("new Endpoint<HttpResponse2<string, any>, HealthInput, any>("));
  assert!(unit.body.ends_with("  queryClient,\n  http2,\n);\n"));
}

#[test]
fn test_group_tally_counts_each_unit_once() {
  let fixture = Fixture::operations(&GeneratorConfig::default());
  let assembler = UnitAssembler::new(&fixture.registry, &fixture.meta, &fixture.names, true);
  let (units, tally) = assembler.assemble_group(None, &fixture.routes);

  assert_eq!(units.len(), fixture.routes.len());
  assert_eq!(tally.count("Pet"), 3);
  assert_eq!(tally.count("NewPet"), 1);
  assert_eq!(tally.count("Error"), 2);
  assert_eq!(tally.count("Owner"), 0);
}
