use crate::generator::naming::units::{
  group_directory, input_contract_name, last_literal_segment, params_contract_name, path_segments, splice_path_segment, usage_name,
};

#[test]
fn test_usage_name_prefers_operation_id() {
  assert_eq!(usage_name("get", "/pets/{id}", Some("showPetById")), "showPetById");
  assert_eq!(usage_name("post", "/pets", Some("create-pet")), "createPet");
}

#[test]
fn test_usage_name_falls_back_to_method_and_path() {
  assert_eq!(usage_name("GET", "/pets/{petId}", None), "getPetsByPetId");
  assert_eq!(usage_name("DELETE", "/", None), "delete_");
  assert_eq!(usage_name("get", "/owners", Some("")), "getOwners");
}

#[test]
fn test_splice_path_segment() {
  assert_eq!(splice_path_segment("getById", "/pets/{id}", 0), "petsGetById");
  assert_eq!(splice_path_segment("getById", "/api/pets/{id}", 1), "petsGetById");
  assert_eq!(splice_path_segment("getById", "/pets", 3), "getById");
}

#[test]
fn test_last_literal_segment_skips_params() {
  assert_eq!(last_literal_segment("/owners/{id}/pets/{petId}"), Some("pets"));
  assert_eq!(last_literal_segment("/{id}"), None);
}

#[test]
fn test_path_segments_drop_empty() {
  let segments = path_segments("//pets//{id}/").collect::<Vec<_>>();
  assert_eq!(segments, ["pets", "{id}"]);
}

#[test]
fn test_synthesized_contract_names() {
  assert_eq!(input_contract_name("getPetById"), "GetPetByIdInput");
  assert_eq!(params_contract_name("listPets"), "ListPetsParams");
}

#[test]
fn test_group_directory_avoids_root_modules() {
  assert_eq!(group_directory("Pets"), "pets");
  assert_eq!(group_directory("Data Contracts"), "data-contracts2");
  assert_eq!(group_directory("meta_info"), "meta-info2");
  assert_eq!(group_directory("index"), "index2");
}
