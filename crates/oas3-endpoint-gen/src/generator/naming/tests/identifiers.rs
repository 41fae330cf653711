use std::collections::BTreeSet;

use crate::generator::naming::identifiers::{
  CaseUtils, ensure_unique, is_valid_identifier, quote_if_needed, sanitize, to_camel_case, to_enum_member_name,
  to_kebab_case, to_type_name, upper_first,
};

#[test]
fn test_camel_case_names() {
  let cases = [
    ("get_pet_by_id", "getPetById"),
    ("getPetById", "getPetById"),
    ("create-pet", "createPet"),
    ("Pets", "pets"),
    ("delete", "delete_"),
    ("new", "new_"),
    ("", "_"),
    ("  ", "_"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_camel_case(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_kebab_case_names() {
  let cases = [
    ("getPetById", "get-pet-by-id"),
    ("Owners", "owners"),
    ("pet_store", "pet-store"),
    ("", "unnamed"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_kebab_case(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_type_names() {
  let cases = [
    ("pet", "Pet"),
    ("UnusedWidget", "UnusedWidget"),
    ("getPetById", "GetPetById"),
    ("pet_store", "PetStore"),
    ("NOT_FOUND", "NotFound"),
    ("123Response", "T123Response"),
    ("{id}", "Id"),
    ("", "Unnamed"),
  ];
  for (input, expected) in cases {
    assert_eq!(to_type_name(input), expected, "failed for input {input:?}");
  }
}

#[test]
fn test_enum_member_names() {
  assert_eq!(to_enum_member_name("available"), "Available");
  assert_eq!(to_enum_member_name("in-stock"), "InStock");
  assert_eq!(to_enum_member_name("1"), "Value1");
  assert_eq!(to_enum_member_name("Tags"), "Tags");
}

#[test]
fn test_upper_first() {
  assert_eq!(upper_first("pets"), "Pets");
  assert_eq!(upper_first("pET"), "PET");
  assert_eq!(upper_first(""), "");
}

#[test]
fn test_sanitize_collapses_invalid_runs() {
  assert_eq!(sanitize("/pets/{id}"), "pets_id");
  assert_eq!(sanitize("__a--b__"), "a_b");
  assert_eq!(sanitize(""), "");
}

#[test]
fn test_identifier_validation_and_quoting() {
  assert!(is_valid_identifier("petId"));
  assert!(is_valid_identifier("$ref"));
  assert!(!is_valid_identifier("pet-id"));
  assert!(!is_valid_identifier("class"));
  assert!(!is_valid_identifier("1abc"));

  assert_eq!(quote_if_needed("petId"), "petId");
  assert_eq!(quote_if_needed("class"), "class");
  assert_eq!(quote_if_needed("pet-id"), "\"pet-id\"");
  assert_eq!(quote_if_needed("say \"hi\""), "\"say \\\"hi\\\"\"");
}

#[test]
fn test_ensure_unique_appends_suffix() {
  let used = BTreeSet::from(["getPet".to_string(), "getPet2".to_string()]);
  assert_eq!(ensure_unique("getPet", &used), "getPet3");
  assert_eq!(ensure_unique("listPets", &used), "listPets");
}

#[test]
fn test_case_utils_delegate_to_converters() {
  let utils = CaseUtils;
  assert_eq!(utils.camel("pet store api"), "petStoreApi");
  assert_eq!(utils.pascal("pet store"), "PetStore");
  assert_eq!(utils.kebab("PetStore"), "pet-store");
  assert_eq!(utils.upper_first("api"), "Api");
}
