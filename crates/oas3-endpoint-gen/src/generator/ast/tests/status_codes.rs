use crate::generator::ast::StatusKey;

#[test]
fn test_parses_codes_ranges_and_default() {
  assert_eq!(StatusKey::parse("200"), Some(StatusKey::Code(200)));
  assert_eq!(StatusKey::parse("4XX"), Some(StatusKey::Range(4)));
  assert_eq!(StatusKey::parse("5xx"), Some(StatusKey::Range(5)));
  assert_eq!(StatusKey::parse("default"), Some(StatusKey::Default));
  assert_eq!(StatusKey::parse("DEFAULT"), Some(StatusKey::Default));
}

#[test]
fn test_rejects_garbage() {
  for key in ["", "20", "2000", "600", "abc", "2x0"] {
    assert_eq!(StatusKey::parse(key), None, "{key}");
  }
}

#[test]
fn test_success_classification() {
  assert!(StatusKey::Code(200).is_success());
  assert!(StatusKey::Code(204).is_success());
  assert!(StatusKey::Range(2).is_success());
  assert!(!StatusKey::Code(404).is_success());
  assert!(!StatusKey::Code(302).is_success());
  assert!(!StatusKey::Default.is_success());
}

#[test]
fn test_display_round_trips_key_text() {
  assert_eq!(StatusKey::Code(404).to_string(), "404");
  assert_eq!(StatusKey::Range(4).to_string(), "4XX");
  assert_eq!(StatusKey::Default.to_string(), "default");
}
