use crate::generator::ast::{ParsedPath, PathParseError, PathSegment};

#[test]
fn test_parse_literal_segment() {
  let segment = PathSegment::parse("pets").unwrap();
  assert!(matches!(segment, PathSegment::Literal(s) if s == "pets"));
}

#[test]
fn test_parse_single_param() {
  let segment = PathSegment::parse("{id}").unwrap();
  assert_eq!(segment, PathSegment::Param("id".to_string()));
}

#[test]
fn test_parse_mixed_segment() {
  let segment = PathSegment::parse("{name}.{ext}").unwrap();
  assert!(segment.is_mixed());
  let PathSegment::Mixed { format, params } = segment else {
    panic!("expected Mixed segment");
  };
  assert_eq!(format, "{}.{}");
  assert_eq!(params, vec!["name".to_string(), "ext".to_string()]);
}

#[test]
fn test_parse_errors() {
  assert!(matches!(
    PathSegment::parse("{id"),
    Err(PathParseError::UnclosedBrace { position: 0, .. })
  ));
  assert!(matches!(
    PathSegment::parse("{}"),
    Err(PathParseError::EmptyParameter { .. })
  ));
  assert!(matches!(
    PathSegment::parse("id}"),
    Err(PathParseError::UnmatchedClosingBrace { position: 2, .. })
  ));
  assert!(matches!(
    PathSegment::parse("{a{b}}"),
    Err(PathParseError::NestedBraces { position: 2, .. })
  ));
}

#[test]
fn test_error_messages() {
  let err = PathSegment::parse("{}").unwrap_err();
  assert_eq!(err.to_string(), "empty parameter '{}' in segment '{}'");
}

#[test]
fn test_template_literal_interpolates_params() {
  let path = ParsedPath::parse("/pets/{petId}/photos").unwrap();
  assert_eq!(path.to_template_literal(|name| name.to_string()), "`/pets/${petId}/photos`");
}

#[test]
fn test_template_literal_uses_binding() {
  let path = ParsedPath::parse("/files/{file-name}.{ext}").unwrap();
  let rendered = path.to_template_literal(|name| match name {
    "file-name" => "fileName".to_string(),
    other => other.to_string(),
  });
  assert_eq!(rendered, "`/files/${fileName}.${ext}`");
}

#[test]
fn test_template_literal_escapes_text() {
  let path = ParsedPath::parse("/a`b/$x").unwrap();
  assert_eq!(path.to_template_literal(str::to_string), "`/a\\`b/$x`");
}

#[test]
fn test_declaration_strips_braces() {
  let path = ParsedPath::parse("/pets/{id}").unwrap();
  assert_eq!(path.declaration(), vec!["pets", "id"]);

  let path = ParsedPath::parse("/files/{name}.json").unwrap();
  assert_eq!(path.declaration(), vec!["files", "name.json"]);
}

#[test]
fn test_declaration_and_template_share_segments() {
  let path = ParsedPath::parse("/api/v1/pets/{id}/").unwrap();
  assert_eq!(path.to_template_literal(str::to_string), "`/api/v1/pets/${id}/`");
  assert_eq!(path.declaration(), vec!["api", "v1", "pets", "id"]);
}

#[test]
fn test_root_path() {
  let path = ParsedPath::parse("/").unwrap();
  assert_eq!(path.to_template_literal(str::to_string), "`/`");
  assert!(path.declaration().is_empty());
}

#[test]
fn test_param_names_in_template_order() {
  let path = ParsedPath::parse("/orgs/{org}/repos/{repo}/{file}.{ext}").unwrap();
  assert_eq!(path.param_names().collect::<Vec<_>>(), vec!["org", "repo", "file", "ext"]);
}

#[test]
fn test_extract_template_params_skips_empty() {
  let params = ParsedPath::extract_template_params("/a/{}/b/{id}").collect::<Vec<_>>();
  assert_eq!(params, vec!["id"]);
}
