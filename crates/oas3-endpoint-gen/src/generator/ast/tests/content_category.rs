use crate::generator::ast::ContentCategory;

#[test]
fn test_vendor_json_suffix() {
  assert_eq!(
    ContentCategory::from_content_type("application/vnd.api+json"),
    ContentCategory::Json
  );
  assert_eq!(
    ContentCategory::from_content_type("application/problem+json"),
    ContentCategory::Json
  );
}

#[test]
fn test_standard_types() {
  assert_eq!(
    ContentCategory::from_content_type("application/x-www-form-urlencoded"),
    ContentCategory::FormUrlEncoded
  );
  assert_eq!(
    ContentCategory::from_content_type("multipart/form-data; boundary=abc"),
    ContentCategory::Multipart
  );
  assert_eq!(ContentCategory::from_content_type("text/plain"), ContentCategory::Text);
  assert_eq!(ContentCategory::from_content_type("text/xml"), ContentCategory::Xml);
  assert_eq!(ContentCategory::from_content_type("image/png"), ContentCategory::Binary);
  assert_eq!(
    ContentCategory::from_content_type("application/octet-stream"),
    ContentCategory::ByteStream
  );
}

#[test]
fn test_unparseable_defaults_to_json() {
  assert_eq!(ContentCategory::from_content_type("not a media type"), ContentCategory::Json);
  assert_eq!(ContentCategory::from_content_type(""), ContentCategory::Json);
}

#[test]
fn test_request_tokens() {
  let cases = [
    (ContentCategory::FormUrlEncoded, Some("application/x-www-form-urlencoded")),
    (ContentCategory::Multipart, Some("multipart/form-data")),
    (ContentCategory::Text, Some("text/plain")),
    (ContentCategory::Binary, Some("application/octet-stream")),
    (ContentCategory::ByteStream, Some("application/octet-stream")),
    (ContentCategory::Json, None),
  ];
  for (category, expected) in cases {
    assert_eq!(category.request_token(), expected, "request token for {category:?}");
  }
}

#[test]
fn test_response_formats() {
  let cases = [
    (ContentCategory::Text, Some("text")),
    (ContentCategory::Binary, Some("blob")),
    (ContentCategory::Multipart, Some("formData")),
    (ContentCategory::ByteStream, Some("arrayBuffer")),
    (ContentCategory::Json, None),
  ];
  for (category, expected) in cases {
    assert_eq!(category.response_format(), expected, "response format for {category:?}");
  }
}
