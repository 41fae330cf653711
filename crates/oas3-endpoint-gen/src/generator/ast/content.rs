use mediatype::MediaType;

/// Coarse classification of a media type, enough to pick the request content
/// token and the response format an endpoint declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ContentCategory {
  #[default]
  Json,
  FormUrlEncoded,
  Multipart,
  Text,
  Binary,
  ByteStream,
  Xml,
  EventStream,
}

impl ContentCategory {
  #[must_use]
  pub fn from_content_type(content_type: &str) -> Self {
    let Some(media) = MediaType::parse(content_type).ok() else {
      return Self::Json;
    };

    let suffix = media.suffix.as_ref().map(mediatype::Name::as_str);

    match (media.ty.as_str(), media.subty.as_str(), suffix) {
      ("multipart", _, _) => Self::Multipart,
      ("text", "event-stream", _) => Self::EventStream,
      ("text" | "application", "xml", _) | (_, _, Some("xml")) => Self::Xml,
      ("application", "x-www-form-urlencoded", _) => Self::FormUrlEncoded,
      ("application", "json", _) | (_, _, Some("json")) => Self::Json,
      ("application", "octet-stream", _) => Self::ByteStream,
      ("image" | "audio" | "video", _, _) | ("application", "pdf" | "zip", _) => Self::Binary,
      ("application" | "text", _, _) => Self::Text,
      _ => Self::Json,
    }
  }

  #[must_use]
  pub const fn is_json(self) -> bool {
    matches!(self, Self::Json)
  }

  /// Content-type token sent with a request body. JSON is the runtime default
  /// and has no token.
  #[must_use]
  pub const fn request_token(self) -> Option<&'static str> {
    match self {
      Self::FormUrlEncoded => Some("application/x-www-form-urlencoded"),
      Self::Multipart => Some("multipart/form-data"),
      Self::Text => Some("text/plain"),
      Self::Binary | Self::ByteStream => Some("application/octet-stream"),
      Self::Json | Self::Xml | Self::EventStream => None,
    }
  }

  /// Format the runtime uses to decode a response body.
  #[must_use]
  pub const fn response_format(self) -> Option<&'static str> {
    match self {
      Self::Text | Self::Xml | Self::EventStream => Some("text"),
      Self::Binary => Some("blob"),
      Self::Multipart => Some("formData"),
      Self::ByteStream => Some("arrayBuffer"),
      Self::Json | Self::FormUrlEncoded => None,
    }
  }
}
