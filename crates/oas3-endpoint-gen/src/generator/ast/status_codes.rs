use std::fmt::{Display, Formatter};

/// Key of an entry in an operation's `responses` map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusKey {
  Code(u16),
  /// `1XX` .. `5XX`, holding the leading digit.
  Range(u8),
  Default,
}

impl StatusKey {
  /// Parses `200`, `4XX` or `default`. Anything else is not a status key.
  #[must_use]
  pub fn parse(key: &str) -> Option<Self> {
    let key = key.trim();
    if key.eq_ignore_ascii_case("default") {
      return Some(Self::Default);
    }

    let bytes = key.as_bytes();
    if bytes.len() != 3 || !(b'1'..=b'5').contains(&bytes[0]) {
      return None;
    }

    if bytes[1..].eq_ignore_ascii_case(b"xx") {
      return Some(Self::Range(bytes[0] - b'0'));
    }

    key.parse::<u16>().ok().map(Self::Code)
  }

  #[must_use]
  pub const fn code(self) -> Option<u16> {
    match self {
      Self::Code(code) => Some(code),
      Self::Range(_) | Self::Default => None,
    }
  }

  #[must_use]
  pub const fn is_default(self) -> bool {
    matches!(self, Self::Default)
  }

  /// True for explicit `2xx` codes and the `2XX` range.
  #[must_use]
  pub const fn is_success(self) -> bool {
    match self {
      Self::Code(code) => code >= 200 && code < 300,
      Self::Range(class) => class == 2,
      Self::Default => false,
    }
  }
}

impl Display for StatusKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Code(code) => write!(f, "{code}"),
      Self::Range(class) => write!(f, "{class}XX"),
      Self::Default => f.write_str("default"),
    }
  }
}
