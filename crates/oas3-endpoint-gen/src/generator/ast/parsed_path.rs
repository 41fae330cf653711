use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PathParseError {
  #[strum(to_string = "unclosed '{{' at position {position} in segment '{segment}'")]
  UnclosedBrace { segment: String, position: usize },
  #[strum(to_string = "empty parameter '{{}}' in segment '{segment}'")]
  EmptyParameter { segment: String },
  #[strum(to_string = "unmatched '}}' at position {position} in segment '{segment}'")]
  UnmatchedClosingBrace { segment: String, position: usize },
  #[strum(to_string = "nested '{{' at position {position} in segment '{segment}'")]
  NestedBraces { segment: String, position: usize },
}

impl std::error::Error for PathParseError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
  Literal(String),
  Param(String),
  Mixed { format: String, params: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentPart<'a> {
  Literal(&'a str),
  Param(&'a str),
}

impl PathSegment {
  #[cfg(test)]
  pub fn is_mixed(&self) -> bool {
    matches!(self, Self::Mixed { .. })
  }

  pub fn parse(segment: &str) -> Result<Self, PathParseError> {
    let parts = Self::tokenize(segment)?;

    match parts.as_slice() {
      [] => Ok(Self::Literal(String::new())),
      [SegmentPart::Literal(lit)] => Ok(Self::Literal((*lit).to_string())),
      [SegmentPart::Param(name)] => Ok(Self::Param((*name).to_string())),
      _ => Ok(Self::build_mixed(segment, &parts)),
    }
  }

  fn params(&self) -> &[String] {
    match self {
      Self::Literal(_) => &[],
      Self::Param(name) => std::slice::from_ref(name),
      Self::Mixed { params, .. } => params,
    }
  }

  /// Segment with every placeholder replaced by `render(name)`; literal text
  /// goes through `escape`.
  fn render<E, R>(&self, escape: E, render: R) -> String
  where
    E: Fn(&str) -> String,
    R: Fn(&str) -> String,
  {
    match self {
      Self::Literal(lit) => escape(lit),
      Self::Param(name) => render(name),
      Self::Mixed { format, params } => {
        let mut out = String::new();
        let mut params = params.iter();
        let mut pieces = format.split("{}").peekable();
        while let Some(piece) = pieces.next() {
          out.push_str(&escape(piece));
          if pieces.peek().is_some()
            && let Some(param) = params.next()
          {
            out.push_str(&render(param));
          }
        }
        out
      }
    }
  }

  fn tokenize(segment: &str) -> Result<Vec<SegmentPart<'_>>, PathParseError> {
    let mut parts = vec![];
    let mut rest = segment;
    let mut offset = 0;

    while !rest.is_empty() {
      let Some(open_pos) = rest.find('{') else {
        if let Some(stray_close) = rest.find('}') {
          return Err(PathParseError::UnmatchedClosingBrace {
            segment: segment.to_string(),
            position: offset + stray_close,
          });
        }
        parts.push(SegmentPart::Literal(rest));
        break;
      };

      if let Some(stray_close) = rest[..open_pos].find('}') {
        return Err(PathParseError::UnmatchedClosingBrace {
          segment: segment.to_string(),
          position: offset + stray_close,
        });
      }

      if open_pos > 0 {
        parts.push(SegmentPart::Literal(&rest[..open_pos]));
      }

      let after_open = &rest[open_pos + 1..];
      let Some(close_pos) = after_open.find('}') else {
        return Err(PathParseError::UnclosedBrace {
          segment: segment.to_string(),
          position: offset + open_pos,
        });
      };

      if let Some(nested) = after_open[..close_pos].find('{') {
        return Err(PathParseError::NestedBraces {
          segment: segment.to_string(),
          position: offset + open_pos + 1 + nested,
        });
      }

      let param_name = &after_open[..close_pos];
      if param_name.is_empty() {
        return Err(PathParseError::EmptyParameter {
          segment: segment.to_string(),
        });
      }

      parts.push(SegmentPart::Param(param_name));

      let consumed = open_pos + 1 + close_pos + 1;
      offset += consumed;
      rest = &rest[consumed..];
    }

    Ok(parts)
  }

  fn build_mixed(segment: &str, parts: &[SegmentPart<'_>]) -> Self {
    let mut format_str = String::new();
    let mut params = vec![];

    for part in parts {
      match part {
        SegmentPart::Literal(lit) => format_str.push_str(lit),
        SegmentPart::Param(name) => {
          format_str.push_str("{}");
          params.push((*name).to_string());
        }
      }
    }

    if params.is_empty() {
      return Self::Literal(segment.to_string());
    }

    Self::Mixed {
      format: format_str,
      params,
    }
  }
}

/// A request path template split into segments. The interpolated request path
/// and the path declaration are both rendered from this one value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedPath {
  pub segments: Vec<PathSegment>,
  leading_slash: bool,
  trailing_slash: bool,
}

impl ParsedPath {
  pub fn parse(path: &str) -> Result<Self, PathParseError> {
    let segments = path
      .split('/')
      .filter(|s| !s.is_empty())
      .map(PathSegment::parse)
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      trailing_slash: path.len() > 1 && path.ends_with('/') && !segments.is_empty(),
      leading_slash: path.starts_with('/') || segments.is_empty(),
      segments,
    })
  }

  /// Placeholder names in template order.
  pub fn param_names(&self) -> impl Iterator<Item = &str> {
    self.segments.iter().flat_map(PathSegment::params).map(String::as_str)
  }

  /// Renders a TypeScript template literal, substituting each placeholder with
  /// `${expr}` where `expr` comes from `binding`.
  ///
  /// ```text
  /// /pets/{petId}/photos  =>  `/pets/${petId}/photos`
  /// ```
  pub fn to_template_literal<F>(&self, binding: F) -> String
  where
    F: Fn(&str) -> String,
  {
    let body = self.join(|segment| segment.render(escape_template_text, |name| format!("${{{}}}", binding(name))));
    format!("`{body}`")
  }

  /// Segments with placeholder braces stripped: `/pets/{id}` becomes `["pets", "id"]`.
  #[must_use]
  pub fn declaration(&self) -> Vec<String> {
    self
      .segments
      .iter()
      .map(|segment| segment.render(str::to_string, str::to_string))
      .collect()
  }

  fn join<F>(&self, render: F) -> String
  where
    F: Fn(&PathSegment) -> String,
  {
    let mut out = String::new();
    if self.leading_slash {
      out.push('/');
    }
    out.push_str(&self.segments.iter().map(render).collect::<Vec<_>>().join("/"));
    if self.trailing_slash {
      out.push('/');
    }
    out
  }

  pub fn extract_template_params(path: &str) -> impl Iterator<Item = &str> {
    TemplateParamIter::new(path)
  }
}

fn escape_template_text(text: &str) -> String {
  text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}

struct TemplateParamIter<'a> {
  rest: &'a str,
}

impl<'a> TemplateParamIter<'a> {
  fn new(path: &'a str) -> Self {
    Self { rest: path }
  }
}

impl<'a> Iterator for TemplateParamIter<'a> {
  type Item = &'a str;

  fn next(&mut self) -> Option<Self::Item> {
    let open_pos = self.rest.find('{')?;
    let after_open = &self.rest[open_pos + 1..];
    let close_pos = after_open.find('}')?;
    let param = &after_open[..close_pos];
    self.rest = &after_open[close_pos + 1..];

    if param.is_empty() { self.next() } else { Some(param) }
  }
}
