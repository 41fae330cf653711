#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  #[must_use]
  pub fn from_raw(input: &str) -> Self {
    Self {
      lines: input.replace("\\n", "\n").trim().lines().map(|l| l.trim_end().to_string()).collect(),
    }
  }

  #[must_use]
  pub fn from_optional(desc: Option<&String>) -> Self {
    desc.map_or_else(Self::default, |d| Self::from_raw(d))
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn push(&mut self, line: impl Into<String>) {
    self.lines.push(line.into());
  }

  pub fn extend(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
    self.lines.extend(lines.into_iter().map(Into::into));
  }

  /// Renders a JSDoc block at the given indentation, or nothing when empty.
  #[must_use]
  pub fn to_jsdoc(&self, indent: &str) -> String {
    if self.lines.is_empty() {
      return String::new();
    }

    let mut out = format!("{indent}/**\n");
    for line in &self.lines {
      let line = line.replace("*/", "*\\/");
      if line.is_empty() {
        out.push_str(&format!("{indent} *\n"));
      } else {
        out.push_str(&format!("{indent} * {line}\n"));
      }
    }
    out.push_str(&format!("{indent} */\n"));
    out
  }
}

impl From<&str> for Documentation {
  fn from(s: &str) -> Self {
    Self::from_raw(s)
  }
}

impl From<Option<&String>> for Documentation {
  fn from(s: Option<&String>) -> Self {
    Self::from_optional(s)
  }
}
