use std::{
  char::{ToLowercase, ToUppercase},
  collections::{BTreeSet, HashSet},
  iter::Peekable,
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

pub(crate) static RESERVED_WORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "enum",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    // strict mode
    "implements",
    "interface",
    "let",
    "package",
    "private",
    "protected",
    "public",
    "static",
    "yield",
    "await",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_$]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Transliterates to ASCII, replaces characters that cannot appear in an
/// identifier with underscores, collapses runs of underscores and trims them
/// from both ends.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Returns true when `name` can be used verbatim as a TypeScript binding.
pub(crate) fn is_valid_identifier(name: &str) -> bool {
  IDENTIFIER_RE.is_match(name) && !RESERVED_WORDS.contains(name)
}

/// Wraps a property key in double quotes unless it is a plain identifier.
///
/// Reserved words are fine as property keys, so only the lexical shape is
/// checked here.
pub(crate) fn quote_if_needed(name: &str) -> String {
  if IDENTIFIER_RE.is_match(name) {
    name.to_string()
  } else {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
  }
}

/// Ensures a name is unique within a set of used names, appending a numeric suffix if needed.
pub(crate) fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  ensure_unique_with(base_name, |candidate| used_names.contains(candidate))
}

pub(crate) fn ensure_unique_with<F>(base_name: &str, is_taken: F) -> String
where
  F: Fn(&str) -> bool,
{
  if !is_taken(base_name) {
    return base_name.to_string();
  }
  let mut i = 2;
  loop {
    let new_name = format!("{base_name}{i}");
    if !is_taken(&new_name) {
      return new_name;
    }
    i += 1;
  }
}

/// Converts a string into a `camelCase` binding name.
///
/// # Rules:
/// 1. Sanitizes the base string and converts to `camelCase`.
/// 2. If the result starts with a digit, it's prefixed with `_`.
/// 3. If the result is a reserved word, it gets a trailing `_`.
/// 4. If the result is empty, it becomes `_`.
pub(crate) fn to_camel_case(name: &str) -> String {
  let mut ident = sanitize(name).to_camel_case();

  if ident.is_empty() {
    return "_".to_string();
  }

  prefix_if_digit_start(&mut ident, "_");

  if RESERVED_WORDS.contains(ident.as_str()) {
    ident.push('_');
  }

  ident
}

/// Converts a string into a `kebab-case` file stem.
pub(crate) fn to_kebab_case(name: &str) -> String {
  let kebab = sanitize(name).to_kebab_case();
  if kebab.is_empty() { "unnamed".to_string() } else { kebab }
}

/// Uppercases the first character and leaves the rest untouched.
pub(crate) fn upper_first(name: &str) -> String {
  let mut chars = name.chars();
  match chars.next() {
    None => String::new(),
    Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
  }
}

/// Converts a string into a TypeScript type name (`PascalCase`).
///
/// # Rules:
/// 1. If the input already has mixed case (both upper and lowercase, no separators), preserve capitalization.
/// 2. Otherwise, converts to `PascalCase` treating separators and case changes as word boundaries.
/// 3. If the result starts with a digit, it's prefixed with `T`.
/// 4. If the result is empty, it becomes `Unnamed`.
pub(crate) fn to_type_name(name: &str) -> String {
  let has_separators = name.contains(['-', '_', '.', ' ', '/', '{', '}']);
  let has_upper = name.chars().any(|c| c.is_ascii_uppercase());
  let has_lower = name.chars().any(|c| c.is_ascii_lowercase());
  let appears_mixed_case = !has_separators && has_upper && has_lower;

  let ascii = any_ascii(name);
  let mut ident = if appears_mixed_case {
    let cleaned: String = ascii.chars().filter(char::is_ascii_alphanumeric).collect();
    upper_first(&cleaned)
  } else {
    ascii
      .chars()
      .capitalize_words_with_boundaries()
      .filter(char::is_ascii_alphanumeric)
      .collect()
  };

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  prefix_if_digit_start(&mut ident, "T");
  ident
}

/// Converts an enum value into a member name for a TypeScript `enum`.
pub(crate) fn to_enum_member_name(value: &str) -> String {
  let ident = to_type_name(value);
  if ident == "Unnamed" && !value.is_empty() {
    return "Value".to_string();
  }
  if let Some(rest) = ident.strip_prefix('T')
    && rest.starts_with(|c: char| c.is_ascii_digit())
  {
    return format!("Value{rest}");
  }
  ident
}

fn prefix_if_digit_start(ident: &mut String, prefix: &str) {
  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert_str(0, prefix);
  }
}

/// Casing helpers handed to user-provided naming callbacks, so derived names
/// go through the same conversions as every other generated identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseUtils;

impl CaseUtils {
  #[must_use]
  pub fn camel(self, input: &str) -> String {
    to_camel_case(input)
  }

  #[must_use]
  pub fn pascal(self, input: &str) -> String {
    to_type_name(input)
  }

  #[must_use]
  pub fn kebab(self, input: &str) -> String {
    to_kebab_case(input)
  }

  #[must_use]
  pub fn upper_first(self, input: &str) -> String {
    upper_first(input)
  }
}

/// An extension trait for char iterators to add word capitalization.
pub trait CapitalizeWordsExt: Iterator<Item = char> {
  fn capitalize_words_with_boundaries(self) -> CapitalizeWordsWithBoundaries<Self>
  where
    Self: Sized;
}

impl<I> CapitalizeWordsExt for I
where
  I: Iterator<Item = char>,
{
  fn capitalize_words_with_boundaries(self) -> CapitalizeWordsWithBoundaries<Self>
  where
    Self: Sized,
  {
    CapitalizeWordsWithBoundaries {
      iter: self.peekable(),
      capitalize_next: true,
      prev_was_lower: false,
      pending_upper: None,
      pending_lower: None,
    }
  }
}

pub struct CapitalizeWordsWithBoundaries<I>
where
  I: Iterator<Item = char>,
{
  iter: Peekable<I>,
  capitalize_next: bool,
  prev_was_lower: bool,
  pending_upper: Option<ToUppercase>,
  pending_lower: Option<ToLowercase>,
}

impl<I> Iterator for CapitalizeWordsWithBoundaries<I>
where
  I: Iterator<Item = char>,
{
  type Item = char;

  fn next(&mut self) -> Option<Self::Item> {
    if let Some(ref mut upper_iter) = self.pending_upper {
      if let Some(c) = upper_iter.next() {
        return Some(c);
      }
      self.pending_upper = None;
    }

    if let Some(ref mut lower_iter) = self.pending_lower {
      if let Some(c) = lower_iter.next() {
        return Some(c);
      }
      self.pending_lower = None;
    }

    let c = self.iter.next()?;

    if !c.is_ascii_alphanumeric() {
      self.capitalize_next = self.iter.peek().is_some_and(char::is_ascii_alphanumeric);
      self.prev_was_lower = false;
      return Some(c);
    }

    let is_lower = c.is_ascii_lowercase();
    let is_upper = c.is_ascii_uppercase();

    let should_capitalize = self.capitalize_next
      || (self.prev_was_lower && is_upper)
      || (is_upper && self.iter.peek().is_some_and(char::is_ascii_lowercase));

    self.prev_was_lower = is_lower;
    self.capitalize_next = false;

    if should_capitalize {
      self.pending_upper.insert(c.to_uppercase()).next()
    } else {
      self.pending_lower.insert(c.to_lowercase()).next()
    }
  }
}
