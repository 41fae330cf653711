use std::{
  collections::{BTreeSet, HashSet},
  ops::Range,
  path::Path,
  sync::LazyLock,
};

use regex::Regex;

use crate::generator::output_tree::OutputTree;

static DECLARATION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^export\s+(?:declare\s+)?(?:abstract\s+)?(?:interface|type|enum|const|class|function|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)")
    .unwrap()
});

const EMPTY_MODULE: &str = "export {};\n";

/// A top-level declaration in the shared file, with its leading doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
  pub name: String,
  /// Byte range covering the doc comment, the declaration and one trailing
  /// blank line.
  pub span: Range<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
  pub tree: OutputTree,
  /// Rounds run, the final round that removed nothing included.
  pub rounds: usize,
  pub removed: Vec<String>,
}

/// Removes shared declarations nothing else references.
pub struct DeadTypeSweeper {
  shared_path: String,
}

impl DeadTypeSweeper {
  #[must_use]
  pub fn new(shared_path: impl Into<String>) -> Self {
    Self {
      shared_path: shared_path.into(),
    }
  }

  /// One round: every declaration of the shared file that no other file and no
  /// other shared declaration mentions is dropped. Returns the removed names.
  #[must_use]
  pub fn sweep_round(&self, tree: &OutputTree) -> (OutputTree, Vec<String>) {
    let Some(shared) = tree.get(&self.shared_path) else {
      return (tree.clone(), vec![]);
    };

    let external = tree
      .iter()
      .filter(|(path, _)| *path != self.shared_path)
      .flat_map(|(_, content)| identifiers(content))
      .collect::<HashSet<_>>();

    let declarations = declarations(shared);
    let scanned = declarations
      .iter()
      .map(|decl| identifiers(&shared[decl.span.clone()]))
      .collect::<Vec<_>>();

    let dead = declarations
      .iter()
      .enumerate()
      .filter(|(index, decl)| {
        let name = decl.name.as_str();
        !external.contains(name)
          && !scanned
            .iter()
            .enumerate()
            .any(|(other, ids)| other != *index && ids.contains(name))
      })
      .map(|(_, decl)| decl)
      .collect::<Vec<_>>();

    if dead.is_empty() {
      return (tree.clone(), vec![]);
    }

    let mut content = String::with_capacity(shared.len());
    let mut cursor = 0;
    for decl in &dead {
      content.push_str(&shared[cursor..decl.span.start]);
      cursor = decl.span.end;
    }
    content.push_str(&shared[cursor..]);
    if dead.len() == declarations.len() && !content.contains(EMPTY_MODULE) {
      content.push_str(EMPTY_MODULE);
    }

    let mut next = tree.clone();
    next.insert(self.shared_path.clone(), content);
    (next, dead.into_iter().map(|decl| decl.name.clone()).collect())
  }

  /// Repeats rounds until one removes nothing.
  #[must_use]
  pub fn sweep(&self, tree: OutputTree) -> SweepOutcome {
    let mut outcome = SweepOutcome {
      tree,
      ..SweepOutcome::default()
    };
    loop {
      let (next, removed) = self.sweep_round(&outcome.tree);
      outcome.rounds += 1;
      if removed.is_empty() {
        return outcome;
      }
      outcome.tree = next;
      outcome.removed.extend(removed);
    }
  }

  /// Sweeps a materialized directory, writing the shared file back after
  /// every round that removed something.
  pub async fn sweep_dir(&self, dir: &Path) -> anyhow::Result<SweepOutcome> {
    let loaded = OutputTree::load(dir).await?;
    let mut outcome = SweepOutcome {
      tree: loaded,
      ..SweepOutcome::default()
    };
    loop {
      let (next, removed) = self.sweep_round(&outcome.tree);
      outcome.rounds += 1;
      if removed.is_empty() {
        return Ok(outcome);
      }
      next.persist(dir, &outcome.tree).await?;
      outcome.tree = next;
      outcome.removed.extend(removed);
    }
  }
}

/// Top-level `export` declarations, each with the `/** */` block directly above it.
#[must_use]
pub fn declarations(source: &str) -> Vec<Declaration> {
  let mut lines = vec![];
  let mut offset = 0;
  for line in source.split_inclusive('\n') {
    lines.push((offset, line));
    offset += line.len();
  }

  let mut found = vec![];
  let mut doc_start = None;
  let mut i = 0;
  while i < lines.len() {
    let (start, line) = lines[i];

    if line.starts_with("/**") {
      doc_start = Some(start);
      while i < lines.len() && !lines[i].1.contains("*/") {
        i += 1;
      }
      i += 1;
      continue;
    }

    let Some(captures) = DECLARATION_RE.captures(line) else {
      doc_start = None;
      i += 1;
      continue;
    };

    let mut last = i;
    let head = line.trim_end();
    if !head.ends_with(';') {
      let block = head.ends_with(['{', '(']);
      while last + 1 < lines.len() {
        last += 1;
        let next = lines[last].1;
        let closes = if block {
          next.starts_with(['}', ')'])
        } else {
          next.trim_end().ends_with(';')
        };
        if closes {
          break;
        }
      }
    }
    if lines.get(last + 1).is_some_and(|(_, next)| next.trim().is_empty()) {
      last += 1;
    }

    let end = lines[last].0 + lines[last].1.len();
    found.push(Declaration {
      name: captures[1].to_string(),
      span: doc_start.take().unwrap_or(start)..end,
    });
    i = last + 1;
  }
  found
}

/// Identifier tokens outside comments and string literals. Expressions inside
/// template `${...}` placeholders are scanned.
#[must_use]
pub fn identifiers(source: &str) -> BTreeSet<&str> {
  let bytes = source.as_bytes();
  let mut found = BTreeSet::new();
  let mut depth = 0usize;
  let mut placeholders: Vec<usize> = vec![];
  let mut i = 0;

  while i < bytes.len() {
    match bytes[i] {
      b'/' if bytes.get(i + 1) == Some(&b'/') => {
        i = source[i..].find('\n').map_or(bytes.len(), |p| i + p);
      }
      b'/' if bytes.get(i + 1) == Some(&b'*') => {
        i = source[i + 2..].find("*/").map_or(bytes.len(), |p| i + 2 + p + 2);
      }
      quote @ (b'"' | b'\'') => i = skip_quoted(bytes, i + 1, quote),
      b'`' => {
        let (next, opened) = skip_template(bytes, i + 1);
        i = next;
        if opened {
          placeholders.push(depth);
        }
      }
      b'{' => {
        depth += 1;
        i += 1;
      }
      b'}' if placeholders.last() == Some(&depth) => {
        placeholders.pop();
        let (next, opened) = skip_template(bytes, i + 1);
        i = next;
        if opened {
          placeholders.push(depth);
        }
      }
      b'}' => {
        depth = depth.saturating_sub(1);
        i += 1;
      }
      c if c.is_ascii_alphabetic() || c == b'_' || c == b'$' => {
        let start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$') {
          i += 1;
        }
        found.insert(&source[start..i]);
      }
      c if c.is_ascii_digit() => {
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'.') {
          i += 1;
        }
      }
      _ => i += 1,
    }
  }
  found
}

fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
  while i < bytes.len() {
    match bytes[i] {
      b'\\' => i += 2,
      b'\n' => return i + 1,
      c if c == quote => return i + 1,
      _ => i += 1,
    }
  }
  bytes.len()
}

/// Skips template text. Returns the resume position and whether a `${`
/// placeholder was entered rather than the literal closed.
fn skip_template(bytes: &[u8], mut i: usize) -> (usize, bool) {
  while i < bytes.len() {
    match bytes[i] {
      b'\\' => i += 2,
      b'`' => return (i + 1, false),
      b'$' if bytes.get(i + 1) == Some(&b'{') => return (i + 2, true),
      _ => i += 1,
    }
  }
  (bytes.len(), false)
}
