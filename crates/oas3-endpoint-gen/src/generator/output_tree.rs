use std::path::{Path, PathBuf};

use anyhow::Context;
use futures::future::try_join_all;
use indexmap::IndexMap;

/// Generated files keyed by `/`-separated path relative to the output root,
/// in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTree {
  files: IndexMap<String, String>,
}

impl OutputTree {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds or replaces a file. Replacing keeps the original position.
  pub fn insert(&mut self, path: impl Into<String>, content: impl Into<String>) {
    self.files.insert(path.into(), content.into());
  }

  #[must_use]
  pub fn get(&self, path: &str) -> Option<&str> {
    self.files.get(path).map(String::as_str)
  }

  #[must_use]
  pub fn contains(&self, path: &str) -> bool {
    self.files.contains_key(path)
  }

  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.files.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.files.iter().map(|(path, content)| (path.as_str(), content.as_str()))
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.files.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.files.is_empty()
  }

  /// Replaces `dir` with exactly this tree. Every parent directory is created
  /// before any file is written; writes then run concurrently.
  pub async fn materialize(&self, dir: &Path) -> anyhow::Result<()> {
    if tokio::fs::try_exists(dir).await? {
      tokio::fs::remove_dir_all(dir)
        .await
        .with_context(|| format!("failed to clean output directory {}", dir.display()))?;
    }
    tokio::fs::create_dir_all(dir).await?;

    let mut parents = self
      .files
      .keys()
      .filter_map(|path| Path::new(path).parent().map(Path::to_path_buf))
      .filter(|parent| !parent.as_os_str().is_empty())
      .collect::<Vec<_>>();
    parents.sort();
    parents.dedup();
    for parent in parents {
      tokio::fs::create_dir_all(dir.join(parent)).await?;
    }

    try_join_all(self.files.iter().map(|(path, content)| write_file(dir.join(path), content))).await?;
    Ok(())
  }

  /// Reads every file below `dir` back into a tree, sorted by path.
  pub async fn load(dir: &Path) -> anyhow::Result<Self> {
    let mut found = vec![];
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
      let mut entries = tokio::fs::read_dir(&current)
        .await
        .with_context(|| format!("failed to read {}", current.display()))?;
      while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_dir() {
          pending.push(path);
        } else {
          found.push(path);
        }
      }
    }
    found.sort();

    let mut tree = Self::new();
    for path in found {
      let content = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
      tree.insert(relative_key(dir, &path)?, content);
    }
    Ok(tree)
  }

  /// Writes back only the files whose content differs from `previous`.
  pub async fn persist(&self, dir: &Path, previous: &Self) -> anyhow::Result<usize> {
    let changed = self
      .files
      .iter()
      .filter(|(path, content)| previous.get(path) != Some(content.as_str()))
      .collect::<Vec<_>>();
    let count = changed.len();
    try_join_all(changed.into_iter().map(|(path, content)| write_file(dir.join(path), content))).await?;
    Ok(count)
  }
}

async fn write_file(path: PathBuf, content: &str) -> anyhow::Result<()> {
  tokio::fs::write(&path, content)
    .await
    .with_context(|| format!("failed to write {}", path.display()))
}

fn relative_key(root: &Path, path: &Path) -> anyhow::Result<String> {
  let relative = path
    .strip_prefix(root)
    .with_context(|| format!("{} is outside {}", path.display(), root.display()))?;
  Ok(
    relative
      .components()
      .map(|c| c.as_os_str().to_string_lossy().into_owned())
      .collect::<Vec<_>>()
      .join("/"),
  )
}
