use crate::generator::output_tree::OutputTree;

fn sample() -> OutputTree {
  let mut tree = OutputTree::new();
  tree.insert("pets/endpoints/get-pet.ts", "export const getPet = 1;\n");
  tree.insert("pets/index.ts", "export * as pets from \"./endpoints\";\n");
  tree.insert("index.ts", "export * from \"./pets\";\n");
  tree
}

#[test]
fn test_insert_keeps_first_position() {
  let mut tree = sample();
  tree.insert("pets/index.ts", "export {};\n");

  assert_eq!(
    tree.paths().collect::<Vec<_>>(),
    vec!["pets/endpoints/get-pet.ts", "pets/index.ts", "index.ts"]
  );
  assert_eq!(tree.get("pets/index.ts"), Some("export {};\n"));
  assert_eq!(tree.len(), 3);
}

#[tokio::test]
async fn test_materialize_replaces_directory_contents() {
  let dir = tempfile::tempdir().unwrap();
  let out = dir.path().join("api");
  tokio::fs::create_dir_all(out.join("stale")).await.unwrap();
  tokio::fs::write(out.join("stale/old.ts"), "old").await.unwrap();

  sample().materialize(&out).await.unwrap();

  assert!(!out.join("stale").exists());
  assert_eq!(
    tokio::fs::read_to_string(out.join("pets/endpoints/get-pet.ts")).await.unwrap(),
    "export const getPet = 1;\n"
  );
  assert!(out.join("index.ts").exists());
}

#[tokio::test]
async fn test_load_reads_back_sorted() {
  let dir = tempfile::tempdir().unwrap();
  sample().materialize(dir.path()).await.unwrap();

  let loaded = OutputTree::load(dir.path()).await.unwrap();
  assert_eq!(
    loaded.paths().collect::<Vec<_>>(),
    vec!["index.ts", "pets/endpoints/get-pet.ts", "pets/index.ts"]
  );
  for (path, content) in sample().iter() {
    assert_eq!(loaded.get(path), Some(content));
  }
}

#[tokio::test]
async fn test_persist_writes_only_changed_files() {
  let dir = tempfile::tempdir().unwrap();
  let before = sample();
  before.materialize(dir.path()).await.unwrap();

  let mut after = before.clone();
  after.insert("index.ts", "export {};\n");
  let written = after.persist(dir.path(), &before).await.unwrap();

  assert_eq!(written, 1);
  assert_eq!(
    tokio::fs::read_to_string(dir.path().join("index.ts")).await.unwrap(),
    "export {};\n"
  );
}
