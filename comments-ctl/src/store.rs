use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use comments_client::KeyValueStore;

/// `KeyValueStore` kept as a JSON object in a file, rewritten on every change
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// A missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<FileStore> {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(data) => serde_json::from_slice(&data)
                .with_context(|| format!("parsing state file {path:?}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("reading state file {path:?}"));
            }
        };
        Ok(FileStore { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> anyhow::Result<()> {
        let data = serde_json::to_vec_pretty(&self.values).context("serializing state")?;
        std::fs::write(&self.path, data)
            .with_context(|| format!("writing state file {:?}", self.path))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.values.insert(String::from(key), value);
        self.save()
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        if self.values.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.get("comments").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set("isLoggedIn", String::from("true")).unwrap();
        store.set("deletedCommentIds", String::from("[2]")).unwrap();
        store.remove("isLoggedIn").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("isLoggedIn").unwrap(), None);
        assert_eq!(
            store.get("deletedCommentIds").unwrap().as_deref(),
            Some("[2]")
        );
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not json").unwrap();
        assert!(FileStore::open(file.path()).is_err());
    }
}
