use anyhow::anyhow;
use comments_client::KeyValueStore;
use gloo_storage::{LocalStorage, Storage};

/// The browser's `localStorage`, values kept as-is
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| anyhow!("localStorage.getItem failed: {e:?}"))
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        LocalStorage::raw()
            .set_item(key, &value)
            .map_err(|e| anyhow!("localStorage.setItem failed: {e:?}"))
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        LocalStorage::raw()
            .remove_item(key)
            .map_err(|e| anyhow!("localStorage.removeItem failed: {e:?}"))
    }
}
