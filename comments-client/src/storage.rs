use std::collections::HashMap;

use anyhow::{anyhow, Context};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::{Comment, CommentId, LoginForm},
    Error,
};

const KEY_LOGGED_IN: &str = "isLoggedIn";
const KEY_LOCAL_COMMENTS: &str = "comments";
const KEY_DELETED_IDS: &str = "deletedCommentIds";
const KEY_NEXT_LOCAL_ID: &str = "nextLocalCommentId";
const KEY_SCHEMA_VERSION: &str = "schemaVersion";

/// Stores written before `schemaVersion` existed have the same layout as
/// version 1
pub const SCHEMA_VERSION: u32 = 1;

/// String-valued key-value storage, like a browser's `localStorage`
pub trait KeyValueStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()>;
    fn remove(&mut self, key: &str) -> anyhow::Result<()>;
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MemoryStore(HashMap<String, String>);

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore(HashMap::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> anyhow::Result<()> {
        self.0.insert(String::from(key), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> anyhow::Result<()> {
        self.0.remove(key);
        Ok(())
    }
}

/// Typed view over the keys the dashboard keeps in a `KeyValueStore`
#[derive(Debug)]
pub struct PersistedState<S> {
    store: S,
}

impl<S: KeyValueStore> PersistedState<S> {
    pub fn open(store: S) -> Result<PersistedState<S>, Error> {
        let mut this = PersistedState { store };
        match this.read::<u32>(KEY_SCHEMA_VERSION)? {
            None => this.write(KEY_SCHEMA_VERSION, &SCHEMA_VERSION)?,
            Some(v) if v > SCHEMA_VERSION => return Err(Error::UnsupportedSchema(v)),
            Some(_) => (),
        }
        Ok(this)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        let raw = self
            .store
            .get(key)
            .with_context(|| format!("reading {key:?}"))
            .map_err(Error::Storage)?;
        match raw {
            None => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("parsing {key:?}"))
                .map(Some)
                .map_err(Error::Storage),
        }
    }

    fn write<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), Error> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("serializing {key:?}"))
            .map_err(Error::Storage)?;
        self.store
            .set(key, raw)
            .with_context(|| format!("writing {key:?}"))
            .map_err(Error::Storage)
    }

    fn remove(&mut self, key: &str) -> Result<(), Error> {
        self.store
            .remove(key)
            .with_context(|| format!("removing {key:?}"))
            .map_err(Error::Storage)
    }

    pub fn is_logged_in(&self) -> Result<bool, Error> {
        let raw = self
            .store
            .get(KEY_LOGGED_IN)
            .context("reading login flag")
            .map_err(Error::Storage)?;
        Ok(raw.as_deref() == Some("true"))
    }

    pub fn log_in(&mut self, form: &LoginForm) -> Result<(), Error> {
        form.validate()?;
        self.write(KEY_LOGGED_IN, &true)?;
        tracing::info!(user = %form.username, "logged in");
        Ok(())
    }

    /// Locally created comments and deletion markers are kept
    pub fn log_out(&mut self) -> Result<(), Error> {
        self.remove(KEY_LOGGED_IN)?;
        tracing::info!("logged out");
        Ok(())
    }

    pub fn local_comments(&self) -> Result<Vec<Comment>, Error> {
        Ok(self.read(KEY_LOCAL_COMMENTS)?.unwrap_or_default())
    }

    pub fn push_local_comment(&mut self, comment: Comment) -> Result<(), Error> {
        let mut comments = self.local_comments()?;
        comments.push(comment);
        self.write(KEY_LOCAL_COMMENTS, &comments)
    }

    /// Returns whether a comment was removed
    pub fn remove_local_comment(&mut self, id: CommentId) -> Result<bool, Error> {
        let mut comments = self.local_comments()?;
        let len_before = comments.len();
        comments.retain(|c| c.id != id);
        self.write(KEY_LOCAL_COMMENTS, &comments)?;
        Ok(comments.len() != len_before)
    }

    /// In deletion order
    pub fn deleted_ids(&self) -> Result<Vec<CommentId>, Error> {
        Ok(self.read(KEY_DELETED_IDS)?.unwrap_or_default())
    }

    /// Returns false if `id` was already marked deleted
    pub fn add_deleted_id(&mut self, id: CommentId) -> Result<bool, Error> {
        let mut ids = self.deleted_ids()?;
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        self.write(KEY_DELETED_IDS, &ids)?;
        Ok(true)
    }

    /// Pick the id of a new local comment, given the number of comments the
    /// remote currently has
    ///
    /// Ids start right after the remote ones and never repeat: the counter
    /// only goes up, and ids already used locally or marked deleted are
    /// skipped.
    pub fn allocate_local_id(&mut self, remote_count: usize) -> Result<CommentId, Error> {
        let counter: u64 = self.read(KEY_NEXT_LOCAL_ID)?.unwrap_or(0);
        let exhausted = || Error::Storage(anyhow!("no local comment id left"));
        let max_local = self.local_comments()?.iter().map(|c| c.id.0).max();
        let after_locals = match max_local {
            None => 0,
            Some(max) => max.checked_add(1).ok_or_else(exhausted)?,
        };
        let after_remote = u64::try_from(remote_count)
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or_else(exhausted)?;
        let deleted = self.deleted_ids()?;
        let mut id = counter.max(after_remote).max(after_locals);
        while deleted.contains(&CommentId(id)) {
            id = id.checked_add(1).ok_or_else(exhausted)?;
        }
        let next = id.checked_add(1).ok_or_else(exhausted)?;
        self.write(KEY_NEXT_LOCAL_ID, &next)?;
        Ok(CommentId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::comment;

    fn open_empty() -> PersistedState<MemoryStore> {
        PersistedState::open(MemoryStore::new()).unwrap()
    }

    #[test]
    fn open_stamps_schema_version() {
        let state = open_empty();
        assert_eq!(
            state.store().get(KEY_SCHEMA_VERSION).unwrap().as_deref(),
            Some("1")
        );
    }

    #[test]
    fn open_refuses_newer_schema() {
        let mut store = MemoryStore::new();
        store.set(KEY_SCHEMA_VERSION, String::from("2")).unwrap();
        assert!(matches!(
            PersistedState::open(store),
            Err(Error::UnsupportedSchema(2))
        ));
    }

    #[test]
    fn reads_unversioned_stores() {
        let mut store = MemoryStore::new();
        store.set(KEY_LOGGED_IN, String::from("true")).unwrap();
        store
            .set(
                KEY_LOCAL_COMMENTS,
                String::from(
                    r#"[{"id":501,"postId":1,"name":"n","email":"e@x.io","body":"hello"}]"#,
                ),
            )
            .unwrap();
        store.set(KEY_DELETED_IDS, String::from("[3,1]")).unwrap();

        let state = PersistedState::open(store).unwrap();
        assert!(state.is_logged_in().unwrap());
        assert_eq!(state.local_comments().unwrap().len(), 1);
        assert_eq!(
            state.deleted_ids().unwrap(),
            vec![CommentId(3), CommentId(1)]
        );
    }

    #[test]
    fn malformed_values_are_errors() {
        let mut store = MemoryStore::new();
        store.set(KEY_DELETED_IDS, String::from("[1,")).unwrap();
        let state = PersistedState::open(store).unwrap();
        assert!(matches!(state.deleted_ids(), Err(Error::Storage(_))));
    }

    #[test]
    fn login_flag() {
        let mut state = open_empty();
        assert!(!state.is_logged_in().unwrap());

        let rejected = state.log_in(&LoginForm::default());
        assert!(rejected.unwrap_err().validation().is_some());
        assert!(!state.is_logged_in().unwrap());

        state
            .log_in(&LoginForm {
                username: String::from("admin"),
                password: String::from("admin"),
            })
            .unwrap();
        assert!(state.is_logged_in().unwrap());
        assert_eq!(
            state.store().get(KEY_LOGGED_IN).unwrap().as_deref(),
            Some("true")
        );

        state.log_out().unwrap();
        assert!(!state.is_logged_in().unwrap());
        assert_eq!(state.store().get(KEY_LOGGED_IN).unwrap(), None);
    }

    #[test]
    fn deleted_ids_are_deduplicated() {
        let mut state = open_empty();
        assert!(state.add_deleted_id(CommentId(2)).unwrap());
        assert!(state.add_deleted_id(CommentId(5)).unwrap());
        assert!(!state.add_deleted_id(CommentId(2)).unwrap());
        assert_eq!(
            state.store().get(KEY_DELETED_IDS).unwrap().as_deref(),
            Some("[2,5]")
        );
    }

    #[test]
    fn local_comments_roundtrip() {
        let mut state = open_empty();
        state.push_local_comment(comment(501, "a")).unwrap();
        state.push_local_comment(comment(502, "b")).unwrap();
        assert!(state.remove_local_comment(CommentId(501)).unwrap());
        assert!(!state.remove_local_comment(CommentId(501)).unwrap());
        assert_eq!(state.local_comments().unwrap(), vec![comment(502, "b")]);
    }

    #[test]
    fn local_ids_follow_remote_count() {
        let mut state = open_empty();
        assert_eq!(state.allocate_local_id(500).unwrap(), CommentId(501));
    }

    #[test]
    fn local_ids_never_collide() {
        let mut state = open_empty();
        let first = state.allocate_local_id(500).unwrap();
        let second = state.allocate_local_id(500).unwrap();
        assert_eq!(first, CommentId(501));
        assert_eq!(second, CommentId(502));

        // The remote shrinking does not bring old ids back
        assert_eq!(state.allocate_local_id(3).unwrap(), CommentId(503));

        // The remote growing past the counter moves ids along
        assert_eq!(state.allocate_local_id(600).unwrap(), CommentId(601));
    }

    #[test]
    fn local_ids_skip_existing_and_deleted() {
        // As left behind by a store without the id counter
        let mut state = open_empty();
        state.push_local_comment(comment(501, "a")).unwrap();
        state.add_deleted_id(CommentId(502)).unwrap();
        assert_eq!(state.allocate_local_id(500).unwrap(), CommentId(503));
    }

    #[test]
    fn exhausted_local_ids_are_an_error() {
        let mut state = open_empty();
        state.push_local_comment(comment(u64::MAX, "last")).unwrap();
        assert!(matches!(state.allocate_local_id(3), Err(Error::Storage(_))));

        let mut state = open_empty();
        state.push_local_comment(comment(u64::MAX - 2, "a")).unwrap();
        state.add_deleted_id(CommentId(u64::MAX - 1)).unwrap();
        assert!(matches!(state.allocate_local_id(3), Err(Error::Storage(_))));
        assert_eq!(state.store().get(KEY_NEXT_LOCAL_ID).unwrap(), None);
    }
}
