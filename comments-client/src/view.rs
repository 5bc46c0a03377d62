use std::{collections::HashSet, sync::Arc};

use crate::{
    api::{Comment, CommentId},
    Search, Sort,
};

/// Every way the reconciled view can change
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Transition {
    /// A fresh `GET /comments` answer, replacing the previous one
    RemoteSnapshot(Vec<Comment>),

    /// Local records and deletion markers as currently persisted
    LocalReplaced {
        local: Vec<Comment>,
        deleted: Vec<CommentId>,
    },

    LocalCreated(Comment),
    Deleted(CommentId),
    SearchChanged(String),

    /// `None` restores the merged order
    SortChanged(Option<Sort>),
}

/// Reconciles remote comments with local creations and deletions
///
/// The merged view is remote comments followed by local ones, minus anything
/// marked deleted, and stays empty until a first remote snapshot arrived. Ids
/// are not deduplicated across the two sources: if a local comment shares its
/// id with a remote one, both are shown, and deleting that id hides both.
///
/// The filtered view is the merged one restricted to the search and, when a
/// sort is set, reordered by it.
///
/// Published views are never modified: every transition builds new ones.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CommentView {
    remote: Option<Arc<Vec<Comment>>>,
    local: Arc<Vec<Comment>>,
    deleted: Arc<HashSet<CommentId>>,
    search_term: String,
    search: Search,
    sort: Option<Sort>,
    merged: Arc<Vec<Comment>>,
    filtered: Arc<Vec<Comment>>,
}

impl CommentView {
    pub fn new(local: Vec<Comment>, deleted: Vec<CommentId>) -> CommentView {
        let mut this = CommentView::default();
        this.apply(Transition::LocalReplaced { local, deleted });
        this
    }

    pub fn apply(&mut self, t: Transition) {
        tracing::trace!(transition = ?TransitionKind::from(&t), "applying view transition");
        match t {
            Transition::RemoteSnapshot(comments) => {
                self.remote = Some(Arc::new(comments));
            }
            Transition::LocalReplaced { local, deleted } => {
                self.local = Arc::new(local);
                self.deleted = Arc::new(deleted.into_iter().collect());
            }
            Transition::LocalCreated(comment) => {
                Arc::make_mut(&mut self.local).push(comment);
            }
            Transition::Deleted(id) => {
                Arc::make_mut(&mut self.deleted).insert(id);
                if self.local.iter().any(|c| c.id == id) {
                    Arc::make_mut(&mut self.local).retain(|c| c.id != id);
                }
            }
            Transition::SearchChanged(term) => {
                self.search = Search::new(&term);
                self.search_term = term;
                self.refresh_filtered();
                return;
            }
            Transition::SortChanged(sort) => {
                self.sort = sort;
                self.refresh_filtered();
                return;
            }
        }
        self.refresh_merged();
    }

    fn refresh_merged(&mut self) {
        let merged = match &self.remote {
            None => Vec::new(),
            Some(remote) => remote
                .iter()
                .chain(self.local.iter())
                .filter(|c| !self.deleted.contains(&c.id))
                .cloned()
                .collect(),
        };
        self.merged = Arc::new(merged);
        self.refresh_filtered();
    }

    fn refresh_filtered(&mut self) {
        if self.search.is_everything() && self.sort.is_none() {
            self.filtered = self.merged.clone();
            return;
        }
        let mut filtered = self.search.filter(&self.merged);
        if let Some(sort) = &self.sort {
            sort.apply(&mut filtered);
        }
        self.filtered = Arc::new(filtered);
    }

    /// Whether a remote snapshot was ever applied
    pub fn is_loaded(&self) -> bool {
        self.remote.is_some()
    }

    pub fn local(&self) -> &[Comment] {
        &self.local
    }

    pub fn is_deleted(&self, id: CommentId) -> bool {
        self.deleted.contains(&id)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort(&self) -> Option<Sort> {
        self.sort
    }

    pub fn merged(&self) -> &Arc<Vec<Comment>> {
        &self.merged
    }

    /// The merged view restricted to the current search, in sort order
    pub fn filtered(&self) -> &Arc<Vec<Comment>> {
        &self.filtered
    }
}

// Keeps whole snapshots out of the logs
#[derive(Debug)]
#[allow(dead_code)]
enum TransitionKind {
    RemoteSnapshot { len: usize },
    LocalReplaced { local: usize, deleted: usize },
    LocalCreated(CommentId),
    Deleted(CommentId),
    SearchChanged,
    SortChanged(Option<Sort>),
}

impl From<&Transition> for TransitionKind {
    fn from(t: &Transition) -> TransitionKind {
        match t {
            Transition::RemoteSnapshot(c) => TransitionKind::RemoteSnapshot { len: c.len() },
            Transition::LocalReplaced { local, deleted } => TransitionKind::LocalReplaced {
                local: local.len(),
                deleted: deleted.len(),
            },
            Transition::LocalCreated(c) => TransitionKind::LocalCreated(c.id),
            Transition::Deleted(id) => TransitionKind::Deleted(*id),
            Transition::SearchChanged(_) => TransitionKind::SearchChanged,
            Transition::SortChanged(s) => TransitionKind::SortChanged(*s),
        }
    }
}
