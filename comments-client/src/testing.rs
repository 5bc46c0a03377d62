use std::cell::{Cell, RefCell};

use anyhow::anyhow;
use async_trait::async_trait;

use crate::{
    api::{Comment, CommentId, NewComment, PostId},
    Remote,
};

pub fn comment(id: u64, body: &str) -> Comment {
    Comment {
        id: CommentId(id),
        post_id: PostId(id / 5 + 1),
        name: format!("name {id}"),
        email: format!("user{id}@example.org"),
        body: String::from(body),
    }
}

/// Comments with body "comment {id}"
pub fn comments(ids: &[u64]) -> Vec<Comment> {
    ids.iter().map(|i| comment(*i, &format!("comment {i}"))).collect()
}

pub fn ids(view: &[Comment]) -> Vec<u64> {
    view.iter().map(|c| c.id.0).collect()
}

/// Behaves like the public mock API: creations and deletions are answered but
/// not persisted
pub struct FakeRemote {
    comments: Vec<Comment>,
    failing: Cell<bool>,
    calls: Cell<usize>,
    creations: RefCell<Vec<NewComment>>,
    deletions: RefCell<Vec<CommentId>>,
}

impl FakeRemote {
    pub fn new(comments: Vec<Comment>) -> FakeRemote {
        FakeRemote {
            comments,
            failing: Cell::new(false),
            calls: Cell::new(0),
            creations: RefCell::new(Vec::new()),
            deletions: RefCell::new(Vec::new()),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn creations(&self) -> Vec<NewComment> {
        self.creations.borrow().clone()
    }

    pub fn deletions(&self) -> Vec<CommentId> {
        self.deletions.borrow().clone()
    }

    fn call(&self) -> anyhow::Result<()> {
        self.calls.set(self.calls.get() + 1);
        match self.failing.get() {
            true => Err(anyhow!("connection refused")),
            false => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl Remote for FakeRemote {
    async fn fetch_comments(&self) -> anyhow::Result<Vec<Comment>> {
        self.call()?;
        Ok(self.comments.clone())
    }

    async fn create_comment(&self, comment: &NewComment) -> anyhow::Result<Comment> {
        self.call()?;
        self.creations.borrow_mut().push(comment.clone());
        Ok(Comment {
            id: CommentId(self.comments.len() as u64 + 1),
            post_id: PostId::default(),
            name: comment.name.clone(),
            email: comment.email.clone(),
            body: comment.body.clone(),
        })
    }

    async fn delete_comment(&self, id: CommentId) -> anyhow::Result<()> {
        self.call()?;
        self.deletions.borrow_mut().push(id);
        Ok(())
    }
}
