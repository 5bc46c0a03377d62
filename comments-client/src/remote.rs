use async_trait::async_trait;

use crate::{
    api::{Comment, CommentId, NewComment},
    Error,
};

/// The REST backend comments come from
///
/// Futures are not `Send`, so that browser implementations can exist.
#[async_trait(?Send)]
pub trait Remote {
    /// `GET /comments`
    async fn fetch_comments(&self) -> anyhow::Result<Vec<Comment>>;

    /// `POST /comments`, answers with the created-looking record
    async fn create_comment(&self, comment: &NewComment) -> anyhow::Result<Comment>;

    /// `DELETE /comments/{id}`
    async fn delete_comment(&self, id: CommentId) -> anyhow::Result<()>;
}

/// What the remote said while creating a comment
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Submission {
    /// Remote comments as fetched right before the creation
    pub snapshot: Vec<Comment>,

    /// The remote's echo of the new comment
    pub created: Comment,
}

pub async fn fetch_snapshot<R: Remote + ?Sized>(remote: &R) -> Result<Vec<Comment>, Error> {
    let comments = remote.fetch_comments().await.map_err(Error::Remote)?;
    tracing::debug!(count = comments.len(), "fetched remote comments");
    Ok(comments)
}

/// Validate `form`, then fetch the remote comments and submit the new one
///
/// Nothing is sent if the form is invalid.
pub async fn submit_comment<R: Remote + ?Sized>(
    remote: &R,
    form: &NewComment,
) -> Result<Submission, Error> {
    form.validate()?;
    let snapshot = fetch_snapshot(remote).await?;
    let created = remote.create_comment(form).await.map_err(Error::Remote)?;
    tracing::debug!(remote_id = %created.id, "remote accepted new comment");
    Ok(Submission { snapshot, created })
}

/// Tell the remote about a deletion that already happened locally
///
/// Failures are only logged: the local deletion stands either way. Returns
/// whether the remote acknowledged.
pub async fn notify_deletion<R: Remote + ?Sized>(remote: &R, id: CommentId) -> bool {
    match remote.delete_comment(id).await {
        Ok(()) => {
            tracing::debug!(%id, "remote acknowledged deletion");
            true
        }
        Err(e) => {
            tracing::warn!(%id, "failed to notify remote of deletion: {:?}", e);
            false
        }
    }
}
