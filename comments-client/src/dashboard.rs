use std::num::NonZeroUsize;

use crate::{
    api::{Comment, CommentId, NewComment, PostId},
    fetch_snapshot, notify_deletion, paginate, submit_comment, CommentView, Error,
    KeyValueStore, Page, PersistedState, Remote, Sort, Submission, Transition,
};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LoadState {
    NotLoaded,
    Loading,
    Loaded,

    /// The last fetch failed, with this reason. Whatever was loaded before
    /// is still shown.
    Failed(String),
}

/// A logged-in user's view of the comments
///
/// Only exists while the login flag is set: `open` refuses logged-out
/// stores, and `log_out` gives the store back.
#[derive(Debug)]
pub struct Dashboard<S> {
    state: PersistedState<S>,
    view: CommentView,
    load: LoadState,
}

impl<S: KeyValueStore> Dashboard<S> {
    pub fn open(state: PersistedState<S>) -> Result<Dashboard<S>, Error> {
        if !state.is_logged_in()? {
            return Err(Error::NotLoggedIn);
        }
        let view = CommentView::new(state.local_comments()?, state.deleted_ids()?);
        Ok(Dashboard {
            state,
            view,
            load: LoadState::NotLoaded,
        })
    }

    pub fn log_out(mut self) -> Result<PersistedState<S>, Error> {
        self.state.log_out()?;
        Ok(self.state)
    }

    pub fn view(&self) -> &CommentView {
        &self.view
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn persisted(&self) -> &PersistedState<S> {
        &self.state
    }

    pub fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    /// Apply the result of a `GET /comments`
    ///
    /// On error, the previous snapshot is kept and the error handed back.
    pub fn receive_snapshot(&mut self, res: Result<Vec<Comment>, Error>) -> Result<(), Error> {
        match res {
            Ok(comments) => {
                self.view.apply(Transition::RemoteSnapshot(comments));
                self.load = LoadState::Loaded;
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to fetch comments: {e}");
                self.load = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.apply(Transition::SearchChanged(term.into()));
    }

    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.view.apply(Transition::SortChanged(sort));
    }

    /// Hide `id` for good, whether it came from the remote or was created
    /// locally
    ///
    /// This only changes local state. See `delete_and_notify` to also tell the
    /// remote.
    pub fn delete(&mut self, id: CommentId) -> Result<(), Error> {
        let newly_deleted = self.state.add_deleted_id(id)?;
        let was_local = self.state.remove_local_comment(id)?;
        self.view.apply(Transition::Deleted(id));
        tracing::info!(%id, newly_deleted, was_local, "deleted comment");
        Ok(())
    }

    /// Persist the comment the remote just created and show it
    pub fn record_created(&mut self, sub: Submission) -> Result<Comment, Error> {
        let id = self.state.allocate_local_id(sub.snapshot.len())?;
        let comment = Comment {
            id,
            post_id: PostId::DEFAULT,
            ..sub.created
        };
        self.state.push_local_comment(comment.clone())?;
        self.view.apply(Transition::RemoteSnapshot(sub.snapshot));
        self.view.apply(Transition::LocalCreated(comment.clone()));
        self.load = LoadState::Loaded;
        tracing::info!(id = %comment.id, remote_id = %sub.created.id, "created comment");
        Ok(comment)
    }

    /// Page `number` of the search results
    pub fn page(&self, size: NonZeroUsize, number: usize) -> Page<'_, Comment> {
        paginate(self.view.filtered(), size, number)
    }

    pub async fn load<R: Remote + ?Sized>(&mut self, remote: &R) -> Result<(), Error> {
        self.begin_load();
        let res = fetch_snapshot(remote).await;
        self.receive_snapshot(res)
    }

    pub async fn create<R: Remote + ?Sized>(
        &mut self,
        remote: &R,
        form: &NewComment,
    ) -> Result<Comment, Error> {
        let sub = submit_comment(remote, form).await?;
        self.record_created(sub)
    }

    /// `delete`, then let the remote know. The remote's answer does not
    /// matter.
    pub async fn delete_and_notify<R: Remote + ?Sized>(
        &mut self,
        remote: &R,
        id: CommentId,
    ) -> Result<(), Error> {
        self.delete(id)?;
        notify_deletion(remote, id).await;
        Ok(())
    }
}
