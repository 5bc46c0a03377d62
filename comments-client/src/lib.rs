mod dashboard;
pub use dashboard::{Dashboard, LoadState};

mod error;
pub use error::Error;

mod http;
pub use http::HttpRemote;

mod page;
pub use page::{paginate, Page, DEFAULT_PAGE_SIZE, PAGE_SIZES};

mod remote;
pub use remote::{fetch_snapshot, notify_deletion, submit_comment, Remote, Submission};

mod search;
pub use search::Search;

mod sort;
pub use sort::{Sort, SortField, SortOrder, UnknownSortField};

mod storage;
pub use storage::{KeyValueStore, MemoryStore, PersistedState, SCHEMA_VERSION};

mod text;
pub use text::truncate;

mod view;
pub use view::{CommentView, Transition};

#[cfg(test)]
mod testing;

pub mod api {
    pub use comments_api::*;
}
