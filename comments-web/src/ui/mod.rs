mod app;
pub use app::App;

mod comment_table;
pub use comment_table::CommentTable;

mod create_form;
pub use create_form::CreateForm;

mod delete_modal;
pub use delete_modal::DeleteModal;

mod form;

mod login;
pub use login::Login;

mod pagination;
pub use pagination::Pagination;

mod search_bar;
pub use search_bar::SearchBar;
