use std::num::NonZeroUsize;

use comments_client::{
    api::{Comment, CommentId, LoginForm, NewComment},
    fetch_snapshot, notify_deletion, submit_comment, Dashboard, Error, HttpRemote, LoadState,
    PersistedState, Sort, SortField, Submission, DEFAULT_PAGE_SIZE,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::{ui, LocalStore};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    Dashboard,
    Create,
}

pub enum AppMsg {
    Login(LoginForm),
    Logout,

    Reload,
    ReceivedSnapshot(Result<Vec<Comment>, Error>),

    SetSearch(String),
    SetSort(SortField),
    SetPage(usize),
    SetPageSize(NonZeroUsize),

    AskDelete(CommentId),
    CancelDelete,
    ConfirmDelete,

    Navigate(Route),
    Submit(NewComment),
    Submitted(Result<Submission, Error>),
}

pub struct App {
    remote: HttpRemote,
    dashboard: Option<Dashboard<LocalStore>>,
    route: Route,
    page: usize,
    page_size: NonZeroUsize,
    pending_delete: Option<CommentId>,
    submitting: bool,
    submit_error: Option<String>,
    storage_error: Option<String>,
}

impl App {
    fn open_session(&mut self, ctx: &Context<Self>, res: Result<Dashboard<LocalStore>, Error>) {
        match res {
            Ok(d) => {
                self.dashboard = Some(d);
                self.route = Route::Dashboard;
                self.page = 1;
                self.fetch(ctx);
            }
            Err(Error::NotLoggedIn) => self.dashboard = None,
            Err(e) => {
                tracing::error!("failed to open local state: {e}");
                self.storage_error = Some(e.to_string());
            }
        }
    }

    fn fetch(&mut self, ctx: &Context<Self>) {
        let Some(d) = &mut self.dashboard else {
            return;
        };
        d.begin_load();
        let remote = self.remote.clone();
        ctx.link().send_future(async move {
            AppMsg::ReceivedSnapshot(fetch_snapshot(&remote).await)
        });
    }

    /// Keep the current page within bounds after the view shrank
    fn clamp_page(&mut self) {
        if let Some(d) = &self.dashboard {
            let total_pages = d.page(self.page_size, self.page).total_pages;
            self.page = self.page.min(total_pages).max(1);
        }
    }

    fn view_dashboard(&self, ctx: &Context<Self>, d: &Dashboard<LocalStore>) -> Html {
        let page = d.page(self.page_size, self.page);
        let status = match d.load_state() {
            LoadState::NotLoaded | LoadState::Loaded => html! {},
            LoadState::Loading => html! {
                <div class="text-center py-4">{ "Loading comments..." }</div>
            },
            LoadState::Failed(msg) => html! {
                <div class="alert alert-danger d-flex justify-content-between align-items-center">
                    <span>{ format!("Could not load comments: {msg}") }</span>
                    <button
                        type="button"
                        class="btn btn-outline-danger btn-sm"
                        onclick={ctx.link().callback(|_| AppMsg::Reload)}
                    >
                        { "Retry" }
                    </button>
                </div>
            },
        };
        html! {
            <div class="container-fluid py-4">
                <div class="d-flex justify-content-between align-items-center mb-4">
                    <h1 class="mb-0">{ "Comments" }</h1>
                    <button
                        type="button"
                        class="btn btn-outline-danger"
                        onclick={ctx.link().callback(|_| AppMsg::Logout)}
                    >
                        { "Logout" }
                    </button>
                </div>
                <div class="d-flex flex-column flex-md-row gap-3 mb-3">
                    <ui::SearchBar
                        value={ d.view().search_term().to_string() }
                        on_change={ ctx.link().callback(AppMsg::SetSearch) }
                    />
                    <button
                        type="button"
                        class="btn btn-primary"
                        onclick={ctx.link().callback(|_| AppMsg::Navigate(Route::Create))}
                    >
                        { "Create Comment" }
                    </button>
                </div>
                { status }
                <ui::CommentTable
                    comments={ page.items.to_vec() }
                    on_delete={ ctx.link().callback(AppMsg::AskDelete) }
                    sort={ d.view().sort() }
                    on_sort={ ctx.link().callback(AppMsg::SetSort) }
                />
                <ui::Pagination
                    number={ page.number }
                    total_pages={ page.total_pages }
                    total_items={ page.total_items }
                    showing={ page.showing().map(|r| (*r.start(), *r.end())) }
                    page_size={ page.size }
                    on_page={ ctx.link().callback(AppMsg::SetPage) }
                    on_page_size={ ctx.link().callback(AppMsg::SetPageSize) }
                />
                <ui::DeleteModal
                    shown={ self.pending_delete.is_some() }
                    on_confirm={ ctx.link().callback(|_| AppMsg::ConfirmDelete) }
                    on_cancel={ ctx.link().callback(|_| AppMsg::CancelDelete) }
                />
            </div>
        }
    }
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut this = App {
            remote: HttpRemote::new(crate::api_url()),
            dashboard: None,
            route: Route::Dashboard,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            pending_delete: None,
            submitting: false,
            submit_error: None,
            storage_error: None,
        };
        let res = PersistedState::open(LocalStore).and_then(Dashboard::open);
        this.open_session(ctx, res);
        this
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::Login(form) => {
                let res = PersistedState::open(LocalStore).and_then(|mut state| {
                    state.log_in(&form)?;
                    Dashboard::open(state)
                });
                self.open_session(ctx, res);
            }
            AppMsg::Logout => {
                if let Some(d) = self.dashboard.take() {
                    if let Err(e) = d.log_out() {
                        tracing::error!("failed to log out: {e}");
                        self.storage_error = Some(e.to_string());
                    }
                }
                self.pending_delete = None;
                self.route = Route::Dashboard;
            }
            AppMsg::Reload => self.fetch(ctx),
            AppMsg::ReceivedSnapshot(res) => {
                if let Some(d) = &mut self.dashboard {
                    // failures end up in the load state
                    let _ = d.receive_snapshot(res);
                }
                self.clamp_page();
            }
            AppMsg::SetSearch(term) => {
                if let Some(d) = &mut self.dashboard {
                    d.set_search(term);
                }
                self.page = 1;
            }
            AppMsg::SetSort(field) => {
                if let Some(d) = &mut self.dashboard {
                    let next = Sort::cycle(d.view().sort(), field);
                    d.set_sort(next);
                }
                self.page = 1;
            }
            AppMsg::SetPage(n) => {
                self.page = n;
                self.clamp_page();
            }
            AppMsg::SetPageSize(size) => {
                self.page_size = size;
                self.page = 1;
            }
            AppMsg::AskDelete(id) => self.pending_delete = Some(id),
            AppMsg::CancelDelete => self.pending_delete = None,
            AppMsg::ConfirmDelete => {
                let (Some(id), Some(d)) = (self.pending_delete.take(), &mut self.dashboard) else {
                    return true;
                };
                match d.delete(id) {
                    Ok(()) => {
                        let remote = self.remote.clone();
                        spawn_local(async move {
                            notify_deletion(&remote, id).await;
                        });
                    }
                    Err(e) => {
                        tracing::error!(%id, "failed to delete comment: {e}");
                        self.storage_error = Some(e.to_string());
                    }
                }
                self.clamp_page();
            }
            AppMsg::Navigate(route) => {
                self.route = route;
                self.submit_error = None;
                if route == Route::Dashboard {
                    self.fetch(ctx);
                }
            }
            AppMsg::Submit(form) => {
                if self.submitting {
                    return false;
                }
                self.submitting = true;
                self.submit_error = None;
                let remote = self.remote.clone();
                ctx.link().send_future(async move {
                    AppMsg::Submitted(submit_comment(&remote, &form).await)
                });
            }
            AppMsg::Submitted(res) => {
                self.submitting = false;
                let Some(d) = &mut self.dashboard else {
                    return true;
                };
                match res.and_then(|sub| d.record_created(sub)) {
                    Ok(_) => {
                        self.route = Route::Dashboard;
                        self.fetch(ctx);
                    }
                    Err(e) => {
                        tracing::warn!("failed to create comment: {e}");
                        self.submit_error = Some(e.to_string());
                    }
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let storage_banner = self.storage_error.as_ref().map(|e| {
            html! {
                <div class="alert alert-danger m-3">
                    { format!("Local storage is unusable: {e}") }
                </div>
            }
        });
        let body = match (&self.dashboard, self.route) {
            (None, _) => html! {
                <ui::Login on_submit={ ctx.link().callback(AppMsg::Login) } />
            },
            (Some(d), Route::Dashboard) => self.view_dashboard(ctx, d),
            (Some(_), Route::Create) => html! {
                <ui::CreateForm
                    submitting={ self.submitting }
                    error={ self.submit_error.clone() }
                    on_submit={ ctx.link().callback(AppMsg::Submit) }
                    on_cancel={ ctx.link().callback(|_| AppMsg::Navigate(Route::Dashboard)) }
                />
            },
        };
        html! {
            <>
                { for storage_banner }
                { body }
            </>
        }
    }
}
