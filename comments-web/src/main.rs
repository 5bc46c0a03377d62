use comments_client::api::DEFAULT_API_URL;

mod storage;
mod ui;

pub use storage::LocalStore;

/// Set `COMMENTS_API_URL` at build time to point at another backend
pub fn api_url() -> &'static str {
    option_env!("COMMENTS_API_URL").unwrap_or(DEFAULT_API_URL)
}

fn main() {
    tracing_wasm::set_as_global_default();
    yew::Renderer::<ui::App>::new().render();
}
