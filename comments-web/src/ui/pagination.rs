use std::num::NonZeroUsize;

use comments_client::PAGE_SIZES;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct PaginationProps {
    /// 1-based
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub showing: Option<(usize, usize)>,
    pub page_size: NonZeroUsize,
    pub on_page: Callback<usize>,
    pub on_page_size: Callback<NonZeroUsize>,
}

#[function_component(Pagination)]
pub fn pagination(p: &PaginationProps) -> Html {
    let (first, last) = p.showing.unwrap_or((0, 0));
    let number = p.number;
    let has_previous = number > 1;
    let has_next = number < p.total_pages;
    let on_page_size = {
        let current = p.page_size;
        p.on_page_size.reform(move |e: Event| {
            let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
            select
                .value()
                .parse::<NonZeroUsize>()
                .unwrap_or(current)
        })
    };
    html! {
        <div class="d-flex flex-wrap justify-content-between align-items-center gap-3 mt-3">
            <span class="text-muted">
                { format!("Showing {first}-{last} of {}", p.total_items) }
            </span>
            <div class="d-flex align-items-center gap-2">
                <button
                    type="button"
                    class="btn btn-outline-primary btn-sm"
                    disabled={!has_previous}
                    onclick={p.on_page.reform(move |_| number - 1)}
                >
                    { "Previous" }
                </button>
                <span>{ format!("Page {} of {}", number, p.total_pages.max(1)) }</span>
                <button
                    type="button"
                    class="btn btn-outline-primary btn-sm"
                    disabled={!has_next}
                    onclick={p.on_page.reform(move |_| number + 1)}
                >
                    { "Next" }
                </button>
            </div>
            <select
                class="form-select form-select-sm w-auto"
                aria-label="Comments per page"
                onchange={on_page_size}
            >
                { for PAGE_SIZES.iter().map(|&size| html! {
                    <option value={size.to_string()} selected={size == p.page_size.get()}>
                        { size }
                    </option>
                }) }
            </select>
        </div>
    }
}
