use yew::prelude::*;

use super::form;

#[derive(Clone, PartialEq, Properties)]
pub struct SearchBarProps {
    pub value: String,
    pub on_change: Callback<String>,
}

#[function_component(SearchBar)]
pub fn search_bar(p: &SearchBarProps) -> Html {
    let on_input = p.on_change.reform(|e: InputEvent| form::input_value(&e));
    html! {
        <div class="flex-fill">
            <input
                type="search"
                class="form-control w-100"
                placeholder="Search in comments..."
                aria-label="Search in comments"
                value={p.value.clone()}
                oninput={on_input}
            />
        </div>
    }
}
