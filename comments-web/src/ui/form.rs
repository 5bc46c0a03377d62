use comments_client::api::{self, Field, ValidationErrors};
use yew::prelude::*;

/// Problems to show under each field, none if the form passed validation
pub fn problems(res: Result<(), api::Error>) -> Option<ValidationErrors> {
    match res {
        Ok(()) => None,
        Err(api::Error::Invalid(errs)) => Some(errs),
        Err(e) => {
            tracing::warn!("unexpected validation outcome: {e}");
            None
        }
    }
}

pub fn invalid_class(errors: &Option<ValidationErrors>, field: Field) -> Option<&'static str> {
    let errors = errors.as_ref()?;
    errors.for_field(field).map(|_| "is-invalid")
}

pub fn feedback(errors: &Option<ValidationErrors>, field: Field) -> Html {
    match errors.as_ref().and_then(|e| e.for_field(field)) {
        None => html! {},
        Some(problem) => html! {
            <div class="invalid-feedback">{ problem.to_string() }</div>
        },
    }
}

pub fn input_value(e: &Event) -> String {
    e.target_unchecked_into::<web_sys::HtmlInputElement>().value()
}
