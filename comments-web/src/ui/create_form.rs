use comments_client::api::{Field, NewComment, ValidationErrors};
use yew::prelude::*;

use super::form;

#[derive(Clone, PartialEq, Properties)]
pub struct CreateFormProps {
    pub submitting: bool,
    pub error: Option<String>,
    pub on_submit: Callback<NewComment>,
    pub on_cancel: Callback<()>,
}

pub struct CreateForm {
    form: NewComment,
    errors: Option<ValidationErrors>,
}

pub enum CreateFormMsg {
    NameChanged(String),
    EmailChanged(String),
    BodyChanged(String),
    Submit,
}

impl Component for CreateForm {
    type Message = CreateFormMsg;
    type Properties = CreateFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: NewComment::default(),
            errors: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            CreateFormMsg::NameChanged(n) => self.form.name = n,
            CreateFormMsg::EmailChanged(e) => self.form.email = e,
            CreateFormMsg::BodyChanged(b) => self.form.body = b,
            CreateFormMsg::Submit => {
                self.errors = form::problems(self.form.validate());
                if self.errors.is_none() && !ctx.props().submitting {
                    ctx.props().on_submit.emit(self.form.clone());
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let p = ctx.props();
        let on_submit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            CreateFormMsg::Submit
        });
        let error_banner = p.error.as_ref().map(|e| {
            html! { <div class="alert alert-danger">{ format!("Could not create comment: {e}") }</div> }
        });
        html! {
            <div class="container py-5">
                <div class="row justify-content-center">
                    <div class="col-md-8 col-lg-6">
                        <div class="card shadow-sm">
                            <div class="card-header bg-primary text-white d-flex justify-content-between align-items-center">
                                <h2 class="mb-0 fs-4">{ "Create New Comment" }</h2>
                                <button
                                    type="button"
                                    class="btn btn-outline-light btn-sm"
                                    onclick={p.on_cancel.reform(|_| ())}
                                >
                                    { "Back to Dashboard" }
                                </button>
                            </div>
                            <div class="card-body">
                                { for error_banner }
                                <form novalidate={true} onsubmit={on_submit}>
                                    <div class="mb-3">
                                        <label class="form-label" for="name">{ "Name" }</label>
                                        <input
                                            type="text"
                                            class={classes!("form-control", form::invalid_class(&self.errors, Field::Name))}
                                            id="name"
                                            placeholder="Enter your name"
                                            value={self.form.name.clone()}
                                            oninput={ctx.link().callback(|e: InputEvent| {
                                                CreateFormMsg::NameChanged(form::input_value(&e))
                                            })}
                                        />
                                        { form::feedback(&self.errors, Field::Name) }
                                    </div>
                                    <div class="mb-3">
                                        <label class="form-label" for="email">{ "Email" }</label>
                                        <input
                                            type="email"
                                            class={classes!("form-control", form::invalid_class(&self.errors, Field::Email))}
                                            id="email"
                                            placeholder="Enter your email"
                                            value={self.form.email.clone()}
                                            oninput={ctx.link().callback(|e: InputEvent| {
                                                CreateFormMsg::EmailChanged(form::input_value(&e))
                                            })}
                                        />
                                        { form::feedback(&self.errors, Field::Email) }
                                    </div>
                                    <div class="mb-3">
                                        <label class="form-label" for="body">{ "Comment" }</label>
                                        <textarea
                                            rows="5"
                                            class={classes!("form-control", form::invalid_class(&self.errors, Field::Body))}
                                            id="body"
                                            placeholder="Enter your comment"
                                            value={self.form.body.clone()}
                                            oninput={ctx.link().callback(|e: InputEvent| {
                                                let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
                                                CreateFormMsg::BodyChanged(area.value())
                                            })}
                                        />
                                        { form::feedback(&self.errors, Field::Body) }
                                    </div>
                                    <div class="d-grid gap-2">
                                        <button type="submit" class="btn btn-primary" disabled={p.submitting}>
                                            { if p.submitting { "Submitting..." } else { "Submit Comment" } }
                                        </button>
                                    </div>
                                </form>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
        }
    }
}
