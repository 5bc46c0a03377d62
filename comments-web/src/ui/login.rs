use comments_client::api::{Field, LoginForm, ValidationErrors};
use yew::prelude::*;

use super::form;

#[derive(Clone, PartialEq, Properties)]
pub struct LoginProps {
    pub on_submit: Callback<LoginForm>,
}

pub struct Login {
    form: LoginForm,
    errors: Option<ValidationErrors>,
}

pub enum LoginMsg {
    UsernameChanged(String),
    PasswordChanged(String),
    Submit,
}

impl Component for Login {
    type Message = LoginMsg;
    type Properties = LoginProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            form: LoginForm::default(),
            errors: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            LoginMsg::UsernameChanged(u) => self.form.username = u,
            LoginMsg::PasswordChanged(p) => self.form.password = p,
            LoginMsg::Submit => {
                self.errors = form::problems(self.form.validate());
                if self.errors.is_none() {
                    ctx.props().on_submit.emit(self.form.clone());
                }
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        macro_rules! callback_for {
            ($msg:ident) => {
                ctx.link()
                    .callback(|e: InputEvent| LoginMsg::$msg(form::input_value(&e)))
            };
        }
        let on_submit = ctx.link().callback(|e: SubmitEvent| {
            e.prevent_default();
            LoginMsg::Submit
        });
        html! {
            <div class="container d-flex justify-content-center align-items-center min-vh-100">
                <div class="card p-4 shadow-sm login-card">
                    <h2 class="text-center mb-4">{ "Login" }</h2>
                    <form novalidate={true} onsubmit={on_submit}>
                        <div class="mb-3">
                            <label class="form-label" for="username">{ "Username" }</label>
                            <input
                                type="text"
                                class={classes!("form-control", form::invalid_class(&self.errors, Field::Username))}
                                id="username"
                                placeholder="Enter username"
                                value={self.form.username.clone()}
                                oninput={callback_for!(UsernameChanged)}
                            />
                            { form::feedback(&self.errors, Field::Username) }
                        </div>
                        <div class="mb-3">
                            <label class="form-label" for="password">{ "Password" }</label>
                            <input
                                type="password"
                                class={classes!("form-control", form::invalid_class(&self.errors, Field::Password))}
                                id="password"
                                placeholder="Password"
                                value={self.form.password.clone()}
                                oninput={callback_for!(PasswordChanged)}
                            />
                            { form::feedback(&self.errors, Field::Password) }
                        </div>
                        <button type="submit" class="btn btn-primary w-100 mt-3">
                            { "Login" }
                        </button>
                    </form>
                </div>
            </div>
        }
    }
}
