use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct DeleteModalProps {
    pub shown: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

#[function_component(DeleteModal)]
pub fn delete_modal(p: &DeleteModalProps) -> Html {
    if !p.shown {
        return html! {};
    }
    html! {
        <>
            <div class="modal d-block" tabindex="-1" role="dialog" aria-modal="true">
                <div class="modal-dialog modal-dialog-centered">
                    <div class="modal-content">
                        <div class="modal-header">
                            <h5 class="modal-title">{ "Confirm Deletion" }</h5>
                            <button
                                type="button"
                                class="btn-close"
                                aria-label="Close"
                                onclick={p.on_cancel.reform(|_| ())}
                            >
                            </button>
                        </div>
                        <div class="modal-body">
                            { "Are you sure you want to delete this comment? This action cannot be undone." }
                        </div>
                        <div class="modal-footer">
                            <button
                                type="button"
                                class="btn btn-secondary"
                                onclick={p.on_cancel.reform(|_| ())}
                            >
                                { "No, Cancel" }
                            </button>
                            <button
                                type="button"
                                class="btn btn-danger"
                                onclick={p.on_confirm.reform(|_| ())}
                            >
                                { "Yes, Delete" }
                            </button>
                        </div>
                    </div>
                </div>
            </div>
            <div class="modal-backdrop show"></div>
        </>
    }
}
