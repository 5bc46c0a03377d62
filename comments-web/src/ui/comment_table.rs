use comments_client::{
    api::{Comment, CommentId},
    truncate, Sort, SortField, SortOrder,
};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct CommentTableProps {
    pub comments: Vec<Comment>,
    pub on_delete: Callback<CommentId>,
    pub sort: Option<Sort>,
    pub on_sort: Callback<SortField>,
}

fn sortable_header(p: &CommentTableProps, field: SortField, label: &str, class: &str) -> Html {
    let (arrow, aria) = match p.sort {
        Some(s) if s.field == field => match s.order {
            SortOrder::Ascending => (" \u{25b2}", "ascending"),
            SortOrder::Descending => (" \u{25bc}", "descending"),
        },
        _ => ("", "none"),
    };
    html! {
        <th
            class={classes!(class.to_string(), "sortable")}
            role="button"
            aria-sort={aria}
            onclick={p.on_sort.reform(move |_| field)}
        >
            { label }{ arrow }
        </th>
    }
}

#[function_component(CommentTable)]
pub fn comment_table(p: &CommentTableProps) -> Html {
    if p.comments.is_empty() {
        return html! {
            <div class="text-center py-4">{ "No comments found." }</div>
        };
    }
    let rows = p.comments.iter().map(|c| {
        let id = c.id;
        html! {
            <tr key={id.0}>
                <td>{ id }</td>
                <td title={c.name.clone()}>{ truncate(&c.name, 25) }</td>
                <td title={c.email.clone()}>{ truncate(&c.email, 25) }</td>
                <td>{ truncate(&c.body, 60) }</td>
                <td>
                    <button
                        type="button"
                        class="btn btn-danger btn-sm px-2 py-1"
                        onclick={p.on_delete.reform(move |_| id)}
                    >
                        { "Delete" }
                    </button>
                </td>
            </tr>
        }
    });
    html! {
        <table class="table table-striped">
            <thead>
                <tr>
                    { sortable_header(p, SortField::Id, "ID", "col-id") }
                    { sortable_header(p, SortField::Name, "Name", "col-name") }
                    { sortable_header(p, SortField::Email, "Email", "col-email") }
                    { sortable_header(p, SortField::Body, "Comment", "col-body") }
                    <th class="col-actions">{ "Actions" }</th>
                </tr>
            </thead>
            <tbody>
                { for rows }
            </tbody>
        </table>
    }
}
