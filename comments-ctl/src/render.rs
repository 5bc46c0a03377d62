use std::fmt::Write;

use comments_client::{api::Comment, truncate, Page};

const NAME_WIDTH: usize = 25;
const EMAIL_WIDTH: usize = 25;
const BODY_WIDTH: usize = 60;

pub fn render_row(c: &Comment) -> String {
    // Bodies often span lines, which would break the table
    let body = c.body.replace('\n', " ");
    format!(
        "{:>5}  {:<name_w$}  {:<email_w$}  {}",
        c.id,
        truncate(&c.name, NAME_WIDTH),
        truncate(&c.email, EMAIL_WIDTH),
        truncate(&body, BODY_WIDTH),
        name_w = NAME_WIDTH + 3,
        email_w = EMAIL_WIDTH + 3,
    )
}

pub fn render_page(page: &Page<'_, Comment>) -> String {
    let mut out = String::new();
    let showing = match page.showing() {
        None => {
            out.push_str("No comments found.\n");
            return out;
        }
        Some(s) => s,
    };
    for c in page.items {
        out.push_str(&render_row(c));
        out.push('\n');
    }
    // writing to a String cannot fail
    let _ = writeln!(
        out,
        "Showing {}-{} of {} (page {} of {})",
        showing.start(),
        showing.end(),
        page.total_items,
        page.number,
        page.total_pages,
    );
    out
}
