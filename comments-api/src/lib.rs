use regex::Regex;

mod auth;
pub use auth::LoginForm;

mod comment;
pub use comment::{Comment, CommentId, NewComment, PostId};

mod error;
pub use error::{Error, Field, Problem, ValidationErrors};

/// Base URL of the public mock REST API the dashboard talks to by default
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";

// All `validate` functions in comments-api only check what the forms check:
// required fields and the email pattern. They collect every failure instead of
// stopping at the first one, so that forms can display all messages at once.

fn validate_required(errors: &mut ValidationErrors, field: Field, value: &str) {
    if value.is_empty() {
        errors.push(field, Problem::Required);
    }
}

fn validate_email(errors: &mut ValidationErrors, field: Field, value: &str) {
    if value.is_empty() {
        errors.push(field, Problem::Required);
    } else if !is_valid_email(value) {
        errors.push(field, Problem::InvalidEmail);
    }
}

lazy_static::lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern does not compile");
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL.is_match(s)
}
