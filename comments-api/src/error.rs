use std::fmt;

use anyhow::{anyhow, Context};
use serde_json::json;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Field {
    Username,
    Password,
    Name,
    Email,
    Body,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Username => "username",
            Field::Password => "password",
            Field::Name => "name",
            Field::Email => "email",
            Field::Body => "body",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Problem {
    #[error("Field is required")]
    Required,

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

/// Every field that failed validation, in form order
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ValidationErrors(Vec<(Field, Problem)>);

impl ValidationErrors {
    pub fn new() -> ValidationErrors {
        ValidationErrors(Vec::new())
    }

    pub fn push(&mut self, field: Field, problem: Problem) {
        self.0.push((field, problem));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: Field) -> Option<Problem> {
        self.0.iter().find(|(f, _)| *f == field).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, Problem)> {
        self.0.iter()
    }

    /// Ok if nothing was pushed
    pub fn into_result(self) -> Result<(), Error> {
        match self.is_empty() {
            true => Ok(()),
            false => Err(Error::Invalid(self)),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, problem)) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {problem}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Invalid form: {0}")]
    Invalid(ValidationErrors),
}

impl Error {
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Unknown(_) => 500,
            Error::Invalid(_) => 400,
        }
    }

    pub fn contents(&self) -> Vec<u8> {
        serde_json::to_vec(&match self {
            Error::Unknown(msg) => json!({
                "message": msg,
                "type": "unknown",
            }),
            Error::Invalid(errs) => json!({
                "message": errs.to_string(),
                "type": "invalid",
            }),
        })
        .expect("serializing error contents")
    }

    /// Only the message survives for `Invalid`, as the per-field detail is
    /// not part of the wire format
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        let message = data
            .get("message")
            .and_then(|msg| msg.as_str())
            .unwrap_or("");
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" | "invalid" => Error::Unknown(String::from(message)),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}
