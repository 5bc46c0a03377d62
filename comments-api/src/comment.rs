use std::{fmt, num::ParseIntError, str::FromStr};

use crate::{Error, Field, ValidationErrors};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct CommentId(pub u64);

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CommentId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<CommentId, ParseIntError> {
        Ok(CommentId(s.parse()?))
    }
}

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl PostId {
    /// Post that locally created comments get attached to
    pub const DEFAULT: PostId = PostId(1);
}

impl Default for PostId {
    fn default() -> PostId {
        PostId::DEFAULT
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,

    /// Missing from the answer to `POST /comments`
    #[serde(default)]
    pub post_id: PostId,

    pub name: String,
    pub email: String,
    pub body: String,
}

/// Contents of the comment creation form, also the `POST /comments` payload
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub name: String,
    pub email: String,
    pub body: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), Error> {
        let mut errs = ValidationErrors::new();
        crate::validate_required(&mut errs, Field::Name, &self.name);
        crate::validate_email(&mut errs, Field::Email, &self.email);
        crate::validate_required(&mut errs, Field::Body, &self.body);
        errs.into_result()
    }
}
