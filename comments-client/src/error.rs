use crate::api;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Remote request failed: {0:#}")]
    Remote(anyhow::Error),

    #[error("Local storage failure: {0:#}")]
    Storage(anyhow::Error),

    #[error("Unsupported local storage schema version {0}")]
    UnsupportedSchema(u32),

    #[error(transparent)]
    Api(#[from] api::Error),
}

impl Error {
    /// The per-field errors, if this is a form validation failure
    pub fn validation(&self) -> Option<&api::ValidationErrors> {
        match self {
            Error::Api(api::Error::Invalid(errs)) => Some(errs),
            _ => None,
        }
    }
}
