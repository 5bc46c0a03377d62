use crate::{Error, Field, ValidationErrors};

/// There is no backend to check credentials against: any non-empty pair is
/// accepted
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), Error> {
        let mut errs = ValidationErrors::new();
        crate::validate_required(&mut errs, Field::Username, &self.username);
        crate::validate_required(&mut errs, Field::Password, &self.password);
        errs.into_result()
    }
}
