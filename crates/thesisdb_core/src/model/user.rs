//! User input record and its validator.

use super::validation::{optional_within_limit, required, required_within_limit, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NAME_MAX_CHARS: usize = 50;
pub const BELONG_MAX_CHARS: usize = 50;

static LOGIN_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]{3,12}$").expect("valid login name regex"));

/// Raw user input as received from an upper layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub login_name: Option<String>,
    pub name_ja: Option<String>,
    pub name_en: Option<String>,
    /// Faculty or course the user belongs to.
    pub belong: Option<String>,
}

/// User record that passed every field rule and is ready for insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedUser {
    pub login_name: String,
    pub name_ja: String,
    pub name_en: String,
    pub belong: String,
}

impl NewUser {
    pub fn new(login_name: impl Into<String>, belong: impl Into<String>) -> Self {
        Self {
            login_name: Some(login_name.into()),
            belong: Some(belong.into()),
            ..Self::default()
        }
    }

    /// Validates every field rule except login name uniqueness.
    pub fn validate(&self) -> Result<ValidatedUser, ValidationError> {
        self.validate_with(|_| Ok(false))
    }

    /// Validates in field order, stopping at the first violation.
    ///
    /// `is_taken` is consulted once the login name has a valid format and
    /// before any other field is looked at. Returning `Ok(true)` rejects the
    /// record with `ValidationError::DuplicateLoginName`.
    pub fn validate_with<E, F>(&self, is_taken: F) -> Result<ValidatedUser, E>
    where
        F: FnOnce(&str) -> Result<bool, E>,
        E: From<ValidationError>,
    {
        let login_name = validate_login_name(self.login_name.as_deref())?;
        if is_taken(&login_name)? {
            return Err(ValidationError::DuplicateLoginName.into());
        }

        let name_ja = optional_within_limit("name_ja", self.name_ja.as_deref(), NAME_MAX_CHARS)?;
        let name_en = optional_within_limit("name_en", self.name_en.as_deref(), NAME_MAX_CHARS)?;
        let belong = required_within_limit("belong", self.belong.as_deref(), BELONG_MAX_CHARS)?;

        Ok(ValidatedUser {
            login_name,
            name_ja,
            name_en,
            belong,
        })
    }
}

/// Checks presence and the `^[A-Za-z0-9]{3,12}$` shape of a login name.
pub fn validate_login_name(value: Option<&str>) -> Result<String, ValidationError> {
    let login_name = required("login_name", value)?;
    if !LOGIN_NAME_RE.is_match(login_name) {
        return Err(ValidationError::InvalidFormat {
            field: "login_name",
            expected: "3-12 ASCII letters or digits",
        });
    }
    Ok(login_name.to_string())
}
