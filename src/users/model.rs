use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// Reasons a candidate user is rejected before it reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid ID")]
    InvalidId,
    #[error("Invalid name")]
    InvalidName,
    #[error("Invalid email")]
    InvalidEmail,
}

/// A user that passed validation. Only `User::new` can build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: String,
    name: String,
    email: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.chars().any(|c| c.is_ascii_digit())
}

impl User {
    /// Checks id, then name, then email; the first failing field is reported.
    pub fn new(
        id: Option<&str>,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let id = id
            .filter(|id| !id.is_empty())
            .ok_or(ValidationError::InvalidId)?;
        let name = name
            .filter(|name| is_valid_name(name))
            .ok_or(ValidationError::InvalidName)?;
        let email = email
            .filter(|email| is_valid_email(email))
            .ok_or(ValidationError::InvalidEmail)?;

        Ok(Self {
            id: id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
