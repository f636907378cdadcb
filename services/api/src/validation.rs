//! Input validation
//!
//! Every validator is a pure function from a raw request payload to either
//! the validated fields or the full list of field errors. Nothing here knows
//! about HTTP.

use regex::Regex;
use std::{fmt, sync::OnceLock};

use crate::models::{
    contact::{ContactFields, ContactRequest},
    user::{LoginRequest, RegisterUserRequest, UpdateUserRequest},
};

pub const USERNAME_MAX_LEN: usize = 100;
pub const PASSWORD_MAX_LEN: usize = 100;
pub const NAME_MAX_LEN: usize = 100;
pub const FIRST_NAME_MAX_LEN: usize = 100;
pub const LAST_NAME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 200;
pub const PHONE_MAX_LEN: usize = 20;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors collected while validating one payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Names of the rejected fields, in validation order
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validated registration payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Validated login payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Validated update of the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password: Option<String>,
}

fn check_len(field: &'static str, value: &str, max: usize, errors: &mut FieldErrors) {
    if value.chars().count() > max {
        errors.push(field, format!("must be at most {} characters long", max));
    }
}

/// Required, non-blank, bounded
fn required(
    field: &'static str,
    value: Option<&String>,
    max: usize,
    errors: &mut FieldErrors,
) -> String {
    match value {
        None => {
            errors.push(field, "is required");
            String::new()
        }
        Some(v) if v.trim().is_empty() => {
            errors.push(field, "must not be empty");
            String::new()
        }
        Some(v) => {
            check_len(field, v, max, errors);
            v.clone()
        }
    }
}

/// Optional; an empty string counts as absent
fn optional(
    field: &'static str,
    value: Option<&String>,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    check_len(field, value, max, errors);
    Some(value.clone())
}

/// Optional, but when present it must be non-blank
fn optional_non_empty(
    field: &'static str,
    value: Option<&String>,
    max: usize,
    errors: &mut FieldErrors,
) -> Option<String> {
    value.map(|v| required(field, Some(v), max, errors))
}

/// Validate email shape
pub fn validate_email(email: &str) -> Result<(), String> {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("must be a valid email".to_string());
    }

    Ok(())
}

/// Validate a contact payload for create and replace
pub fn validate_contact(request: &ContactRequest) -> Result<ContactFields, FieldErrors> {
    let mut errors = FieldErrors::default();

    let first_name = required(
        "first_name",
        request.first_name.as_ref(),
        FIRST_NAME_MAX_LEN,
        &mut errors,
    );
    let last_name = optional(
        "last_name",
        request.last_name.as_ref(),
        LAST_NAME_MAX_LEN,
        &mut errors,
    );
    let email = optional("email", request.email.as_ref(), EMAIL_MAX_LEN, &mut errors);
    if let Some(email) = &email {
        if let Err(message) = validate_email(email) {
            errors.push("email", message);
        }
    }
    let phone = optional("phone", request.phone.as_ref(), PHONE_MAX_LEN, &mut errors);

    errors.finish(ContactFields {
        first_name,
        last_name,
        email,
        phone,
    })
}

/// Validate the `contactId` path segment
pub fn validate_contact_id(raw: &str) -> Result<i32, FieldErrors> {
    let mut errors = FieldErrors::default();
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => {
            errors.push("contactId", "must be a positive integer");
            Err(errors)
        }
    }
}

/// Validate a registration payload
pub fn validate_registration(request: &RegisterUserRequest) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::default();

    let username = required(
        "username",
        request.username.as_ref(),
        USERNAME_MAX_LEN,
        &mut errors,
    );
    let password = required(
        "password",
        request.password.as_ref(),
        PASSWORD_MAX_LEN,
        &mut errors,
    );
    let name = required("name", request.name.as_ref(), NAME_MAX_LEN, &mut errors);

    errors.finish(Registration {
        username,
        password,
        name,
    })
}

/// Validate a login payload
pub fn validate_login(request: &LoginRequest) -> Result<Credentials, FieldErrors> {
    let mut errors = FieldErrors::default();

    let username = required(
        "username",
        request.username.as_ref(),
        USERNAME_MAX_LEN,
        &mut errors,
    );
    let password = required(
        "password",
        request.password.as_ref(),
        PASSWORD_MAX_LEN,
        &mut errors,
    );

    errors.finish(Credentials { username, password })
}

/// Validate an update of the current user; at least one field is needed
pub fn validate_user_update(request: &UpdateUserRequest) -> Result<UserChanges, FieldErrors> {
    let mut errors = FieldErrors::default();

    let name = optional_non_empty("name", request.name.as_ref(), NAME_MAX_LEN, &mut errors);
    let password = optional_non_empty(
        "password",
        request.password.as_ref(),
        PASSWORD_MAX_LEN,
        &mut errors,
    );

    if request.name.is_none() && request.password.is_none() {
        errors.push("name", "name or password must be provided");
    }

    errors.finish(UserChanges { name, password })
}
