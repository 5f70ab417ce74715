//! Form validation schemas.
//!
//! Each schema turns the raw values of one form into a typed value or a
//! [`FieldErrors`] map. Validation is pure: it never touches the network
//! and never panics on any input.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::shared::user::{Credential, UserFields};

/// Minimum password length, in characters
pub const PASSWORD_MIN_LEN: usize = 6;

pub const EMAIL_REQUIRED: &str = "This field is required";
pub const EMAIL_INVALID: &str = "Email format is not valid. Example: user@mail.com";
pub const PASSWORD_TOO_SHORT: &str = "The password must contain at least 6 characters";
pub const FIRST_NAME_REQUIRED: &str = "First name is required";
pub const LAST_NAME_REQUIRED: &str = "Last name is required";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match!";

// Admin record form
pub const RECORD_FIRST_NAME_REQUIRED: &str = "El nombre es requerido";
pub const RECORD_LAST_NAME_REQUIRED: &str = "El apellido es requerido";
pub const RECORD_EMAIL_REQUIRED: &str = "El email es requerido";
pub const RECORD_EMAIL_INVALID: &str = "Email inválido";
pub const RECORD_PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";

/// Form field a validation message is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm_password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field → message map; at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    pub fn add(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// A form whose raw values validate into a typed output
pub trait FormSchema {
    type Values: Default + Clone;
    type Output;

    fn validate(values: &Self::Values) -> Result<Self::Output, FieldErrors>;
}

/// Raw sign-in form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInValues {
    pub email: String,
    pub password: String,
}

/// Raw sign-up form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validated sign-up form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub credential: Credential,
    /// Profile name stored with the account, "first last"
    pub display_name: String,
}

pub struct SignInSchema;
pub struct SignUpSchema;
pub struct UserRecordSchema;

impl FormSchema for SignInSchema {
    type Values = SignInValues;
    type Output = Credential;

    fn validate(values: &SignInValues) -> Result<Credential, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &values.email, EMAIL_REQUIRED, EMAIL_INVALID);
        check_password(&mut errors, &values.password, PASSWORD_TOO_SHORT);
        errors.into_result(Credential::new(values.email.clone(), values.password.clone()))
    }
}

impl FormSchema for SignUpSchema {
    type Values = SignUpValues;
    type Output = SignUpRequest;

    fn validate(values: &SignUpValues) -> Result<SignUpRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, Field::FirstName, &values.first_name, FIRST_NAME_REQUIRED);
        check_required(&mut errors, Field::LastName, &values.last_name, LAST_NAME_REQUIRED);
        check_email(&mut errors, &values.email, EMAIL_REQUIRED, EMAIL_INVALID);
        check_password(&mut errors, &values.password, PASSWORD_TOO_SHORT);
        if values.password != values.confirm_password {
            errors.add(Field::ConfirmPassword, PASSWORDS_DO_NOT_MATCH);
        }

        let display_name = format!("{} {}", values.first_name.trim(), values.last_name.trim());
        errors.into_result(SignUpRequest {
            credential: Credential::new(values.email.clone(), values.password.clone()),
            display_name,
        })
    }
}

impl FormSchema for UserRecordSchema {
    type Values = UserFields;
    type Output = UserFields;

    fn validate(values: &UserFields) -> Result<UserFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        check_required(&mut errors, Field::FirstName, &values.first_name, RECORD_FIRST_NAME_REQUIRED);
        check_required(&mut errors, Field::LastName, &values.last_name, RECORD_LAST_NAME_REQUIRED);
        check_email(&mut errors, &values.email, RECORD_EMAIL_REQUIRED, RECORD_EMAIL_INVALID);
        check_password(&mut errors, &values.password, RECORD_PASSWORD_TOO_SHORT);
        errors.into_result(values.clone())
    }
}

const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot placement in the local part is checked in `is_valid_email`.
        // Constant pattern; `test_email_regex_compiles` pins it.
        Regex::new(EMAIL_PATTERN).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactic address check; no DNS or deliverability lookups.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && email_regex().is_match(email)
}

fn check_required(errors: &mut FieldErrors, field: Field, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

fn check_email(errors: &mut FieldErrors, email: &str, required: &str, invalid: &str) {
    if email.is_empty() {
        errors.add(Field::Email, required);
    } else if !is_valid_email(email) {
        errors.add(Field::Email, invalid);
    }
}

fn check_password(errors: &mut FieldErrors, password: &str, too_short: &str) {
    if password.chars().count() < PASSWORD_MIN_LEN {
        errors.add(Field::Password, too_short);
    }
}
