//! Front handlers: sign-in, account creation, password reset, gated data pages.

pub mod account;
pub mod create_user;
pub mod health;
pub mod home;
pub mod post_data;
pub mod sign_in;


use crate::firebase::Reason;
use serde::Deserialize;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Form payload for the sign-in and create-account views.
#[derive(Deserialize, Debug)]
pub struct AccountForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Local form check. Email shape is left to the provider, which answers with
/// `INVALID_EMAIL` when it disagrees.
pub(crate) fn validate_form(form: &AccountForm) -> Option<&'static str> {
    if form.email.is_empty() || form.password.is_empty() {
        return Some("Email and password are required");
    }
    if form.password.len() < MIN_PASSWORD_LENGTH {
        return Some("Password length should be at least 6 characters");
    }
    None
}

/// Single mapping from provider reasons to the sign-in view message. Total:
/// every reason lands on exactly one message.
pub(crate) const fn sign_in_message(reason: Reason) -> &'static str {
    match reason {
        Reason::InvalidCredentials => "Cannot sign in into account, check email and password",
        Reason::EmailExists | Reason::InvalidEmail | Reason::Unknown => "Unknown error",
    }
}

/// Single mapping from provider reasons to the create-account view message.
pub(crate) const fn create_user_message(reason: Reason) -> &'static str {
    match reason {
        Reason::EmailExists => "This email is occupied",
        Reason::InvalidEmail => "This email is invalid",
        Reason::InvalidCredentials | Reason::Unknown => "Unknown error",
    }
}
