//! Authentication seam.
//!
//! The app only needs a signed-in user and five operations. Every failure
//! is an [`AuthError`] whose message is shown to the user as-is.

mod local;

pub use local::LocalAuthProvider;

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const MISSING_SIGN_UP_FIELDS: &str = "Please fill out all fields.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Third-party identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FederatedProvider {
    Google,
}

impl std::fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FederatedProvider::Google => f.write_str("google.com"),
        }
    }
}

pub trait AuthProvider {
    fn current_user(&self) -> Option<User>;

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, AuthError>;

    fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError>;

    fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> Result<User, AuthError>;

    fn sign_out(&self) -> Result<(), AuthError>;
}

/// Sign-in form check: both fields present.
pub fn check_sign_in_fields(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() {
        return Err(AuthError::new(MISSING_CREDENTIALS));
    }
    Ok(())
}

/// Sign-up form check: all three fields present.
pub fn check_sign_up_fields(email: &str, password: &str, name: &str) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() || name.is_empty() {
        return Err(AuthError::new(MISSING_SIGN_UP_FIELDS));
    }
    Ok(())
}

/// What the profile page and navigation show for a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub title: String,
    pub nav_label: String,
    pub initial: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl Profile {
    pub fn of(user: &User) -> Self {
        let name = user.display_name.as_deref().filter(|n| !n.is_empty());
        let initial = name
            .or(user.email.as_deref())
            .and_then(|s| s.chars().next())
            .map(String::from);
        Self {
            title: name.unwrap_or("Welcome!").to_string(),
            nav_label: name.unwrap_or("User").to_string(),
            initial,
            email: user.email.clone(),
            photo_url: user.photo_url.clone(),
        }
    }
}
