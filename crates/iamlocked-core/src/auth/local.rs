//! Offline account provider backed by the key-value store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::{
    check_sign_in_fields, check_sign_up_fields, AuthProvider, FederatedProvider, User,
};
use crate::error::AuthError;
use crate::storage::{self, keys, KvStore};

const MIN_PASSWORD_LEN: usize = 6;
const SALT_LEN: usize = 16;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Account {
    uid: String,
    email: String,
    display_name: String,
    salt: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl Account {
    fn user(&self) -> User {
        User {
            uid: self.uid.clone(),
            display_name: Some(self.display_name.clone()),
            email: Some(self.email.clone()),
            photo_url: None,
        }
    }
}

/// Accounts live under `auth.accounts`, the signed-in user under
/// `auth.currentUser`.
pub struct LocalAuthProvider<'a, S: KvStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: KvStore + ?Sized> LocalAuthProvider<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    fn accounts(&self) -> Vec<Account> {
        storage::load(self.store, keys::AUTH_ACCOUNTS, Vec::new())
    }

    fn set_current(&self, user: Option<&User>) -> Result<(), AuthError> {
        storage::save(self.store, keys::AUTH_CURRENT_USER, &user).map_err(store_failure)
    }
}

fn store_failure(e: crate::error::CoreError) -> AuthError {
    tracing::warn!(error = %e, "auth store write failed");
    AuthError::new(format!("Error (auth/internal-error): {e}"))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// One round of salted SHA-256. Fast to brute-force: good enough to keep
/// plain passwords out of a local single-user store, not for a server.
fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn new_salt() -> Result<String, AuthError> {
    let mut bytes = [0u8; SALT_LEN];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| AuthError::new(format!("Error (auth/internal-error): {e}")))?;
    Ok(hex::encode(bytes))
}

impl<S: KvStore + ?Sized> AuthProvider for LocalAuthProvider<'_, S> {
    fn current_user(&self) -> Option<User> {
        storage::load(self.store, keys::AUTH_CURRENT_USER, None)
    }

    fn sign_in_with_password(&self, email: &str, password: &str) -> Result<User, AuthError> {
        check_sign_in_fields(email, password)?;
        let email = normalize_email(email);
        let user = self
            .accounts()
            .into_iter()
            .find(|a| a.email == email && a.password_hash == hash_password(&a.salt, password))
            .map(|a| a.user())
            .ok_or_else(|| AuthError::new("Error (auth/invalid-credential)."))?;

        self.set_current(Some(&user))?;
        tracing::info!(uid = %user.uid, "signed in");
        Ok(user)
    }

    fn sign_up_with_password(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<User, AuthError> {
        check_sign_up_fields(email, password, display_name)?;
        let email = normalize_email(email);
        if !email.contains('@') {
            return Err(AuthError::new("Error (auth/invalid-email)."));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::new(
                "Password should be at least 6 characters (auth/weak-password).",
            ));
        }

        let mut accounts = self.accounts();
        if accounts.iter().any(|a| a.email == email) {
            return Err(AuthError::new("Error (auth/email-already-in-use)."));
        }

        let salt = new_salt()?;
        let account = Account {
            uid: Uuid::new_v4().simple().to_string(),
            email,
            display_name: display_name.trim().to_string(),
            password_hash: hash_password(&salt, password),
            salt,
            created_at: Utc::now(),
        };
        let user = account.user();
        accounts.push(account);
        storage::save(self.store, keys::AUTH_ACCOUNTS, &accounts).map_err(store_failure)?;
        self.set_current(Some(&user))?;
        tracing::info!(uid = %user.uid, "account created");
        Ok(user)
    }

    fn sign_in_with_federated_provider(
        &self,
        provider: FederatedProvider,
    ) -> Result<User, AuthError> {
        tracing::debug!(%provider, "federated sign-in requested offline");
        Err(AuthError::new(format!(
            "Sign-in with {provider} is unavailable offline \
             (auth/operation-not-supported-in-this-environment)."
        )))
    }

    fn sign_out(&self) -> Result<(), AuthError> {
        self.set_current(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MISSING_CREDENTIALS, MISSING_SIGN_UP_FIELDS};
    use crate::storage::MemoryStore;

    #[test]
    fn sign_up_signs_in() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        let user = auth
            .sign_up_with_password("Asha@Example.com", "secret1", "Asha")
            .unwrap();
        assert_eq!(user.email.as_deref(), Some("asha@example.com"));
        assert_eq!(auth.current_user(), Some(user));
    }

    #[test]
    fn sign_in_checks_password() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        auth.sign_up_with_password("a@b.c", "secret1", "A").unwrap();
        auth.sign_out().unwrap();
        assert_eq!(auth.current_user(), None);

        let err = auth.sign_in_with_password("a@b.c", "wrong!!").unwrap_err();
        assert_eq!(err.message(), "Error (auth/invalid-credential).");
        assert_eq!(auth.current_user(), None);

        let user = auth.sign_in_with_password(" A@B.C ", "secret1").unwrap();
        assert_eq!(user.display_name.as_deref(), Some("A"));
    }

    #[test]
    fn passwords_are_not_stored_in_clear() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        auth.sign_up_with_password("a@b.c", "hunter22", "A").unwrap();
        let raw = store.get_raw(keys::AUTH_ACCOUNTS).unwrap().unwrap();
        assert!(!raw.contains("hunter22"));
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        auth.sign_up_with_password("a@b.c", "secret1", "A").unwrap();
        let err = auth
            .sign_up_with_password("a@b.c", "secret2", "B")
            .unwrap_err();
        assert_eq!(err.message(), "Error (auth/email-already-in-use).");
    }

    #[test]
    fn empty_fields_use_form_messages() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        assert_eq!(
            auth.sign_in_with_password("", "").unwrap_err().message(),
            MISSING_CREDENTIALS
        );
        assert_eq!(
            auth.sign_up_with_password("a@b.c", "secret1", "")
                .unwrap_err()
                .message(),
            MISSING_SIGN_UP_FIELDS
        );
    }

    #[test]
    fn weak_password_is_rejected() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        let err = auth.sign_up_with_password("a@b.c", "123", "A").unwrap_err();
        assert!(err.message().starts_with("Password should be at least 6"));
    }

    #[test]
    fn federated_sign_in_is_unavailable() {
        let store = MemoryStore::new();
        let auth = LocalAuthProvider::new(&store);
        let err = auth
            .sign_in_with_federated_provider(FederatedProvider::Google)
            .unwrap_err();
        assert!(err.message().starts_with("Sign-in with google.com is unavailable offline"));
    }
}
