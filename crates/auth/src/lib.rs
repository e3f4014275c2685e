//! Mock authentication for the resumo frontends.
//!
//! [`AuthStore`] keeps accounts in memory and publishes the signed-in user
//! through a `watch` channel, so any number of screens can follow sign-in and
//! sign-out without polling. Nothing is persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("E-mail inválido: {0}")]
    InvalidEmail(String),

    #[error("A senha deve ter pelo menos 6 caracteres")]
    WeakPassword,

    #[error("E-mail já cadastrado: {0}")]
    EmailInUse(String),

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Nenhum usuário autenticado")]
    NotSignedIn,
}

pub type Result<T> = std::result::Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub uid: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

/// Fields to change on the signed-in user. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    identity: UserIdentity,
}

/// Screens of the application, as far as access control is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Home,
    Analysis,
    Profile,
}

impl Route {
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::Home)
    }
}

pub struct AuthStore {
    accounts: RwLock<HashMap<String, Account>>,
    current: watch::Sender<Option<UserIdentity>>,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_email(email: &str) -> Result<String> {
    let email = email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(AuthError::InvalidEmail(email));
    }
    Ok(email)
}

impl AuthStore {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            current,
        }
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.current.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Receiver that sees every sign-in, sign-out and profile change.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.current.subscribe()
    }

    /// Register a new account and sign it in.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<UserIdentity> {
        let email = normalize_email(email)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let identity = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&email) {
                return Err(AuthError::EmailInUse(email));
            }
            let identity = UserIdentity {
                uid: Uuid::new_v4(),
                email: email.clone(),
                display_name: None,
                photo_url: None,
            };
            accounts.insert(
                email,
                Account {
                    password: password.to_string(),
                    identity: identity.clone(),
                },
            );
            identity
        };

        tracing::info!(uid = %identity.uid, "account created");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserIdentity> {
        let email = normalize_email(email)?;
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&email)
            .filter(|account| account.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let identity = account.identity.clone();
        drop(accounts);

        tracing::info!(uid = %identity.uid, "signed in");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_out(&self) {
        if let Some(user) = self.current.send_replace(None) {
            tracing::info!(uid = %user.uid, "signed out");
        }
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<UserIdentity> {
        let current = self.current_user().ok_or(AuthError::NotSignedIn)?;

        let identity = {
            let mut accounts = self.accounts.write().await;
            let account = accounts
                .get_mut(&current.email)
                .ok_or(AuthError::NotSignedIn)?;
            if let Some(name) = update.display_name.filter(|n| !n.is_empty()) {
                account.identity.display_name = Some(name);
            }
            if let Some(url) = update.photo_url.filter(|u| !u.is_empty()) {
                account.identity.photo_url = Some(url);
            }
            account.identity.clone()
        };

        tracing::debug!(uid = %identity.uid, "profile updated");
        self.current.send_replace(Some(identity.clone()));
        Ok(identity)
    }
}

/// Route guard: protected routes resolve to [`Route::Login`] while signed out.
pub fn require_user(store: &AuthStore, requested: Route) -> Route {
    if requested.is_public() || store.is_signed_in() {
        requested
    } else {
        tracing::debug!(?requested, "not signed in, redirecting to login");
        Route::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_up_validates_input() {
        let store = AuthStore::new();
        assert_eq!(
            store.sign_up("sem-arroba", "segredo").await,
            Err(AuthError::InvalidEmail("sem-arroba".into()))
        );
        assert_eq!(
            store.sign_up("ana@example.com", "12345").await,
            Err(AuthError::WeakPassword)
        );
        assert!(!store.is_signed_in());
    }

    #[test]
    fn messages_are_in_portuguese() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "E-mail ou senha inválidos"
        );
        assert_eq!(
            AuthError::WeakPassword.to_string(),
            "A senha deve ter pelo menos 6 caracteres"
        );
        assert_eq!(
            AuthError::EmailInUse("ana@example.com".into()).to_string(),
            "E-mail já cadastrado: ana@example.com"
        );
    }

    #[tokio::test]
    async fn email_cannot_register_twice() {
        let store = AuthStore::new();
        store.sign_up("ana@example.com", "segredo").await.unwrap();
        assert_eq!(
            store.sign_up("ANA@example.com", "outro-segredo").await,
            Err(AuthError::EmailInUse("ana@example.com".into()))
        );
    }

    #[tokio::test]
    async fn wrong_password_fails() {
        let store = AuthStore::new();
        store.sign_up("ana@example.com", "segredo").await.unwrap();
        store.sign_out().await;

        assert_eq!(
            store.sign_in("ana@example.com", "errado").await,
            Err(AuthError::InvalidCredentials)
        );
        assert_eq!(
            store.sign_in("bia@example.com", "segredo").await,
            Err(AuthError::InvalidCredentials)
        );
        let user = store.sign_in("ana@example.com", "segredo").await.unwrap();
        assert_eq!(store.current_user(), Some(user));
    }

    #[tokio::test]
    async fn subscribers_see_sign_in_and_sign_out() {
        let store = AuthStore::new();
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_none());

        store.sign_up("ana@example.com", "segredo").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().as_ref().map(|u| u.email.clone()),
            Some("ana@example.com".to_string())
        );

        store.sign_out().await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_none());
    }

    #[tokio::test]
    async fn guard_redirects_when_signed_out() {
        let store = AuthStore::new();
        assert_eq!(require_user(&store, Route::Analysis), Route::Login);
        assert_eq!(require_user(&store, Route::Home), Route::Home);

        store.sign_up("ana@example.com", "segredo").await.unwrap();
        assert_eq!(require_user(&store, Route::Analysis), Route::Analysis);
        assert_eq!(require_user(&store, Route::Profile), Route::Profile);
    }

    #[tokio::test]
    async fn profile_update_keeps_unset_fields() {
        let store = AuthStore::new();
        assert_eq!(
            store.update_profile(ProfileUpdate::default()).await,
            Err(AuthError::NotSignedIn)
        );

        store.sign_up("ana@example.com", "segredo").await.unwrap();
        store
            .update_profile(ProfileUpdate {
                display_name: Some("Ana".into()),
                photo_url: None,
            })
            .await
            .unwrap();
        let user = store
            .update_profile(ProfileUpdate {
                display_name: None,
                photo_url: Some("https://example.com/ana.png".into()),
            })
            .await
            .unwrap();

        assert_eq!(user.display_name.as_deref(), Some("Ana"));
        assert_eq!(user.photo_url.as_deref(), Some("https://example.com/ana.png"));
        assert_eq!(store.current_user(), Some(user));
    }
}
