//! In-memory credential store implementing `CredentialVerifier`.
//!
//! Passwords are never stored. Each account keeps an HMAC-SHA256 digest of
//! `email:password` keyed by a server-side pepper, and verification compares
//! digests in constant time.

use std::collections::HashMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{AuthError, Identity, UserId};
use crate::ports::CredentialVerifier;

type HmacSha256 = Hmac<Sha256>;

struct Account {
    identity: Identity,
    digest: Vec<u8>,
}

pub struct InMemoryCredentialStore {
    pepper: SecretString,
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new(pepper: SecretString) -> Self {
        Self {
            pepper,
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Creates an account and returns its identity.
    ///
    /// # Errors
    ///
    /// - `InvalidCredentials` for an email without `@` or an empty password
    /// - `EmailTaken` if the email already has an account
    pub async fn register(
        &self,
        email: &str,
        password: &SecretString,
        display_name: Option<String>,
    ) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        if !email.contains('@') || password.expose_secret().is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken);
        }

        let user_id = UserId::new(Uuid::new_v4().to_string())
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;
        let identity = Identity::new(user_id, email.clone(), display_name);
        let digest = self.digest(&email, password);

        accounts.insert(
            email,
            Account {
                identity: identity.clone(),
                digest,
            },
        );
        tracing::info!(user_id = %identity.user_id, "Account registered");
        Ok(identity)
    }

    fn digest(&self, email: &str, password: &SecretString) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.pepper.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(email.as_bytes());
        mac.update(b":");
        mac.update(password.expose_secret().as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

#[async_trait]
impl CredentialVerifier for InMemoryCredentialStore {
    async fn verify_credentials(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<Identity, AuthError> {
        let email = normalize_email(email);
        let presented = self.digest(&email, password);

        let accounts = self.accounts.read().await;
        match accounts.get(&email) {
            Some(account) if bool::from(account.digest.ct_eq(&presented)) => {
                Ok(account.identity.clone())
            }
            _ => {
                tracing::debug!("Credential verification failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
