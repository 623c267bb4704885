//! SignInHandler - Verifies owner credentials and opens an owner context.

use std::sync::Arc;

use secrecy::SecretString;

use crate::application::UserLocks;
use crate::domain::foundation::OwnerContext;
use crate::domain::survey::SurveyError;
use crate::domain::user::User;
use crate::ports::{CredentialVerifier, UserRepository};

pub struct SignInCommand {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone)]
pub struct SignInResult {
    pub user: User,
    pub context: OwnerContext,
}

pub struct SignInHandler {
    verifier: Arc<dyn CredentialVerifier>,
    users: Arc<dyn UserRepository>,
    user_locks: Arc<UserLocks>,
}

impl SignInHandler {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        users: Arc<dyn UserRepository>,
        user_locks: Arc<UserLocks>,
    ) -> Self {
        Self {
            verifier,
            users,
            user_locks,
        }
    }

    /// Creates the owner profile on first sign-in.
    pub async fn handle(&self, cmd: SignInCommand) -> Result<SignInResult, SurveyError> {
        let identity = self
            .verifier
            .verify_credentials(cmd.email.trim(), &cmd.password)
            .await
            .map_err(|e| {
                if e.is_transient() {
                    tracing::warn!(error = %e, "Credential verification unavailable");
                } else {
                    tracing::debug!("Sign-in rejected");
                }
                SurveyError::from(e)
            })?;

        let _guard = self.user_locks.acquire(identity.user_id.clone()).await;
        let user = match self.users.find_by_id(&identity.user_id).await? {
            Some(user) => user,
            None => {
                let user = User::from_identity(&identity);
                self.users.save(&user).await?;
                tracing::info!(user_id = %identity.user_id, "Owner profile created");
                user
            }
        };

        Ok(SignInResult {
            user,
            context: OwnerContext::new(identity).with_source("sign_in"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryCredentialStore, InMemoryUserRepository};
    use crate::domain::foundation::{AuthError, Identity};
    use async_trait::async_trait;

    struct UnavailableVerifier;

    #[async_trait]
    impl CredentialVerifier for UnavailableVerifier {
        async fn verify_credentials(
            &self,
            _email: &str,
            _password: &SecretString,
        ) -> Result<Identity, AuthError> {
            Err(AuthError::service_unavailable("directory offline"))
        }
    }

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string())
    }

    async fn store_with_owner() -> Arc<InMemoryCredentialStore> {
        let store = Arc::new(InMemoryCredentialStore::new(secret("test-pepper-0123456789")));
        store
            .register("owner@example.com", &secret("hunter22"), Some("Owner".to_string()))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn first_sign_in_creates_profile() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = SignInHandler::new(
            store_with_owner().await,
            users.clone(),
            Arc::new(UserLocks::new()),
        );

        let result = handler
            .handle(SignInCommand {
                email: "owner@example.com".to_string(),
                password: secret("hunter22"),
            })
            .await
            .unwrap();

        assert_eq!(result.user.display_name(), "Owner");
        assert_eq!(result.context.user_id(), result.user.id());
        assert_eq!(users.user_count().await, 1);

        handler
            .handle(SignInCommand {
                email: "owner@example.com".to_string(),
                password: secret("hunter22"),
            })
            .await
            .unwrap();
        assert_eq!(users.user_count().await, 1);
    }

    #[tokio::test]
    async fn wrong_password_is_forbidden() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = SignInHandler::new(
            store_with_owner().await,
            users.clone(),
            Arc::new(UserLocks::new()),
        );

        let err = handler
            .handle(SignInCommand {
                email: "owner@example.com".to_string(),
                password: secret("wrong"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, SurveyError::Forbidden);
        assert_eq!(users.user_count().await, 0);
    }

    #[tokio::test]
    async fn unavailable_verifier_is_retryable() {
        let handler = SignInHandler::new(
            Arc::new(UnavailableVerifier),
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(UserLocks::new()),
        );

        let err = handler
            .handle(SignInCommand {
                email: "owner@example.com".to_string(),
                password: secret("hunter22"),
            })
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
