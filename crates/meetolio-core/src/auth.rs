//! Registration and login

use meetolio_auth::{DUMMY_HASH, hash_password, verify_password};
use meetolio_db::{Database, NewUser};
use tracing::{debug, info, warn};

use crate::error::{CoreError, DUPLICATE_EMAIL, INVALID_CREDENTIALS};

/// Auth service: turns credentials into a user ID.
///
/// Token issuance is left to the caller.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
}

impl AuthService {
    /// Create a new auth service
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Register a new user and return the assigned ID
    pub async fn register(&self, email: &str, password: &str) -> Result<i64, CoreError> {
        debug!("Registration attempt for: {}", email);

        // Fast path; the unique constraint catches concurrent registrations
        if self.db.get_user_by_email(email).await?.is_some() {
            warn!("Registration rejected, email already in use: {}", email);
            return Err(CoreError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }

        let password_hash = hash_password(password)?;

        let user = self
            .db
            .insert_user(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| CoreError::duplicate_or(e, DUPLICATE_EMAIL))?;

        info!("Registered user {} ({})", user.id, user.email);
        Ok(user.id)
    }

    /// Check credentials and return the matching user ID
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<i64, CoreError> {
        debug!("Login attempt for: {}", email);

        let user = self.db.get_user_by_email(email).await?;

        // Always run one verification so both failure paths take as long
        let hash_to_verify = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(DUMMY_HASH);
        let password_valid = verify_password(password, hash_to_verify);

        match (user, password_valid) {
            (Some(user), true) => {
                info!("User {} logged in", user.id);
                Ok(user.id)
            }
            _ => Err(CoreError::Unauthorized(INVALID_CREDENTIALS.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn service() -> (AuthService, Database) {
        let db = Database::in_memory().await.unwrap();
        (AuthService::new(db.clone()), db)
    }

    #[tokio::test]
    async fn test_register_then_login_yields_same_id() {
        let (auth, _) = service().await;

        let registered = auth.register("a@x.com", "pw1").await.unwrap();
        let logged_in = auth.login("a@x.com", "pw1").await.unwrap();
        assert_eq!(registered, logged_in);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_password() {
        let (auth, db) = service().await;

        let id = auth.register("a@x.com", "pw1").await.unwrap();
        let user = db.get_user_by_id(id).await.unwrap().unwrap();
        assert_ne!(user.password_hash, "pw1");
        assert!(verify_password("pw1", &user.password_hash));
    }

    #[tokio::test]
    async fn test_duplicate_register_leaves_store_unchanged() {
        let (auth, db) = service().await;

        auth.register("a@x.com", "pw1").await.unwrap();
        let err = auth.register("a@x.com", "other").await.unwrap_err();

        match err {
            CoreError::Duplicate(msg) => assert_eq!(msg, DUPLICATE_EMAIL),
            other => panic!("expected Duplicate, got {:?}", other),
        }
        assert_eq!(db.count_users().await.unwrap(), 1);
        // The original password still works
        assert!(auth.login("a@x.com", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let (auth, _) = service().await;
        auth.register("a@x.com", "pw1").await.unwrap();

        let wrong_password = auth.login("a@x.com", "nope").await.unwrap_err();
        let unknown_email = auth.login("b@x.com", "pw1").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert!(matches!(wrong_password, CoreError::Unauthorized(_)));
        assert!(matches!(unknown_email, CoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let (auth, _) = service().await;
        auth.register("a@x.com", "pw1").await.unwrap();

        assert!(auth.login("A@X.com", "pw1").await.is_err());
        assert!(auth.register("A@X.com", "pw1").await.is_ok());
    }
}
