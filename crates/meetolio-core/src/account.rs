//! Account self-service

use meetolio_auth::{hash_password, verify_password};
use meetolio_db::{Database, User};
use tracing::{debug, info, warn};

use crate::error::{ACCOUNT_NOT_FOUND, CoreError, DUPLICATE_EMAIL, PASSWORD_MISMATCH};

/// Account service for the authenticated user's own record
#[derive(Clone)]
pub struct AccountService {
    db: Database,
}

impl AccountService {
    /// Create a new account service
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a user's account
    pub async fn get_account(&self, user_id: i64) -> Result<User, CoreError> {
        self.db
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(ACCOUNT_NOT_FOUND.to_string()))
    }

    /// Load the user and check `current_password` before a sensitive change
    async fn confirm_password(&self, user_id: i64, current_password: &str) -> Result<User, CoreError> {
        let user = self.get_account(user_id).await?;

        if !verify_password(current_password, &user.password_hash) {
            warn!("Current password mismatch for user {}", user_id);
            return Err(CoreError::Forbidden(PASSWORD_MISMATCH.to_string()));
        }

        Ok(user)
    }

    /// Change a user's email address
    pub async fn update_email(
        &self,
        user_id: i64,
        new_email: &str,
        current_password: &str,
    ) -> Result<User, CoreError> {
        debug!("Updating email for user {}", user_id);

        self.confirm_password(user_id, current_password).await?;

        if let Some(owner) = self.db.get_user_by_email(new_email).await?
            && owner.id != user_id
        {
            return Err(CoreError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }

        let updated = self
            .db
            .update_user_email(user_id, new_email)
            .await
            .map_err(|e| CoreError::duplicate_or(e, DUPLICATE_EMAIL))?;
        if !updated {
            return Err(CoreError::NotFound(ACCOUNT_NOT_FOUND.to_string()));
        }

        info!("Updated email for user {}", user_id);
        self.get_account(user_id).await
    }

    /// Change a user's password
    pub async fn update_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), CoreError> {
        debug!("Updating password for user {}", user_id);

        self.confirm_password(user_id, current_password).await?;

        let password_hash = hash_password(new_password)?;
        if !self.db.update_user_password(user_id, &password_hash).await? {
            return Err(CoreError::NotFound(ACCOUNT_NOT_FOUND.to_string()));
        }

        info!("Updated password for user {}", user_id);
        Ok(())
    }

    /// Delete a user's account and portfolio
    pub async fn delete_account(&self, user_id: i64) -> Result<(), CoreError> {
        if !self.db.delete_user(user_id).await? {
            return Err(CoreError::NotFound(ACCOUNT_NOT_FOUND.to_string()));
        }

        info!("Deleted account {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthService;

    async fn setup() -> (AccountService, AuthService, i64) {
        let db = Database::in_memory().await.unwrap();
        let auth = AuthService::new(db.clone());
        let id = auth.register("a@x.com", "pw1").await.unwrap();
        (AccountService::new(db), auth, id)
    }

    #[tokio::test]
    async fn test_get_account() {
        let (accounts, _, id) = setup().await;

        let user = accounts.get_account(id).await.unwrap();
        assert_eq!(user.email, "a@x.com");

        let err = accounts.get_account(id + 100).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_email_requires_current_password() {
        let (accounts, _, id) = setup().await;

        let err = accounts.update_email(id, "b@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));
        assert_eq!(accounts.get_account(id).await.unwrap().email, "a@x.com");

        let user = accounts.update_email(id, "b@x.com", "pw1").await.unwrap();
        assert_eq!(user.email, "b@x.com");
        assert!(user.updated_at >= user.created_at);
    }

    #[tokio::test]
    async fn test_update_email_to_taken_address_is_duplicate() {
        let (accounts, auth, id) = setup().await;
        auth.register("taken@x.com", "pw2").await.unwrap();

        let err = accounts.update_email(id, "taken@x.com", "pw1").await.unwrap_err();
        assert!(matches!(err, CoreError::Duplicate(_)));

        // Re-submitting one's own address is fine
        assert!(accounts.update_email(id, "a@x.com", "pw1").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_password() {
        let (accounts, auth, id) = setup().await;

        let err = accounts.update_password(id, "wrong", "pw2").await.unwrap_err();
        assert!(matches!(err, CoreError::Forbidden(_)));

        accounts.update_password(id, "pw1", "pw2").await.unwrap();
        assert!(auth.login("a@x.com", "pw1").await.is_err());
        assert_eq!(auth.login("a@x.com", "pw2").await.unwrap(), id);
    }

    #[tokio::test]
    async fn test_delete_account() {
        let (accounts, auth, id) = setup().await;

        accounts.delete_account(id).await.unwrap();
        assert!(matches!(
            accounts.get_account(id).await.unwrap_err(),
            CoreError::NotFound(_)
        ));
        assert!(auth.login("a@x.com", "pw1").await.is_err());

        // A second delete finds nothing
        assert!(matches!(
            accounts.delete_account(id).await.unwrap_err(),
            CoreError::NotFound(_)
        ));
    }
}
