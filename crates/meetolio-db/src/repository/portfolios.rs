//! Portfolio operations

use chrono::Utc;

use crate::error::DbError;
use crate::models::{Portfolio, PortfolioProfile};
use crate::repository::Database;

impl Database {
    // ==================== Portfolio Operations ====================

    /// Insert a portfolio for a user
    pub async fn insert_portfolio(
        &self,
        user_id: i64,
        profile: PortfolioProfile,
    ) -> Result<Portfolio, DbError> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO portfolios (
                user_id, name, name_kana, company, occupation, description,
                email, website, twitter, github, linkedin, name_card_img_url,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(&profile.name)
        .bind(&profile.name_kana)
        .bind(&profile.company)
        .bind(&profile.occupation)
        .bind(&profile.description)
        .bind(&profile.email)
        .bind(&profile.website)
        .bind(&profile.twitter)
        .bind(&profile.github)
        .bind(&profile.linkedin)
        .bind(&profile.name_card_img_url)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DbError::from_write(e, || format!("Portfolio for user {} already exists", user_id))
        })?;

        Ok(Portfolio {
            user_id,
            profile,
            created_at: now,
            updated_at: now,
        })
    }

    /// Get the portfolio owned by a user
    pub async fn get_portfolio(&self, user_id: i64) -> Result<Option<Portfolio>, DbError> {
        let result = sqlx::query(
            r#"
            SELECT user_id, name, name_kana, company, occupation, description,
                   email, website, twitter, github, linkedin, name_card_img_url,
                   created_at, updated_at
            FROM portfolios
            WHERE user_id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        result.map(|row| Portfolio::try_from(&row).map_err(DbError::from)).transpose()
    }

    /// Replace the content of a portfolio
    pub async fn update_portfolio(
        &self,
        user_id: i64,
        profile: &PortfolioProfile,
    ) -> Result<bool, DbError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE portfolios
            SET name = ?, name_kana = ?, company = ?, occupation = ?, description = ?,
                email = ?, website = ?, twitter = ?, github = ?, linkedin = ?,
                name_card_img_url = ?, updated_at = ?
            WHERE user_id = ?
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.name_kana)
        .bind(&profile.company)
        .bind(&profile.occupation)
        .bind(&profile.description)
        .bind(&profile.email)
        .bind(&profile.website)
        .bind(&profile.twitter)
        .bind(&profile.github)
        .bind(&profile.linkedin)
        .bind(&profile.name_card_img_url)
        .bind(now.to_rfc3339())
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewUser;

    async fn db_with_user() -> (Database, i64) {
        let db = Database::in_memory().await.unwrap();
        let user = db
            .insert_user(NewUser {
                email: "owner@x.com".to_string(),
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        (db, user.id)
    }

    #[tokio::test]
    async fn test_insert_and_get_portfolio() {
        let (db, user_id) = db_with_user().await;

        let profile = PortfolioProfile {
            name: Some("Taro".to_string()),
            company: Some("Acme".to_string()),
            github: Some("https://github.com/taro".to_string()),
            ..Default::default()
        };
        db.insert_portfolio(user_id, profile.clone()).await.unwrap();

        let stored = db.get_portfolio(user_id).await.unwrap().unwrap();
        assert_eq!(stored.user_id, user_id);
        assert_eq!(stored.profile, profile);
        assert!(db.get_portfolio(user_id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_second_portfolio_is_duplicate() {
        let (db, user_id) = db_with_user().await;

        db.insert_portfolio(user_id, PortfolioProfile::default()).await.unwrap();
        let err = db
            .insert_portfolio(user_id, PortfolioProfile::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_portfolio() {
        let (db, user_id) = db_with_user().await;

        let changes = PortfolioProfile {
            description: Some("Hello".to_string()),
            ..Default::default()
        };
        assert!(!db.update_portfolio(user_id, &changes).await.unwrap());

        db.insert_portfolio(user_id, PortfolioProfile::default()).await.unwrap();
        assert!(db.update_portfolio(user_id, &changes).await.unwrap());

        let stored = db.get_portfolio(user_id).await.unwrap().unwrap();
        assert_eq!(stored.profile.description.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn test_delete_user_removes_portfolio() {
        let (db, user_id) = db_with_user().await;
        db.insert_portfolio(user_id, PortfolioProfile::default()).await.unwrap();

        db.delete_user(user_id).await.unwrap();
        assert!(db.get_portfolio(user_id).await.unwrap().is_none());
    }
}
