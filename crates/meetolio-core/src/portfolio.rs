//! Portfolio publishing

use meetolio_auth::{Identity, ensure_owner};
use meetolio_db::{Database, Portfolio, PortfolioProfile};
use tracing::{debug, info};

use crate::error::{ACCOUNT_NOT_FOUND, CoreError, PORTFOLIO_EXISTS, PORTFOLIO_NOT_FOUND};

/// Portfolio service
#[derive(Clone)]
pub struct PortfolioService {
    db: Database,
}

impl PortfolioService {
    /// Create a new portfolio service
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a user's public portfolio
    pub async fn get_portfolio(&self, user_id: i64) -> Result<Portfolio, CoreError> {
        self.db
            .get_portfolio(user_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(PORTFOLIO_NOT_FOUND.to_string()))
    }

    /// Create the portfolio owned by `owner_id` on behalf of `identity`
    pub async fn create_portfolio(
        &self,
        identity: &Identity,
        owner_id: i64,
        profile: PortfolioProfile,
    ) -> Result<Portfolio, CoreError> {
        let user_id = ensure_owner(identity, owner_id)?;
        debug!("Creating portfolio for user {}", user_id);

        // The token may outlive the account
        if self.db.get_user_by_id(user_id).await?.is_none() {
            return Err(CoreError::NotFound(ACCOUNT_NOT_FOUND.to_string()));
        }

        let portfolio = self
            .db
            .insert_portfolio(user_id, profile)
            .await
            .map_err(|e| CoreError::duplicate_or(e, PORTFOLIO_EXISTS))?;

        info!("Created portfolio for user {}", user_id);
        Ok(portfolio)
    }

    /// Replace the portfolio owned by `owner_id` on behalf of `identity`
    pub async fn update_portfolio(
        &self,
        identity: &Identity,
        owner_id: i64,
        profile: PortfolioProfile,
    ) -> Result<Portfolio, CoreError> {
        let user_id = ensure_owner(identity, owner_id)?;
        debug!("Updating portfolio for user {}", user_id);

        if !self.db.update_portfolio(user_id, &profile).await? {
            return Err(CoreError::NotFound(PORTFOLIO_NOT_FOUND.to_string()));
        }

        info!("Updated portfolio for user {}", user_id);
        self.get_portfolio(user_id).await
    }
}
