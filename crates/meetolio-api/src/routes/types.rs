//! Request/Response DTOs

use meetolio_db::{Portfolio, PortfolioProfile, User};
use serde::{Deserialize, Serialize};

// ==================== Auth Types ====================

/// Signup request
#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token issued on signup and login
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

// ==================== Account Types ====================

/// Email change request
#[derive(Deserialize)]
pub struct EmailUpdateRequest {
    pub email: String,
    pub password: String,
}

/// Password change request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordUpdateRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Account response (without password)
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

// ==================== Portfolio Types ====================

/// Editable portfolio fields as they appear on the wire
#[derive(Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_kana: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub name_card_img_url: Option<String>,
}

impl From<PortfolioFields> for PortfolioProfile {
    fn from(f: PortfolioFields) -> Self {
        Self {
            name: f.name,
            name_kana: f.name_kana,
            company: f.company,
            occupation: f.occupation,
            description: f.description,
            email: f.email,
            website: f.website,
            twitter: f.twitter,
            github: f.github,
            linkedin: f.linkedin,
            name_card_img_url: f.name_card_img_url,
        }
    }
}

impl From<PortfolioProfile> for PortfolioFields {
    fn from(p: PortfolioProfile) -> Self {
        Self {
            name: p.name,
            name_kana: p.name_kana,
            company: p.company,
            occupation: p.occupation,
            description: p.description,
            email: p.email,
            website: p.website,
            twitter: p.twitter,
            github: p.github,
            linkedin: p.linkedin,
            name_card_img_url: p.name_card_img_url,
        }
    }
}

/// Portfolio creation request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioCreateRequest {
    pub user_id: i64,
    #[serde(flatten)]
    pub fields: PortfolioFields,
}

/// Public portfolio response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub user_id: i64,
    #[serde(flatten)]
    pub fields: PortfolioFields,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Portfolio> for PortfolioResponse {
    fn from(portfolio: Portfolio) -> Self {
        Self {
            user_id: portfolio.user_id,
            fields: portfolio.profile.into(),
            created_at: portfolio.created_at.to_rfc3339(),
            updated_at: portfolio.updated_at.to_rfc3339(),
        }
    }
}
