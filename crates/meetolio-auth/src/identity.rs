//! Resolved request identity and the ownership guard

use crate::error::AuthError;

/// Who is making the current request.
///
/// Attached to the request extensions by [`crate::auth_middleware`] and
/// dropped with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(i64),
}

impl Identity {
    /// The authenticated user ID, if any
    pub fn user_id(&self) -> Option<i64> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(id) => Some(*id),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Identity::Authenticated(_))
    }
}

/// Ownership guard for handlers that mutate a user-owned resource.
///
/// Returns the acting user ID when it equals `owner_id`. Must run before
/// any mutation.
pub fn ensure_owner(identity: &Identity, owner_id: i64) -> Result<i64, AuthError> {
    match identity {
        Identity::Anonymous => Err(AuthError::Unauthorized),
        Identity::Authenticated(id) if *id == owner_id => Ok(*id),
        Identity::Authenticated(_) => Err(AuthError::Forbidden),
    }
}
