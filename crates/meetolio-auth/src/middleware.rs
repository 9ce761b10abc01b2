//! Authentication middleware for Axum

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::AuthError;
use crate::identity::Identity;
use crate::jwt::JwtManager;

/// Extract bearer token from authorization header
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve the identity carried by a request's headers.
///
/// A missing header, another scheme, or a token that fails verification all
/// resolve to [`Identity::Anonymous`].
pub fn resolve_identity(headers: &HeaderMap, jwt: &JwtManager) -> Identity {
    let Some(token) = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
    else {
        return Identity::Anonymous;
    };

    match jwt.verify(token) {
        Ok(user_id) => {
            debug!("Authenticated user: {}", user_id);
            Identity::Authenticated(user_id)
        }
        Err(e) => {
            debug!("Ignoring unverifiable bearer token: {}", e);
            Identity::Anonymous
        }
    }
}

/// Authentication middleware
///
/// Attaches an [`Identity`] to every request's extensions. It never rejects
/// a request; access decisions belong to [`require_authenticated`] and the
/// handlers.
pub async fn auth_middleware(
    State(jwt_manager): State<Arc<JwtManager>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = resolve_identity(request.headers(), &jwt_manager);
    request.extensions_mut().insert(identity);

    next.run(request).await
}

/// Middleware to require an authenticated identity
pub async fn require_authenticated(request: Request, next: Next) -> Result<Response, AuthError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .copied()
        .unwrap_or_default();

    if !identity.is_authenticated() {
        debug!("Rejecting anonymous request to {}", request.uri().path());
        return Err(AuthError::Unauthorized);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Extension, Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware::{from_fn, from_fn_with_state},
        routing::get,
    };
    use tower::ServiceExt;

    async fn whoami(Extension(identity): Extension<Identity>) -> String {
        match identity {
            Identity::Anonymous => "anonymous".to_string(),
            Identity::Authenticated(id) => id.to_string(),
        }
    }

    fn app(jwt: Arc<JwtManager>) -> Router {
        let protected = Router::new()
            .route("/private", get(whoami))
            .route_layer(from_fn(require_authenticated));

        Router::new()
            .route("/public", get(whoami))
            .merge(protected)
            .layer(from_fn_with_state(jwt, auth_middleware))
    }

    async fn call(app: Router, path: &str, auth: Option<&str>) -> (StatusCode, String) {
        let mut builder = HttpRequest::builder().uri(path);
        if let Some(value) = auth {
            builder = builder.header(AUTHORIZATION, value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn test_public_route_resolves_identity_without_failing() {
        let jwt = Arc::new(JwtManager::new("secret"));
        let token = jwt.issue(3).unwrap();

        let (status, body) = call(app(jwt.clone()), "/public", None).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "anonymous"));

        let (status, body) = call(app(jwt.clone()), "/public", Some("Bearer garbage")).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "anonymous"));

        let (status, body) = call(app(jwt.clone()), "/public", Some("Basic dXNlcjpwdw==")).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "anonymous"));

        let bearer = format!("Bearer {}", token);
        let (status, body) = call(app(jwt), "/public", Some(&bearer)).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "3"));
    }

    #[tokio::test]
    async fn test_protected_route_requires_identity() {
        let jwt = Arc::new(JwtManager::new("secret"));

        let (status, body) = call(app(jwt.clone()), "/private", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], 401);
        assert_eq!(json["message"], "User authentication failed");

        let (status, _) = call(app(jwt.clone()), "/private", Some("Bearer garbage")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let bearer = format!("Bearer {}", jwt.issue(3).unwrap());
        let (status, body) = call(app(jwt), "/private", Some(&bearer)).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "3"));
    }

    #[tokio::test]
    async fn test_token_from_other_secret_is_anonymous() {
        let jwt = Arc::new(JwtManager::new("secret"));
        let foreign = JwtManager::new("other-secret").issue(3).unwrap();

        let bearer = format!("Bearer {}", foreign);
        let (status, body) = call(app(jwt), "/public", Some(&bearer)).await;
        assert_eq!((status, body.as_str()), (StatusCode::OK, "anonymous"));
    }
}
