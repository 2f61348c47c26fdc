use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

/// Bearer-token middleware for all protected routes.
///
/// Signature verification happens at the API gateway's Cognito authorizer;
/// here we decode the claims (checking expiry and token_use) and inject
/// `AuthUser` into request extensions for handlers to use.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let claims =
        sessia_auth::jwt::decode_gateway_claims(token).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let name = claims
        .name
        .or(claims.email)
        .unwrap_or_else(|| claims.sub.clone());

    req.extensions_mut().insert(AuthUser {
        sub: claims.sub,
        name,
        role: claims.role.unwrap_or_else(|| "counselor".to_string()),
    });

    Ok(next.run(req).await)
}

/// Authenticated counselor extracted from JWT claims.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub sub: String,
    pub name: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}
