use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

use crate::error::AuthError;

/// Claims extracted from a Cognito JWT.
#[derive(Debug, Deserialize)]
pub struct CognitoClaims {
    pub sub: String,
    pub token_use: String,
    pub exp: u64,
    pub iat: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Counselor or admin; set through a Cognito custom attribute.
    #[serde(default, rename = "custom:role")]
    pub role: Option<String>,
}

/// Validate a Cognito JWT against a pre-fetched public key.
pub fn validate_token(
    token: &str,
    decoding_key: &DecodingKey,
    user_pool_id: &str,
    region: &str,
) -> Result<CognitoClaims, AuthError> {
    let issuer = format!("https://cognito-idp.{region}.amazonaws.com/{user_pool_id}");

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_issuer(&[&issuer]);
    validation.validate_exp = true;

    let token_data = decode::<CognitoClaims>(token, decoding_key, &validation)?;

    check_token_use(&token_data.claims)?;

    Ok(token_data.claims)
}

/// Decode claims from a token whose signature was already verified by the
/// API gateway's Cognito authorizer. Expiry is still checked here.
pub fn decode_gateway_claims(token: &str) -> Result<CognitoClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.insecure_disable_signature_validation();
    validation.validate_aud = false;
    validation.validate_exp = true;

    let key = DecodingKey::from_secret(&[]);
    let token_data = decode::<CognitoClaims>(token, &key, &validation)?;

    check_token_use(&token_data.claims)?;

    Ok(token_data.claims)
}

fn check_token_use(claims: &CognitoClaims) -> Result<(), AuthError> {
    let token_use = &claims.token_use;
    if token_use != "access" && token_use != "id" {
        return Err(AuthError::InvalidToken(format!(
            "unexpected token_use: {token_use}"
        )));
    }
    Ok(())
}
