//! sessia-auth
//!
//! Cognito JWT claim handling. Token issuance and the login flows live in
//! Cognito itself; this crate only turns a bearer token into typed claims.

pub mod error;
pub mod jwt;
