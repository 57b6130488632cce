//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs signed with `JWT_SECRET`. [`require_auth`] accepts
//! them from the `Authorization: Bearer` header or an `access_token` cookie
//! and puts the decoded [`JwtClaims`] into the request extensions.
//!
//! ```ignore
//! use axum::{Router, routing::get, middleware};
//! use axum_helpers::auth::{JwtAuth, JwtConfig, require_auth};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! let protected = Router::new()
//!     .route("/user", get(current_user))
//!     .layer(middleware::from_fn_with_state(auth, require_auth));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, JwtAuth, JwtClaims};
pub use middleware::require_auth;
