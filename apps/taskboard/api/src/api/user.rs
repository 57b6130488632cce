use axum::{Extension, Json, Router, middleware, routing::get};
use axum_helpers::{
    JwtClaims, require_auth,
    errors::responses::UnauthorizedResponse,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Identity of the caller, taken from the verified token
#[derive(Debug, Serialize, ToSchema)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<JwtClaims> for CurrentUser {
    fn from(claims: JwtClaims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

pub fn router(state: &AppState) -> Router {
    Router::new()
        .route("/", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            require_auth,
        ))
}

/// The authenticated user
#[utoipa::path(
    get,
    path = "/user",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Authenticated user", body = CurrentUser),
        (status = 401, response = UnauthorizedResponse)
    )
)]
pub async fn current_user(Extension(claims): Extension<JwtClaims>) -> Json<CurrentUser> {
    Json(claims.into())
}
