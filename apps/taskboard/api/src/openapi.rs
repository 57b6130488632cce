use axum_helpers::errors::responses::UnauthorizedResponse;
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

/// Registers the `bearer_auth` scheme referenced by protected paths
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::user::current_user),
    components(
        schemas(axum_helpers::ErrorResponse, crate::api::user::CurrentUser),
        responses(UnauthorizedResponse)
    ),
    modifiers(&BearerAuth),
    info(
        title = "Taskboard API",
        version = "0.1.0",
        description = "Task management: paginated CRUD, completion statistics and the current user"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    tags((name = "user", description = "Authenticated user")),
    nest(
        (path = "/tasks", api = domain_tasks::ApiDoc)
    )
)]
pub struct ApiDoc;
