use utoipa::openapi::Server;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::health::service::HealthStatus;
use scribe_models::{
    Comment, CommentAuthor, CreateCommentRequest, CreatePostRequest, LoginRequest, Post,
    PostWithComments, RegisterUserRequest, Role, UpdatePostRequest, UpdateUserRequest, User,
    UserWithToken,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::controller::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::users::controller::activate_user,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::feed::controller::get_feed,
        crate::modules::feed::controller::get_feed_post,
        crate::modules::posts::controller::create_post,
        crate::modules::posts::controller::update_post,
        crate::modules::posts::controller::delete_post,
        crate::modules::comments::controller::create_comment,
    ),
    components(
        schemas(
            User,
            Role,
            UserWithToken,
            RegisterUserRequest,
            UpdateUserRequest,
            LoginRequest,
            Post,
            CreatePostRequest,
            UpdatePostRequest,
            Comment,
            CommentAuthor,
            CreateCommentRequest,
            PostWithComments,
            HealthStatus,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration and token issuance"),
        (name = "Users", description = "User profiles and account activation"),
        (name = "Feed", description = "Public read access to posts"),
        (name = "Posts", description = "Authoring posts and comments"),
        (name = "Ops", description = "Operational endpoints")
    ),
    info(
        title = "Scribe API",
        version = "0.1.0",
        description = "A blog REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication and versioned post updates.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}

/// The OpenAPI document, advertising `api_url` as the server.
pub fn api_doc(api_url: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(format!("http://{api_url}"))]);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_routes_and_schemes() {
        let doc = api_doc("localhost:3000");

        assert!(doc.paths.paths.contains_key("/posts/{postID}"));
        assert!(doc.paths.paths.contains_key("/users/activate/{token}"));

        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
        assert!(components.security_schemes.contains_key("basic_auth"));
    }
}
