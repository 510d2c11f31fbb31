use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::default::default_route_handler,
        crate::handlers::user::create::create_user_handler,
        crate::handlers::user::update::update_user_handler,
        crate::handlers::user::delete::delete_user_handler,
    ),
    components(
        schemas(
            crate::handlers::user::create::CreateUserReq,
            crate::handlers::user::update::UpdateUserReq,
            crate::handlers::user::update::UpdateUserResponse,

            crate::models::GenericResponse,
            crate::models::User,
            crate::models::MessageStatus,
        )
    ),
    tags(
        (name = "BirthdayBuzz User API", description = "User records and birthday notifications")
    )
)]
pub struct ApiDoc;
