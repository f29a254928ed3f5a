use actix_web::{post, web::Data, web::Json, HttpResponse};
use common::db::AnyConnection;
use common::models::{NewUser, User};
use diesel::{QueryResult, RunQueryDsl};

use crate::context::AppContext;
use crate::errors::{ApiError, UserError};
use crate::types::{CreateNewUser, SuccessResponse};
#[cfg(feature = "openapi")]
use crate::types::{CreateUserBody, ErrorResponse};
use crate::utils::password;

#[cfg_attr(feature = "openapi", utoipa::path(
    path = "/user",
    request_body = CreateUserBody,
    responses(
        (status = 201, description = "User stored", body = SuccessResponse,
            example = json!({"message": "User a@x.com created successfully!"})),
        (status = 400, description = "A required field is missing or null", body = ErrorResponse,
            example = json!({"error": "Missing field email"})),
        (status = 500, description = "The user could not be stored", body = ErrorResponse),
    )
))]
#[tracing::instrument(name = "Adding a new user", skip(ctx, body))]
#[post("/user")]
pub async fn create_user(
    ctx: Data<AppContext>,
    body: Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let new_user = CreateNewUser::from_body(&body)?;

    let user = ctx
        .run(move |con| -> Result<User, UserError> {
            let hashed_password = password::hash(&new_user.password)?;
            Ok(insert_user_into_db(
                con,
                NewUser {
                    email: &new_user.email,
                    password: &hashed_password,
                    is_active: new_user.is_active,
                },
            )?)
        })
        .await?;

    tracing::event!(target: "user_service", tracing::Level::INFO, user_id = user.id, "User created successfully.");
    Ok(HttpResponse::Created().json(SuccessResponse {
        message: format!("User {} created successfully!", user.email),
    }))
}

/// Inserts `user` and returns the stored row, id included.
///
/// The row comes back through `RETURNING`, so concurrent inserts never hand
/// each other's rows back.
pub fn insert_user_into_db(con: &mut AnyConnection, user: NewUser<'_>) -> QueryResult<User> {
    use common::schema::users::dsl::*;

    let insert = diesel::insert_into(users).values(&user);
    match con {
        AnyConnection::Postgresql(con) => insert.get_result(con),
        AnyConnection::Sqlite(con) => insert.get_result(con),
    }
}
