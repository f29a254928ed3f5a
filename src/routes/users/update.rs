use actix_web::{put, web::Data, web::Json, web::Path, HttpResponse};
use common::db::AnyConnection;
use common::models::{User, UserChanges};
use diesel::{Connection, OptionalExtension, QueryDsl, QueryResult, RunQueryDsl};

use crate::context::AppContext;
use crate::errors::{ApiError, UserError};
use crate::routes::users::get_user_from_db;
#[cfg(feature = "openapi")]
use crate::types::{ErrorResponse, UpdateUserBody};
use crate::types::{UpdateUser, UserResponse};
use crate::utils::password;

#[cfg_attr(feature = "openapi", utoipa::path(
    path = "/user/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "The updated user", body = UserResponse),
        (status = 400, description = "email or password missing", body = ErrorResponse,
            example = json!({"error": "Missing fields: password"})),
        (status = 404, description = "No user with this id", body = ErrorResponse,
            example = json!({"error": "User not found"})),
        (status = 500, description = "The user could not be updated", body = ErrorResponse),
    )
))]
#[tracing::instrument(name = "Updating a user", skip(ctx, path, body), fields(user_id = %path))]
#[put("/user/{id}")]
pub async fn update_user(
    ctx: Data<AppContext>,
    path: Path<i32>,
    body: Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    if ctx
        .run(move |con| get_user_from_db(con, user_id))
        .await?
        .is_none()
    {
        return Err(UserError::NotFound("User not found").into());
    }

    let changes = UpdateUser::from_body(&body)?;

    let user = ctx
        .run(move |con| -> Result<Option<User>, UserError> {
            let hashed_password = password::hash(&changes.password)?;
            Ok(update_user_in_db(
                con,
                user_id,
                UserChanges {
                    email: &changes.email,
                    password: &hashed_password,
                },
            )?)
        })
        .await?
        // Removed between the existence check and the write.
        .ok_or(UserError::NotFound("User not found"))?;

    tracing::event!(target: "user_service", tracing::Level::INFO, "User updated.");
    Ok(HttpResponse::Ok().json(UserResponse { user: user.into() }))
}

/// Overwrites email and password of `user_id` and returns the stored row, or
/// `None` when no such row exists.
pub fn update_user_in_db(
    con: &mut AnyConnection,
    user_id: i32,
    changes: UserChanges<'_>,
) -> QueryResult<Option<User>> {
    use common::schema::users::dsl::*;

    con.transaction(|con| {
        let updated = diesel::update(users.find(user_id))
            .set(&changes)
            .execute(con)?;
        if updated == 0 {
            return Ok(None);
        }
        users.find(user_id).first::<User>(con).optional()
    })
}
