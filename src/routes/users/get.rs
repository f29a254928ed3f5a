use actix_web::{get, http::StatusCode, web::Data, web::Path, HttpResponse};
use common::db::AnyConnection;
use common::models::User;
use diesel::{OptionalExtension, QueryDsl, QueryResult, RunQueryDsl};

use crate::context::AppContext;
use crate::errors::{ApiError, UserError};
#[cfg(feature = "openapi")]
use crate::types::ErrorResponse;
use crate::types::UserResponse;

#[cfg_attr(feature = "openapi", utoipa::path(
    path = "/user/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "The user, or an error object if the lookup itself failed", body = UserResponse),
        (status = 404, description = "No user with this id", body = ErrorResponse,
            example = json!({"error": "user_id not found"})),
    )
))]
#[tracing::instrument(name = "Getting a user", skip(ctx, path), fields(user_id = %path))]
#[get("/user/{id}")]
pub async fn get_user(ctx: Data<AppContext>, path: Path<i32>) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let user = ctx
        .run(move |con| get_user_from_db(con, user_id))
        .await
        // Lookup failures keep status 200 on this route.
        .map_err(|e| ApiError::from(e).with_status(StatusCode::OK))?
        .ok_or(UserError::NotFound("user_id not found"))?;

    Ok(HttpResponse::Ok().json(UserResponse { user: user.into() }))
}

pub fn get_user_from_db(con: &mut AnyConnection, user_id: i32) -> QueryResult<Option<User>> {
    use common::schema::users::dsl::*;

    users.find(user_id).first::<User>(con).optional()
}
