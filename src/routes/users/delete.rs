use actix_web::{delete, web::Data, web::Path, HttpResponse};
use common::db::AnyConnection;
use diesel::{Connection, QueryDsl, QueryResult, RunQueryDsl};

use crate::context::AppContext;
use crate::errors::{ApiError, ResponseKey};
#[cfg(feature = "openapi")]
use crate::types::ErrorResponse;
use crate::types::SuccessResponse;

#[cfg_attr(feature = "openapi", utoipa::path(
    path = "/user/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User removed", body = SuccessResponse,
            example = json!({"message": "user 1 deleted"})),
        (status = 400, description = "No user with this id", body = SuccessResponse,
            example = json!({"message": "user not found"})),
        (status = 500, description = "The user could not be removed", body = ErrorResponse),
    )
))]
#[tracing::instrument(name = "Deleting a user", skip(ctx, path), fields(user_id = %path))]
#[delete("/user/{id}")]
pub async fn delete_user(ctx: Data<AppContext>, path: Path<i32>) -> Result<HttpResponse, ApiError> {
    let user_id = path.into_inner();

    let deleted = ctx
        .run(move |con| delete_user_from_db(con, user_id))
        .await?;

    if !deleted {
        return Err(ApiError::bad_request("user not found").with_key(ResponseKey::Message));
    }

    tracing::event!(target: "user_service", tracing::Level::INFO, "User deleted.");
    Ok(HttpResponse::Ok().json(SuccessResponse {
        message: format!("user {} deleted", user_id),
    }))
}

/// Returns whether a row was removed.
pub fn delete_user_from_db(con: &mut AnyConnection, user_id: i32) -> QueryResult<bool> {
    use common::schema::users::dsl::*;

    con.transaction(|con| {
        let removed = diesel::delete(users.find(user_id)).execute(con)?;
        Ok(removed > 0)
    })
}
