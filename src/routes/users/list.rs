use actix_web::{get, http::StatusCode, web::Data, HttpResponse};
use common::db::AnyConnection;
use common::models::User;
use diesel::{ExpressionMethods, QueryDsl, QueryResult, RunQueryDsl};

use crate::context::AppContext;
use crate::errors::{ApiError, UserError};
#[cfg(feature = "openapi")]
use crate::types::ErrorResponse;
use crate::types::{UserVisible, UsersResponse};

#[cfg_attr(feature = "openapi", utoipa::path(
    path = "/users",
    responses(
        (status = 200, description = "Every stored user", body = UsersResponse),
        (status = 400, description = "No users stored, or the lookup failed", body = ErrorResponse,
            example = json!({"error": "No hay usuarios"})),
    )
))]
#[tracing::instrument(name = "Listing all users", skip(ctx))]
#[get("/users")]
pub async fn list_users(ctx: Data<AppContext>) -> Result<HttpResponse, ApiError> {
    let users = ctx
        .run(get_all_users_from_db)
        .await
        // Lookup failures on this route are reported as 400, not 500.
        .map_err(|e| ApiError::from(e).with_status(StatusCode::BAD_REQUEST))?;

    if users.is_empty() {
        return Err(UserError::Empty.into());
    }

    Ok(HttpResponse::Ok().json(UsersResponse {
        users: users.into_iter().map(UserVisible::from).collect(),
    }))
}

pub fn get_all_users_from_db(con: &mut AnyConnection) -> QueryResult<Vec<User>> {
    use common::schema::users::dsl::*;

    users.order(id.asc()).load::<User>(con)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::db_test::{create_user, test_db};
    use actix_web::{test, App};
    use serde_json::json;

    #[test]
    async fn empty_store_is_a_bad_request() {
        let db = test_db();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.context.clone()))
                .service(list_users),
        )
        .await;

        let req = test::TestRequest::get().uri("/users").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"error": "No hay usuarios"}));
    }

    #[test]
    async fn lists_users_in_id_order_without_passwords() {
        let db = test_db();
        {
            let mut con = db.context.pool.get().expect("Unable to get database connection");
            create_user(&mut con, "a@x.com");
            create_user(&mut con, "b@x.com");
        }
        let app = test::init_service(
            App::new()
                .app_data(Data::new(db.context.clone()))
                .service(list_users),
        )
        .await;

        let req = test::TestRequest::get().uri("/users").to_request();
        let response = test::call_service(&app, req).await;
        assert!(response.status().is_success());

        let body: serde_json::Value = test::read_body_json(response).await;
        let users = body["users"].as_array().expect("users should be a list");
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["email"], "a@x.com");
        assert_eq!(users[1]["email"], "b@x.com");
        assert!(users.iter().all(|u| u.get("password").is_none()));
    }
}
