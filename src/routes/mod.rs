mod health;
pub mod sitemap;
pub mod users;

use actix_web::{http::StatusCode, web, HttpResponse};

pub use health::health_check;
pub use sitemap::sitemap_page;
pub use users::users_routes_config;

use crate::errors::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub method: &'static str,
    pub path: &'static str,
}

/// Every route registered by [`configure`], as shown on the sitemap.
pub const ROUTES: &[Route] = &[
    Route { method: "GET", path: "/" },
    Route { method: "GET", path: "/health-check" },
    Route { method: "GET", path: "/users" },
    Route { method: "POST", path: "/user" },
    Route { method: "GET", path: "/user/{id}" },
    Route { method: "PUT", path: "/user/{id}" },
    Route { method: "DELETE", path: "/user/{id}" },
];

/// Registers all services together with the extractor configs that turn
/// malformed requests into JSON errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        tracing::event!(target: "user_service", tracing::Level::INFO, "Rejected request body: {}", err);
        ApiError::bad_request(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        ApiError::new(err.to_string(), StatusCode::NOT_FOUND).into()
    }))
    .service(health_check)
    .service(sitemap_page);

    users_routes_config(cfg);

    cfg.default_service(web::to(not_found));
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(crate::types::ErrorResponse {
        error: "Not found".into(),
    })
}

#[cfg_attr(feature = "openapi", derive(utoipa::OpenApi))]
#[cfg_attr(feature = "openapi", openapi(
    paths(
        users::list::list_users,
        users::create::create_user,
        users::get::get_user,
        users::update::update_user,
        users::delete::delete_user,
    ),
    components(schemas(
        crate::types::UserVisible,
        crate::types::UserResponse,
        crate::types::UsersResponse,
        crate::types::ErrorResponse,
        crate::types::SuccessResponse,
        crate::types::CreateUserBody,
        crate::types::UpdateUserBody,
    ))
))]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::db_test::test_db;
    use actix_web::{middleware::NormalizePath, test, App};
    use serde_json::json;

    #[test]
    async fn every_listed_route_is_served() {
        let db = test_db();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.context.clone()))
                .configure(configure),
        )
        .await;

        for route in ROUTES {
            let uri = route.path.replace("{id}", "1");
            let method = actix_web::http::Method::from_bytes(route.method.as_bytes())
                .expect("valid method");
            let req = test::TestRequest::default()
                .method(method)
                .uri(&uri)
                .set_json(json!({}))
                .to_request();
            let response = test::call_service(&app, req).await;

            // Unmatched routes fall through to the default service, which
            // answers `{"error": "Not found"}`.
            if response.status() == StatusCode::NOT_FOUND {
                let body: serde_json::Value = test::read_body_json(response).await;
                assert_ne!(body, json!({"error": "Not found"}), "{} {} is not routed", route.method, uri);
            }
        }
    }

    #[test]
    async fn root_serves_the_sitemap() {
        let db = test_db();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.context.clone()))
                .configure(configure),
        )
        .await;

        let response = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = test::read_body(response).await;
        let html = std::str::from_utf8(&body).expect("Sitemap is not UTF-8");
        assert!(html.contains("<a href=\"/users\">/users</a>"));
    }

    #[test]
    async fn malformed_json_is_a_json_error() {
        let db = test_db();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.context.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/user")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(response).await;
        assert!(body["error"].is_string());
    }

    #[test]
    async fn non_numeric_id_is_not_found() {
        let db = test_db();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db.context.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/user/abc").to_request();
        let response = test::call_service(&app, req).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    async fn trailing_slashes_are_ignored() {
        let db = test_db();
        let app = test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new(db.context.clone()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/users/").to_request();
        let response = test::call_service(&app, req).await;

        // Empty store: the list handler answered, not the fallback.
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(response).await;
        assert_eq!(body, json!({"error": "No hay usuarios"}));
    }
}
