use actix_web::{get, HttpResponse};

const HEALTHY: &str = "Application is safe and healthy.";

#[get("/health-check")]
pub async fn health_check() -> HttpResponse {
    tracing::debug!(target: "user_service", "Health check requested.");
    HttpResponse::Ok().json(HEALTHY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[test]
    async fn reports_healthy() {
        let app = test::init_service(App::new().service(health_check)).await;

        let response =
            test::call_service(&app, test::TestRequest::get().uri("/health-check").to_request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: String = test::read_body_json(response).await;
        assert_eq!(body, HEALTHY);
    }
}
