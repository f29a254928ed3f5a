use actix_web::{get, http::header::ContentType, HttpResponse};

use super::{Route, ROUTES};

#[tracing::instrument(name = "Rendering sitemap")]
#[get("/")]
pub async fn sitemap_page() -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render(ROUTES))
}

/// Lists every route. Parameterless `GET` routes are rendered as links.
pub fn render(routes: &[Route]) -> String {
    let items: String = routes
        .iter()
        .map(|route| {
            if route.method == "GET" && !route.path.contains('{') {
                format!(
                    "<li><code>{}</code> <a href=\"{}\">{}</a></li>",
                    route.method, route.path, route.path
                )
            } else {
                format!("<li><code>{}</code> {}</li>", route.method, route.path)
            }
        })
        .collect();

    format!(
        "<!DOCTYPE html>\
         <html><head><meta charset=\"utf-8\"><title>User Service API</title></head>\
         <body><h1>User Service API</h1>\
         <p>Available endpoints:</p>\
         <ul>{}</ul></body></html>",
        items
    )
}
