use std::fs;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    fs::write(
        "openapi.json",
        user_service::routes::ApiDoc::openapi().to_pretty_json()?,
    )?;
    Ok(())
}
