#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let settings = common::settings::get_settings()?;

    let subscriber = common::telemetry::get_subscriber(settings.debug);
    common::telemetry::init_subscriber(subscriber).map_err(|e| anyhow::anyhow!(e))?;

    let application = user_service::startup::Application::build(settings.clone()).await?;

    tracing::event!(target: "user_service", tracing::Level::INFO, "Listening on http://{}:{}/", settings.application.host, application.port());

    application.run_until_stopped().await?;
    Ok(())
}
