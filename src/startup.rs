use actix_cors::Cors;
use actix_web::middleware::NormalizePath;
use anyhow::Context;
use common::db::{connection_pool, run_migrations};
use common::settings::Settings;

use crate::context::AppContext;

pub struct Application {
    port: u16,
    server: actix_web::dev::Server,
}

impl Application {
    pub async fn build(settings: Settings) -> anyhow::Result<Self> {
        let pool = connection_pool(&settings.database).context("Unable to build database pool")?;

        let mut connection = pool
            .get()
            .context("Unable to connect to database to run migrations")?;
        run_migrations(&mut connection)
            .map_err(|e| anyhow::anyhow!("Unable to run database migrations: {}", e))?;
        drop(connection);

        let address = format!(
            "{}:{}",
            settings.application.host, settings.application.port
        );

        let listener = std::net::TcpListener::bind(&address)
            .with_context(|| format!("Unable to bind {}", address))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, AppContext::new(pool))?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

fn run(
    listener: std::net::TcpListener,
    context: AppContext,
) -> Result<actix_web::dev::Server, std::io::Error> {
    // Database pool shared by every worker
    let context = actix_web::web::Data::new(context);

    let server = actix_web::HttpServer::new(move || {
        actix_web::App::new()
            .wrap(NormalizePath::trim())
            .wrap(Cors::permissive())
            .app_data(context.clone())
            .configure(crate::routes::configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
