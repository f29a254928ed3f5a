use common::db::{AnyConnection, DbPool};

use crate::errors::UserError;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub pool: DbPool,
}

impl AppContext {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs `f` with a pooled connection on the blocking thread pool.
    pub async fn run<F, T, E>(&self, f: F) -> Result<T, UserError>
    where
        F: FnOnce(&mut AnyConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: Into<UserError> + Send + 'static,
    {
        let pool = self.pool.clone();

        actix_web::web::block(move || -> Result<T, UserError> {
            let mut con = pool.get()?;
            f(&mut con).map_err(Into::into)
        })
        .await?
    }
}
