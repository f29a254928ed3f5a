use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::types::{ErrorResponse, SuccessResponse};

/// Everything that can go wrong while serving a user operation.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("No hay usuarios")]
    Empty,

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Query(#[from] diesel::result::Error),

    #[error(transparent)]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error(transparent)]
    Blocking(#[from] actix_web::error::BlockingError),

    #[error("Unable to hash password: {0}")]
    Hashing(String),
}

impl UserError {
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing field {}", field))
    }

    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::Validation(format!("Missing fields: {}", fields.join(", ")))
    }

    pub fn credentials_not_received() -> Self {
        Self::Validation("email or password not received".into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Empty => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<diesel::result::Error> for UserError {
    fn from(e: diesel::result::Error) -> Self {
        Self::Persistence(e.into())
    }
}

impl From<diesel::r2d2::PoolError> for UserError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        Self::Persistence(e.into())
    }
}

impl From<actix_web::error::BlockingError> for UserError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        Self::Persistence(e.into())
    }
}

impl From<argon2::password_hash::Error> for UserError {
    fn from(e: argon2::password_hash::Error) -> Self {
        Self::Persistence(PersistenceError::Hashing(e.to_string()))
    }
}

/// Which top-level key carries the message in the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKey {
    Error,
    Message,
}

/// Error surfaced at the HTTP boundary: a message, the status to send it
/// with, and the key it is reported under.
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status: StatusCode,
    pub key: ResponseKey,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status,
            key: ResponseKey::Error,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_key(mut self, key: ResponseKey) -> Self {
        self.key = key;
        self
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.status)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status);
        match self.key {
            ResponseKey::Error => response.json(ErrorResponse {
                error: self.message.clone(),
            }),
            ResponseKey::Message => response.json(SuccessResponse {
                message: self.message.clone(),
            }),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        if let UserError::Persistence(inner) = &e {
            tracing::event!(target: "user_service", tracing::Level::ERROR, "Persistence failure: {:#?}", inner);
        } else {
            tracing::event!(target: "user_service", tracing::Level::INFO, "Request rejected: {}", e);
        }

        Self::new(e.to_string(), e.status_code())
    }
}
