use secrecy::SecretString;
use serde_json::{Map, Value};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::errors::UserError;

const REQUIRED_FIELDS: [&str; 2] = ["email", "password"];

/// Serialized form of a user. The password never leaves the service.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserVisible {
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i32,
    #[cfg_attr(feature = "openapi", schema(example = "a@x.com"))]
    pub email: String,
    #[cfg_attr(feature = "openapi", schema(example = true))]
    pub is_active: bool,
}

impl From<common::models::User> for UserVisible {
    fn from(user: common::models::User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            is_active: user.is_active,
        }
    }
}

/// A validated `POST /user` body.
#[derive(Debug)]
pub struct CreateNewUser {
    pub email: String,
    pub password: SecretString,
    pub is_active: bool,
}

impl CreateNewUser {
    /// Checks key presence first, in `email`, `password` order, then rejects
    /// null or non-string values.
    pub fn from_body(body: &Value) -> Result<Self, UserError> {
        let object = as_object(body)?;

        if let Some(field) = REQUIRED_FIELDS.iter().find(|f| !object.contains_key(**f)) {
            return Err(UserError::missing_field(field));
        }

        let (email, password) = credentials(object)?;

        let is_active = match object.get("is_active") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(active)) => *active,
            Some(_) => {
                return Err(UserError::Validation(
                    "is_active must be a boolean".into(),
                ))
            }
        };

        Ok(Self {
            email,
            password,
            is_active,
        })
    }
}

/// A validated `PUT /user/{id}` body.
#[derive(Debug)]
pub struct UpdateUser {
    pub email: String,
    pub password: SecretString,
}

impl UpdateUser {
    pub fn from_body(body: &Value) -> Result<Self, UserError> {
        let object = as_object(body)?;

        let missing: Vec<&str> = REQUIRED_FIELDS
            .into_iter()
            .filter(|f| !object.contains_key(*f))
            .collect();
        if !missing.is_empty() {
            return Err(UserError::missing_fields(&missing));
        }

        let (email, password) = credentials(object)?;
        Ok(Self { email, password })
    }
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, UserError> {
    body.as_object()
        .ok_or_else(|| UserError::Validation("Request body must be a JSON object".into()))
}

fn credentials(object: &Map<String, Value>) -> Result<(String, SecretString), UserError> {
    match (
        object.get("email").and_then(Value::as_str),
        object.get("password").and_then(Value::as_str),
    ) {
        (Some(email), Some(password)) => {
            Ok((email.to_owned(), SecretString::new(password.to_owned())))
        }
        _ => Err(UserError::credentials_not_received()),
    }
}

#[cfg(feature = "openapi")]
#[derive(ToSchema)]
pub struct CreateUserBody {
    #[schema(example = "a@x.com")]
    pub email: String,
    #[schema(example = "p1")]
    pub password: String,
    #[schema(example = true)]
    pub is_active: Option<bool>,
}

#[cfg(feature = "openapi")]
#[derive(ToSchema)]
pub struct UpdateUserBody {
    #[schema(example = "b@x.com")]
    pub email: String,
    #[schema(example = "p2")]
    pub password: String,
}
