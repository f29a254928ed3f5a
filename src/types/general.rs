#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use super::UserVisible;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
    #[cfg_attr(feature = "openapi", schema(example = "user_id not found"))]
    pub error: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SuccessResponse {
    #[cfg_attr(feature = "openapi", schema(example = "User a@x.com created successfully!"))]
    pub message: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserResponse {
    pub user: UserVisible,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UsersResponse {
    pub users: Vec<UserVisible>,
}
